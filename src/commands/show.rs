use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::commands::parse_date_arg;
use crate::picker::{CellId, Clock, DatePicker, InputElement, Markup, PickerEvent, PickerOptions, SystemClock};

/// Open a picker on `date` and return the day view it renders
pub fn render_day_view(date: NaiveDate, options: PickerOptions, clock: Rc<dyn Clock>) -> Option<Markup> {
    let text = (options.format)(date);
    let mut picker = DatePicker::new(InputElement::new(text), options, Box::new(|_: PickerEvent| {}), clock);
    picker.open();
    debug!("SHOW: {:?}", picker);
    picker.surface().popup.as_ref()?.content.clone()
}

/// Lay markup out as boxed text, one line per row
///
/// Cells are centered in their span-proportional columns; the selected cell
/// is bracketed.
pub fn format_markup(markup: &Markup) -> String {
    let width = markup.width as usize;
    let mut output = String::new();

    output.push_str(&format!("┌{}┐\n", "─".repeat(width)));
    for (r, row) in markup.rows.iter().enumerate() {
        let mut line = String::new();
        for (c, cell) in row.iter().enumerate() {
            let Some((_, slot)) = markup.cell_bounds(CellId::new(r, c)) else {
                continue;
            };
            let slot = slot as usize;
            let text = if cell.flags.selected && cell.text.trim().chars().count() + 2 <= slot {
                format!("[{}]", cell.text.trim())
            } else {
                cell.text.clone()
            };
            line.push_str(&format!("{:^slot$}", text));
        }
        output.push_str(&format!("│{:<width$}│\n", line));
    }
    output.push_str(&format!("└{}┘\n", "─".repeat(width)));
    output
}

pub fn run(date: Option<String>, options: PickerOptions) -> Result<()> {
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let date = parse_date_arg(date, &options, clock.today())?;
    let markup = render_day_view(date, options, clock).context("The picker rendered nothing")?;

    print!("{}", format_markup(&markup));
    Ok(())
}
