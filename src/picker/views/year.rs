use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent};

use super::{PickerView, VIEW_WIDTH};
use crate::dates;
use crate::picker::controller::DatePicker;
use crate::picker::markup::{Cell, CellFlags, ClickAction, Markup};
use crate::picker::state::{StatePatch, View};

const COLUMNS: i32 = 4;
const ROWS: i32 = 5;

/// Window of selectable years around the highlighted one
#[derive(Debug, Clone, Copy, Default)]
pub struct YearView;

/// First year of the window shown for `year`, kept inside `[min_year, max_year]`
pub fn window_start(year: i32, min_year: i32, max_year: i32) -> i32 {
    let size = COLUMNS * ROWS;
    let start = year - size / 2;
    start.min(max_year - size + 1).max(min_year)
}

impl PickerView for YearView {
    fn render(&self, dp: &DatePicker) -> Option<Markup> {
        let opts = dp.options();
        let hilighted = dp.hilighted_date().year();
        let selected = dp.selected_date().map(|d| d.year());
        let today = dp.today().year();
        let (min_year, max_year) = (opts.min.year(), opts.max.year());
        let start = window_start(hilighted, min_year, max_year);
        let end = (start + COLUMNS * ROWS - 1).min(max_year);
        let mut markup = Markup::new(VIEW_WIDTH);

        markup.push_row(vec![Cell::label(format!("{start} - {end}")).heading()]);

        for row in 0..ROWS {
            let cells = (0..COLUMNS)
                .map(|col| {
                    let year = start + row * COLUMNS + col;
                    if year > end {
                        return Cell::label("");
                    }
                    let flags = CellFlags {
                        current: year == hilighted,
                        selected: selected == Some(year),
                        today: year == today,
                        ..CellFlags::default()
                    };
                    Cell::button(year.to_string(), ClickAction::SelectYear(year)).with_flags(flags)
                })
                .collect();
            markup.push_row(cells);
        }

        Some(markup)
    }

    fn on_click(&self, action: ClickAction, dp: &mut DatePicker) {
        if let ClickAction::SelectYear(year) = action {
            let date = dp.constrain(dates::set_year(dp.hilighted_date(), year));
            dp.set_state(StatePatch::hilight(date).and_view(View::Day));
        }
    }

    fn on_key_down(&self, key: KeyEvent, dp: &mut DatePicker) {
        let shift = match key.code {
            KeyCode::Left => -1,
            KeyCode::Right => 1,
            KeyCode::Up => -COLUMNS,
            KeyCode::Down => COLUMNS,
            KeyCode::Esc => {
                dp.set_state(StatePatch::view(View::Day));
                return;
            }
            _ => return,
        };
        dp.hilight(dates::shift_year(dp.hilighted_date(), shift));
    }
}
