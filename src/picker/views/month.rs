use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};

use super::{PickerView, VIEW_WIDTH};
use crate::dates;
use crate::picker::controller::DatePicker;
use crate::picker::markup::{Cell, CellFlags, ClickAction, Markup};
use crate::picker::state::{StatePatch, View};

const COLUMNS: u32 = 3;

/// Twelve months of the highlighted year
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthView;

fn month_span(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = NaiveDate::from_ymd_opt(year, month, dates::days_in_month(year, month))?;
    Some((first, last))
}

impl PickerView for MonthView {
    fn render(&self, dp: &DatePicker) -> Option<Markup> {
        let opts = dp.options();
        let hilighted = dp.hilighted_date();
        let selected = dp.selected_date();
        let today = dp.today();
        let year = hilighted.year();
        let mut markup = Markup::new(VIEW_WIDTH);

        markup.push_row(vec![Cell::label(year.to_string()).heading()]);

        for row in 0..(12 / COLUMNS) {
            let cells = (1..=COLUMNS)
                .map(|col| {
                    let month = row * COLUMNS + col;
                    let disabled = month_span(year, month)
                        .map_or(true, |(first, last)| last < opts.min || first > opts.max);
                    let flags = CellFlags {
                        current: month == hilighted.month(),
                        selected: selected.is_some_and(|d| d.year() == year && d.month() == month),
                        today: today.year() == year && today.month() == month,
                        disabled,
                        ..CellFlags::default()
                    };
                    let name: String = opts.lang.month_name(month).chars().take(3).collect();
                    Cell::button(name, ClickAction::SelectMonth(month)).with_flags(flags)
                })
                .collect();
            markup.push_row(cells);
        }

        Some(markup)
    }

    fn on_click(&self, action: ClickAction, dp: &mut DatePicker) {
        if let ClickAction::SelectMonth(month) = action {
            let date = dp.constrain(dates::set_month(dp.hilighted_date(), month));
            dp.set_state(StatePatch::hilight(date).and_view(View::Day));
        }
    }

    fn on_key_down(&self, key: KeyEvent, dp: &mut DatePicker) {
        let shift = match key.code {
            KeyCode::Left => -1,
            KeyCode::Right => 1,
            KeyCode::Up => -(COLUMNS as i32),
            KeyCode::Down => COLUMNS as i32,
            KeyCode::Esc => {
                dp.set_state(StatePatch::view(View::Day));
                return;
            }
            _ => return,
        };
        dp.hilight(dates::shift_month(dp.hilighted_date(), shift, true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::markup::CellId;
    use crate::picker::testing::{harness, key, ymd};

    #[test]
    fn test_render_grid() {
        let mut h = harness("2020-05-31", ymd(2020, 3, 15), ymd(2020, 12, 31));
        h.dp.open();
        let markup = MonthView.render(&h.dp).unwrap();

        assert_eq!(markup.height(), 5);
        assert_eq!(markup.rows[0][0].text, "2020");
        assert_eq!(markup.rows[1][0].text, "Jan");
        assert!(markup.rows[1][0].flags.disabled);
        assert!(!markup.rows[1][2].flags.disabled);
        assert_eq!(markup.current_cell(), Some(CellId::new(2, 1)));
        assert!(markup.rows[2][1].flags.selected);
        assert!(markup.rows[2][2].flags.today);
    }

    #[test]
    fn test_select_month_returns_to_day_view() {
        let mut h = harness("2020-05-31", ymd(2020, 1, 1), ymd(2020, 12, 31));
        h.dp.open();
        h.dp.set_state(StatePatch::view(View::Month));

        MonthView.on_click(ClickAction::SelectMonth(2), &mut h.dp);
        assert_eq!(h.dp.state().view, View::Day);
        assert_eq!(h.dp.hilighted_date(), ymd(2020, 2, 29));
        // Highlight only; nothing committed
        assert_eq!(h.dp.selected_date(), Some(ymd(2020, 5, 31)));
    }

    #[test]
    fn test_keys_wrap_within_year() {
        let mut h = harness("2020-11-10", ymd(2020, 1, 1), ymd(2020, 12, 31));
        h.dp.open();
        h.dp.set_state(StatePatch::view(View::Month));

        MonthView.on_key_down(key(KeyCode::Down), &mut h.dp);
        assert_eq!(h.dp.hilighted_date(), ymd(2020, 2, 10));
        MonthView.on_key_down(key(KeyCode::Left), &mut h.dp);
        assert_eq!(h.dp.hilighted_date(), ymd(2020, 1, 10));
        MonthView.on_key_down(key(KeyCode::Esc), &mut h.dp);
        assert_eq!(h.dp.state().view, View::Day);
    }
}
