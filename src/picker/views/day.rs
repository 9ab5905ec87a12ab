use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};

use super::{PickerView, VIEW_WIDTH};
use crate::dates;
use crate::picker::controller::DatePicker;
use crate::picker::markup::{Cell, CellFlags, ClickAction, Markup};
use crate::picker::state::{StatePatch, View};

const WEEKS: usize = 6;

/// Month grid with navigation header and Today/Clear/Close footer
#[derive(Debug, Clone, Copy, Default)]
pub struct DayView;

/// First cell of the six-week grid shown for `date`'s month
pub fn grid_start(date: NaiveDate, day_offset: u32) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    let back = (first.weekday().num_days_from_sunday() + 7 - day_offset % 7) % 7;
    dates::shift_day(first, -i64::from(back))
}

impl PickerView for DayView {
    fn render(&self, dp: &DatePicker) -> Option<Markup> {
        let opts = dp.options();
        let hilighted = dp.hilighted_date();
        let selected = dp.selected_date();
        let today = dp.today();
        let mut markup = Markup::new(VIEW_WIDTH);

        markup.push_row(vec![
            Cell::button("‹", ClickAction::PrevMonth),
            Cell::button(opts.lang.month_name(hilighted.month()), ClickAction::ShowMonths).with_span(3),
            Cell::button(hilighted.year().to_string(), ClickAction::ShowYears).with_span(2),
            Cell::button("›", ClickAction::NextMonth),
        ]);

        markup.push_row(
            (0..7)
                .map(|i| {
                    let name = &opts.lang.days[((i + opts.day_offset) % 7) as usize];
                    Cell::label(name.chars().take(3).collect::<String>()).heading()
                })
                .collect(),
        );

        let mut day = grid_start(hilighted, opts.day_offset);
        for _ in 0..WEEKS {
            let mut week = Vec::with_capacity(7);
            for _ in 0..7 {
                let flags = CellFlags {
                    current: day == hilighted,
                    selected: selected == Some(day),
                    today: day == today,
                    edge: day.month() != hilighted.month(),
                    disabled: !opts.is_selectable(day),
                    heading: false,
                };
                week.push(
                    Cell::button(format!("{:>2}", day.day()), ClickAction::SelectDay(day))
                        .with_flags(flags),
                );
                day = dates::shift_day(day, 1);
            }
            markup.push_row(week);
        }

        markup.push_row(vec![
            Cell::button(opts.lang.today.clone(), ClickAction::Today),
            Cell::button(opts.lang.clear.clone(), ClickAction::Clear),
            Cell::button(opts.lang.close.clone(), ClickAction::Close),
        ]);

        Some(markup)
    }

    fn on_click(&self, action: ClickAction, dp: &mut DatePicker) {
        let hilighted = dp.hilighted_date();
        match action {
            ClickAction::PrevMonth => dp.hilight(dates::shift_month(hilighted, -1, false)),
            ClickAction::NextMonth => dp.hilight(dates::shift_month(hilighted, 1, false)),
            ClickAction::ShowMonths => dp.set_state(StatePatch::view(View::Month)),
            ClickAction::ShowYears => dp.set_state(StatePatch::view(View::Year)),
            ClickAction::SelectDay(date) => dp.set_selected_date(Some(date)),
            ClickAction::Today => {
                let today = dp.today();
                dp.set_selected_date(Some(today));
            }
            ClickAction::Clear => dp.set_selected_date(None),
            ClickAction::Close => dp.close(false),
            ClickAction::SelectMonth(_) | ClickAction::SelectYear(_) => {}
        }
    }

    fn on_key_down(&self, key: KeyEvent, dp: &mut DatePicker) {
        let hilighted = dp.hilighted_date();
        let target = match key.code {
            KeyCode::Left => dates::shift_day(hilighted, -1),
            KeyCode::Right => dates::shift_day(hilighted, 1),
            KeyCode::Up => dates::shift_day(hilighted, -7),
            KeyCode::Down => dates::shift_day(hilighted, 7),
            KeyCode::PageUp => dates::shift_month(hilighted, -1, false),
            KeyCode::PageDown => dates::shift_month(hilighted, 1, false),
            KeyCode::Esc => {
                dp.close(false);
                return;
            }
            _ => return,
        };
        dp.hilight(target);
    }
}
