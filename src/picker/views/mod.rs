//! Day, month and year calendars.
//!
//! Each view is a stateless unit struct; the controller picks one from the
//! `view` field of its state and forwards rendering, clicks and keys to it.

pub mod day;
pub mod month;
pub mod year;

use crossterm::event::KeyEvent;

use super::controller::DatePicker;
use super::markup::{ClickAction, Markup};
use super::state::View;

pub use day::DayView;
pub use month::MonthView;
pub use year::YearView;

/// Inner width shared by all views so the popup does not jump when switching
pub const VIEW_WIDTH: u16 = 28;

/// Capability set a calendar view provides to the controller
pub trait PickerView {
    /// Build the view's content, or `None` to keep the current content
    fn render(&self, dp: &DatePicker) -> Option<Markup>;

    /// Handle one action tag of a clicked cell
    fn on_click(&self, action: ClickAction, dp: &mut DatePicker);

    /// Handle a key pressed while the popup has focus (Enter never reaches here)
    fn on_key_down(&self, key: KeyEvent, dp: &mut DatePicker);
}

impl View {
    pub fn handler(self) -> &'static dyn PickerView {
        match self {
            View::Day => &DayView,
            View::Month => &MonthView,
            View::Year => &YearView,
        }
    }
}
