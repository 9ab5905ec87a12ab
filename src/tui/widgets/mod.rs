/// Widget-based rendering for the terminal front end
///
/// Widgets render themselves directly to a ratatui Buffer so they can be
/// composed in the app's draw pass and tested against plain test buffers.

#[cfg(test)]
pub mod testing;

pub mod calendar;
pub use calendar::CalendarWidget;

pub mod event_log;
pub use event_log::EventLog;

pub mod input_field;
pub use input_field::InputField;

use ratatui::{buffer::Buffer, layout::Rect};
use crate::config::ThemeConfig;

/// Core trait for renderable widgets
///
/// This trait is object-safe, so different widget types can be stored
/// together as trait objects.
pub trait RenderableWidget {
    /// Render this widget into the provided buffer
    ///
    /// # Arguments
    ///
    /// * `area` - The rectangular area to render into
    /// * `buf` - The buffer to write to
    /// * `theme` - Colors from the `[theme]` config table
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig);

    /// Preferred height, or None if the widget adapts to any height
    fn preferred_height(&self) -> Option<u16> {
        None
    }

    /// Preferred width, or None if the widget adapts to any width
    fn preferred_width(&self) -> Option<u16> {
        None
    }
}
