/// InputField widget - a labelled single-line text field
///
/// The value area is underlined across its full width so an empty field is
/// still visible. The label takes the selection color while focused.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
};
use crate::config::ThemeConfig;
use crate::picker::InputElement;
use crate::tui::widgets::RenderableWidget;

/// Default label column width
pub const LABEL_WIDTH: u16 = 7;

#[derive(Debug)]
pub struct InputField<'a> {
    pub label: &'a str,
    pub input: &'a InputElement,
    pub focused: bool,
    pub label_width: u16,
}

impl<'a> InputField<'a> {
    pub fn new(label: &'a str, input: &'a InputElement) -> Self {
        Self {
            label,
            input,
            focused: false,
            label_width: LABEL_WIDTH,
        }
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Area holding the editable text, right of the label
    pub fn value_area(&self, area: Rect) -> Rect {
        let offset = self.label_width.min(area.width);
        Rect {
            x: area.x + offset,
            y: area.y,
            width: area.width - offset,
            height: area.height.min(1),
        }
    }

    /// Terminal position of the text cursor
    pub fn cursor_position(&self, area: Rect) -> Position {
        let value = self.value_area(area);
        let column = self.input.cursor_column().min(value.width.saturating_sub(1));
        Position::new(value.x + column, value.y)
    }
}

impl RenderableWidget for InputField<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let label_style = if self.focused {
            Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        buf.set_stringn(area.x, area.y, self.label, self.label_width as usize, label_style);

        let value = self.value_area(area);
        if value.width == 0 {
            return;
        }
        buf.set_style(value, Style::default().add_modifier(Modifier::UNDERLINED));
        buf.set_stringn(
            value.x,
            value.y,
            self.input.text(),
            value.width as usize,
            Style::default().add_modifier(Modifier::UNDERLINED),
        );
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::testing::*;

    #[test]
    fn test_input_field_renders_label_and_text() {
        let input = InputElement::new("2020-01-15");
        let widget = InputField::new("Date", &input);
        let buf = render_widget(&widget, 24, 1);

        assert_buffer(&buf, &["Date   2020-01-15"]);
        assert!(get_cell(&buf, 20, 0).modifier.contains(Modifier::UNDERLINED));
        assert!(!get_cell(&buf, 3, 0).modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_input_field_focus_colors_label() {
        let input = InputElement::new("");
        let theme = test_theme();
        let buf = render_widget(&InputField::new("Notes", &input).with_focus(true), 20, 1);
        assert_eq!(get_cell(&buf, 0, 0).fg, theme.selection_fg);

        let buf = render_widget(&InputField::new("Notes", &input), 20, 1);
        assert_ne!(get_cell(&buf, 0, 0).fg, theme.selection_fg);
    }

    #[test]
    fn test_input_field_clips_long_text() {
        let input = InputElement::new("abcdefghijklmnop");
        let buf = render_widget(&InputField::new("Date", &input), 12, 1);
        assert_eq!(buffer_line(&buf, 0), "Date   abcde");
    }

    #[test]
    fn test_value_area_and_cursor() {
        let mut input = InputElement::new("2020-01-15");
        let widget = InputField::new("Date", &input);
        let area = Rect::new(2, 3, 30, 1);
        assert_eq!(widget.value_area(area), Rect::new(9, 3, 23, 1));
        assert_eq!(widget.cursor_position(area), Position::new(19, 3));

        input.home();
        let widget = InputField::new("Date", &input);
        assert_eq!(widget.cursor_position(area), Position::new(9, 3));
    }

    #[test]
    fn test_input_field_zero_area() {
        let input = InputElement::new("x");
        let buf = render_widget(&InputField::new("Date", &input), 0, 0);
        assert_eq!(buf.area.width, 0);
    }
}
