/// Testing utilities for widget rendering
///
/// This module provides helper functions for testing widgets in isolation.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use crate::config::ThemeConfig;
use super::RenderableWidget;

/// Theme with fixed colors so style assertions stay stable
pub fn test_theme() -> ThemeConfig {
    ThemeConfig {
        selection_fg: Color::Rgb(255, 200, 0), // Gold
        unfocused_selection_fg: None,
        today_fg: Color::Cyan,
        disabled_fg: Color::DarkGray,
        edge_fg: Color::Gray,
        border_fg: Color::White,
    }
}

/// Render a widget to a fresh buffer and return it
pub fn render_widget(widget: &impl RenderableWidget, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(buf.area, &mut buf, &test_theme());
    buf
}

/// Convert a buffer to a string, one line per row
pub fn buffer_to_string(buf: &Buffer) -> String {
    buffer_lines(buf).join("\n")
}

/// Get the text content of a specific line in the buffer
pub fn buffer_line(buf: &Buffer, line: u16) -> String {
    let area = buf.area();
    (0..area.width).map(|x| buf[(area.x + x, area.y + line)].symbol()).collect()
}

pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    (0..buf.area().height).map(|y| buffer_line(buf, y)).collect()
}

/// Get a single cell from the buffer
pub fn get_cell(buf: &Buffer, x: u16, y: u16) -> &ratatui::buffer::Cell {
    &buf[(x, y)]
}

/// Assert the buffer matches `expected`, ignoring trailing spaces
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);
    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}
