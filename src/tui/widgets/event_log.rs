/// EventLog widget - the most recent picker events, newest last
///
/// Draws a titled separator on the first line and fills the remaining lines
/// with the tail of the log.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use crate::config::ThemeConfig;
use crate::tui::widgets::RenderableWidget;

#[derive(Debug)]
pub struct EventLog<'a> {
    pub title: &'a str,
    pub entries: &'a [String],
}

impl<'a> EventLog<'a> {
    pub fn new(title: &'a str, entries: &'a [String]) -> Self {
        Self { title, entries }
    }
}

impl RenderableWidget for EventLog<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let heading = format!("── {} ", self.title);
        let rule = "─".repeat((area.width as usize).saturating_sub(heading.chars().count()));
        buf.set_stringn(
            area.x,
            area.y,
            format!("{}{}", heading, rule),
            area.width as usize,
            Style::default().fg(theme.border_fg).add_modifier(Modifier::BOLD),
        );

        let visible = (area.height - 1) as usize;
        let skip = self.entries.len().saturating_sub(visible);
        for (i, entry) in self.entries.iter().skip(skip).enumerate() {
            buf.set_stringn(area.x, area.y + 1 + i as u16, entry, area.width as usize, Style::default());
        }
    }
}
