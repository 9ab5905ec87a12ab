/// CalendarWidget - draws the picker's popup node
///
/// Features:
/// - Clear background so the popup floats over the fields beneath it
/// - Border in the theme's border color
/// - Cells laid out by the markup's span-proportional column bounds
/// - Flag styling (today, edge, disabled) plus the focused/current highlight

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::picker::{Cell, CellId, Focus, PopupNode};
use crate::tui::widgets::RenderableWidget;

#[derive(Debug)]
pub struct CalendarWidget<'a> {
    pub popup: &'a PopupNode,
    pub focus: Focus,
}

impl<'a> CalendarWidget<'a> {
    pub fn new(popup: &'a PopupNode, focus: Focus) -> Self {
        Self { popup, focus }
    }
}

fn cell_style(cell: &Cell, focused: bool, theme: &ThemeConfig) -> Style {
    let flags = cell.flags;
    let mut style = Style::default();

    if flags.heading || flags.selected {
        style = style.add_modifier(Modifier::BOLD);
    }
    if flags.edge {
        style = style.fg(theme.edge_fg);
    }
    if flags.today {
        style = style.fg(theme.today_fg).add_modifier(Modifier::UNDERLINED);
    }
    if flags.disabled {
        style = style.fg(theme.disabled_fg);
    }

    if focused {
        style.fg(theme.selection_fg).add_modifier(Modifier::REVERSED)
    } else if flags.current {
        style.fg(theme.unfocused_selection_fg()).add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

impl RenderableWidget for CalendarWidget<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        if !self.popup.is_attached() {
            return;
        }
        let Some(markup) = self.popup.content.as_ref() else {
            return;
        };

        let outer = self.popup.rect.intersection(area);
        if outer.is_empty() {
            return;
        }
        Clear.render(outer, buf);
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_fg))
            .render(outer, buf);

        let inner = self.popup.inner().intersection(area);
        for (r, row) in markup.rows.iter().enumerate() {
            let y = inner.y + r as u16;
            if y >= inner.bottom() {
                break;
            }
            for (c, cell) in row.iter().enumerate() {
                let id = CellId::new(r, c);
                let Some((start, width)) = markup.cell_bounds(id) else {
                    continue;
                };
                let slot = Rect::new(self.popup.inner().x + start, y, width, 1).intersection(inner);
                if slot.is_empty() {
                    continue;
                }

                let style = cell_style(cell, self.focus == Focus::Cell(id), theme);
                let pad = slot.width.saturating_sub(cell.text.width() as u16) / 2;
                if cell.flags.current || self.focus == Focus::Cell(id) {
                    buf.set_style(slot, style);
                }
                buf.set_stringn(slot.x + pad, y, &cell.text, (slot.width - pad) as usize, style);
            }
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(self.popup.rect.height)
    }

    fn preferred_width(&self) -> Option<u16> {
        Some(self.popup.rect.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::testing::{harness, ymd, Harness};
    use crate::picker::StatePatch;
    use crate::picker::View;
    use crate::tui::widgets::testing::*;

    fn opened(text: &str) -> Harness {
        let mut h = harness(text, ymd(2020, 1, 1), ymd(2020, 12, 31));
        h.dp.set_layout(Rect::new(0, 0, 20, 1), Rect::new(0, 0, 40, 14));
        h.dp.open();
        h
    }

    fn render_picker(h: &Harness, width: u16, height: u16) -> Buffer {
        let popup = h.dp.surface().popup.as_ref().unwrap();
        render_widget(&CalendarWidget::new(popup, h.dp.surface().focus), width, height)
    }

    #[test]
    fn test_calendar_day_view_layout() {
        let h = opened("2020-01-15");
        let buf = render_picker(&h, 40, 14);

        assert_eq!(buffer_line(&buf, 0).trim_end(), "");
        assert_eq!(buffer_line(&buf, 1).trim_end(), "┌────────────────────────────┐");
        assert_eq!(buffer_line(&buf, 2).trim_end(), "│ ‹    January     2020   ›  │");
        assert_eq!(buffer_line(&buf, 3).trim_end(), "│Sun Mon Tue Wed Thu Fri Sat │");
        assert_eq!(buffer_line(&buf, 4).trim_end(), "│ 29  30  31   1   2   3   4 │");
        assert_eq!(buffer_line(&buf, 10).trim_end(), "│  Today    Clear    Close   │");
        assert_eq!(buffer_line(&buf, 11).trim_end(), "└────────────────────────────┘");
    }

    #[test]
    fn test_calendar_focused_cell_style() {
        let h = opened("2020-01-15");
        let theme = test_theme();
        let buf = render_picker(&h, 40, 14);

        // 15th: week row 3, Wednesday column
        assert_eq!(get_cell(&buf, 14, 6).symbol(), "1");
        assert_eq!(get_cell(&buf, 15, 6).symbol(), "5");
        assert_eq!(get_cell(&buf, 15, 6).fg, theme.selection_fg);
        assert!(get_cell(&buf, 13, 6).modifier.contains(Modifier::REVERSED));
        assert!(!get_cell(&buf, 18, 6).modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_calendar_flag_styles() {
        let h = opened("2020-06-01");
        let theme = test_theme();
        let buf = render_picker(&h, 40, 14);

        // 2020-05-31 leads the first week as an edge day
        assert_eq!(get_cell(&buf, 3, 4).symbol(), "1");
        assert_eq!(get_cell(&buf, 3, 4).fg, theme.edge_fg);
        // Today (2020-06-15) is underlined: week row 2, Monday column
        assert!(get_cell(&buf, 7, 6).modifier.contains(Modifier::UNDERLINED));
        assert_eq!(get_cell(&buf, 7, 6).fg, theme.today_fg);
    }

    #[test]
    fn test_calendar_unfocused_current_cell() {
        let mut h = opened("2020-01-15");
        h.dp.focus(crate::picker::Focus::Outside);
        let theme = test_theme();
        let buf = render_picker(&h, 40, 14);
        assert_eq!(get_cell(&buf, 15, 6).fg, theme.unfocused_selection_fg());
    }

    #[test]
    fn test_calendar_month_view() {
        let mut h = opened("2020-01-15");
        h.dp.set_state(StatePatch::view(View::Month));
        let buf = render_picker(&h, 40, 14);

        assert_eq!(buffer_line(&buf, 2).trim_end(), "│            2020            │");
        assert_eq!(buffer_line(&buf, 3).trim_end(), "│   Jan      Feb      Mar    │");
        assert_eq!(buffer_line(&buf, 7).trim_end(), "└────────────────────────────┘");
    }

    #[test]
    fn test_calendar_hidden_when_detached() {
        let mut h = opened("2020-01-15");
        h.dp.close(false);
        let buf = render_picker(&h, 40, 14);
        assert!(buffer_to_string(&buf).chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn test_calendar_clipped_to_area() {
        let h = opened("2020-01-15");
        let buf = render_picker(&h, 12, 5);
        assert_eq!(buffer_line(&buf, 1), "┌──────────┐");
        assert_eq!(buf.area.height, 5);
    }

    #[test]
    fn test_calendar_preferred_size() {
        let h = opened("2020-01-15");
        let popup = h.dp.surface().popup.as_ref().unwrap();
        let widget = CalendarWidget::new(popup, Focus::Outside);
        assert_eq!(widget.preferred_width(), Some(30));
        assert_eq!(widget.preferred_height(), Some(11));
    }
}
