//! Retained model of what the picker puts on screen: the bound text input,
//! the popup node, and which of them owns keyboard focus.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::markup::{CellId, Markup};
use super::options::Mode;

/// Keyboard focus owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Input,
    Cell(CellId),
    /// Somewhere the picker does not own
    #[default]
    Outside,
}

/// Single-line text input bound to the picker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputElement {
    text: String,
    /// Cursor position in chars
    cursor: usize,
}

impl InputElement {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor
    pub fn cursor_column(&self) -> u16 {
        let prefix: String = self.text.chars().take(self.cursor).collect();
        u16::try_from(prefix.width()).unwrap_or(u16::MAX)
    }

    /// Replace the whole text, moving the cursor to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Popup root: created once, attached and detached as the picker opens and closes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupNode {
    pub mode: Mode,
    /// Replaced wholesale on every render that produced markup
    pub content: Option<Markup>,
    /// Outer rect including the border, as last positioned
    pub rect: Rect,
    attached: bool,
}

impl PopupNode {
    pub fn new(mode: Mode) -> Self {
        Self { mode, content: None, rect: Rect::default(), attached: false }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn attach(&mut self) {
        self.attached = true;
    }

    pub(crate) fn detach(&mut self) {
        self.attached = false;
    }

    /// Inner content area (inside the one-cell border)
    pub fn inner(&self) -> Rect {
        Rect {
            x: self.rect.x.saturating_add(1),
            y: self.rect.y.saturating_add(1),
            width: self.rect.width.saturating_sub(2),
            height: self.rect.height.saturating_sub(2),
        }
    }

    /// Cell under an absolute terminal position
    pub fn cell_at(&self, column: u16, row: u16) -> Option<CellId> {
        let inner = self.inner();
        if column < inner.x || row < inner.y {
            return None;
        }
        self.content
            .as_ref()?
            .hit_test(column - inner.x, row - inner.y)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.attached
            && column >= self.rect.x
            && column < self.rect.right()
            && row >= self.rect.y
            && row < self.rect.bottom()
    }
}

/// Everything the picker draws or reads focus from
#[derive(Debug, Clone, Default)]
pub struct Surface {
    pub input: InputElement,
    pub popup: Option<PopupNode>,
    pub focus: Focus,
    /// Where the input is drawn
    pub anchor: Rect,
    /// Terminal area available to the popup
    pub viewport: Rect,
}

impl Surface {
    pub fn new(input: InputElement) -> Self {
        Self { input, ..Self::default() }
    }

    pub fn popup_attached(&self) -> bool {
        self.popup.as_ref().is_some_and(PopupNode::is_attached)
    }

    /// Whether focus is inside the attached popup
    pub fn popup_has_focus(&self) -> bool {
        self.popup_attached() && matches!(self.focus, Focus::Cell(_))
    }

    pub fn input_has_focus(&self) -> bool {
        self.focus == Focus::Input
    }
}
