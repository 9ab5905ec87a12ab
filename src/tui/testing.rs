//! General test utilities for TUI tests.
//!
//! For widget-specific rendering helpers, see `crate::tui::widgets::testing`.

use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::picker::testing::{today, ymd, ManualClock};
use crate::picker::PickerOptions;
use crate::tui::app::App;
use crate::tui::widgets::testing::test_theme;

/// App over a 2020 range with a manual clock
pub fn test_app(text: &str) -> (App, Rc<ManualClock>) {
    let options = PickerOptions::new(today()).with_range(ymd(2020, 1, 1), ymd(2020, 12, 31));
    test_app_with(options, text)
}

pub fn test_app_with(options: PickerOptions, text: &str) -> (App, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(today()));
    let app = App::new(options, test_theme(), clock.clone(), text);
    (app, clock)
}

/// Advance past the debounce window and run the app's timers
pub fn settle(app: &mut App, clock: &ManualClock) {
    clock.advance_ms(6);
    app.tick();
}

pub fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Left-button press and release at one position
pub fn left_click(column: u16, row: u16) -> [Event; 2] {
    [
        mouse(MouseEventKind::Down(MouseButton::Left), column, row),
        mouse(MouseEventKind::Up(MouseButton::Left), column, row),
    ]
}

/// Draw the app once on a test terminal of the given size
pub fn draw(app: &mut App, width: u16, height: u16) -> ratatui::buffer::Buffer {
    let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(width, height))
        .expect("test terminal");
    terminal.draw(|f| app.draw(f)).expect("draw");
    terminal.backend().buffer().clone()
}
