/// Terminal event routing
///
/// Converts crossterm key and mouse events into the picker's input-level and
/// popup-level events, or into edits of the focused field.
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tracing::{debug, trace};

use crate::picker::{ContainerEvent, InputElement, InputEvent};
use super::app::{App, Field};

/// Route one terminal event, then let the app catch up on picker events
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
    app.sync();
}

/// Apply an editing key to a text input; returns false for keys it ignores
pub fn edit_text(input: &mut InputElement, key: KeyEvent) -> bool {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return false;
    }
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => return false,
    }
    true
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        debug!("KEY: Ctrl-C, quitting");
        app.should_quit = true;
        return;
    }

    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        app.cycle_focus();
        return;
    }

    // Keys go to the popup whenever one of its cells holds focus
    if app.picker.has_focus() {
        trace!("KEY: {:?} -> calendar", key.code);
        app.picker.handle_container_event(ContainerEvent::KeyDown(key));
        return;
    }

    match app.field() {
        Some(Field::Date) => handle_date_key(app, key),
        Some(Field::Notes) => match key.code {
            KeyCode::Esc => app.focus_field(None),
            _ => {
                edit_text(&mut app.notes, key);
            }
        },
        None => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                debug!("KEY: quitting");
                app.should_quit = true;
            }
        }
    }
}

fn handle_date_key(app: &mut App, key: KeyEvent) {
    let visible = app.picker.is_visible();
    match key.code {
        KeyCode::Down if visible => app.picker.focus_calendar(),
        KeyCode::Esc if visible => app.picker.close(false),
        KeyCode::Esc => app.focus_field(None),
        _ => app.picker.edit_input(|input| {
            edit_text(input, key);
        }),
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (column, row) = (mouse.column, mouse.row);
    let position = Position::new(column, row);
    let over_popup = app
        .picker
        .surface()
        .popup
        .as_ref()
        .filter(|popup| popup.contains(column, row))
        .map(|popup| popup.cell_at(column, row));

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(target) = over_popup {
                app.pressed = target;
                let result = app.picker.handle_container_event(ContainerEvent::MouseDown(target));
                trace!("KEY: popup mousedown {:?} -> {:?}", target, result);
            } else if app.areas.date.contains(position) {
                app.picker.handle_input_event(InputEvent::MouseDown);
                app.focus_field(Some(Field::Date));
            } else if app.areas.notes.contains(position) {
                app.focus_field(Some(Field::Notes));
            } else {
                app.focus_field(None);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let pressed = app.pressed.take();
            if let Some(target) = over_popup {
                // A click needs press and release on the same cell
                if target.is_some() && target == pressed {
                    app.picker.handle_container_event(ContainerEvent::Click(target));
                }
            }
        }
        _ => {}
    }
}
