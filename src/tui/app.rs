//! Interactive demo: a date field bound to the picker, a notes field, and a
//! log of the events the picker emits.

use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    Frame,
};
use tracing::{debug, info};

use crate::config::ThemeConfig;
use crate::picker::{CellId, Clock, DatePicker, Focus, InputElement, PickerEvent, PickerOptions};
use crate::tui::widgets::{CalendarWidget, EventLog, InputField, RenderableWidget};

/// Upper bound on how long the loop blocks waiting for terminal input
pub const MAX_POLL: Duration = Duration::from_millis(100);

/// Maximum number of log lines kept
const LOG_CAPACITY: usize = 200;

/// Width of each field row, label included
const FIELD_WIDTH: u16 = 40;

const TITLE: &str = "datepick  Tab: next field  Down: calendar  Esc: back  Ctrl-C: quit";

/// Focusable fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Notes,
}

/// Screen regions computed on every draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Areas {
    pub title: Rect,
    pub date: Rect,
    pub notes: Rect,
    pub log: Rect,
}

impl Areas {
    pub fn new(area: Rect) -> Self {
        let [title, _, date, _, notes, _, log] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let field = |r: Rect| Rect { width: r.width.min(FIELD_WIDTH), ..r };
        Self {
            title,
            date: field(date),
            notes: field(notes),
            log,
        }
    }
}

pub struct App {
    pub picker: DatePicker,
    pub notes: InputElement,
    pub log: Vec<String>,
    pub theme: ThemeConfig,
    pub areas: Areas,
    pub should_quit: bool,
    field: Option<Field>,
    events: Receiver<PickerEvent>,
    /// Popup cell under the last left-button press, for click matching
    pub(crate) pressed: Option<CellId>,
}

impl App {
    pub fn new(options: PickerOptions, theme: ThemeConfig, clock: Rc<dyn Clock>, text: &str) -> Self {
        let (tx, events) = mpsc::channel();
        let emitter = Box::new(move |event: PickerEvent| {
            // The receiver lives as long as the app
            let _ = tx.send(event);
        });

        Self {
            picker: DatePicker::new(InputElement::new(text), options, emitter, clock),
            notes: InputElement::default(),
            log: Vec::new(),
            theme,
            areas: Areas::default(),
            should_quit: false,
            field: None,
            events,
            pressed: None,
        }
    }

    pub fn field(&self) -> Option<Field> {
        self.field
    }

    /// Move keyboard focus to `field`, or to nothing
    pub fn focus_field(&mut self, field: Option<Field>) {
        debug!("APP: focus field {:?} -> {:?}", self.field, field);
        match field {
            Some(Field::Date) => self.picker.focus(Focus::Input),
            Some(Field::Notes) | None => {
                if self.picker.has_focus() {
                    self.picker.close(false);
                }
                self.picker.focus(Focus::Outside);
            }
        }
        self.field = field;
    }

    pub fn cycle_focus(&mut self) {
        let next = match self.field {
            Some(Field::Date) => Field::Notes,
            Some(Field::Notes) | None => Field::Date,
        };
        self.focus_field(Some(next));
    }

    /// How long to wait for input before the picker's next timer is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.picker
            .next_deadline()
            .map_or(MAX_POLL, |deadline| deadline.saturating_duration_since(now))
            .min(MAX_POLL)
    }

    pub fn tick(&mut self) {
        self.picker.tick();
        self.sync();
    }

    /// Log emitted events and reconcile field focus with the picker's
    pub fn sync(&mut self) {
        let events: Vec<PickerEvent> = self.events.try_iter().collect();
        let mut closed = false;

        for event in events {
            let entry = match event {
                PickerEvent::Select => match self.picker.selected_date() {
                    Some(_) => format!("select {}", self.picker.input().text()),
                    None => "select (cleared)".to_string(),
                },
                PickerEvent::StateChange => format!(
                    "statechange {} {}",
                    self.picker.state().view.name(),
                    self.picker.hilighted_date()
                ),
                other => other.name().to_string(),
            };
            info!("EVENT: {}", entry);
            self.push_log(entry);
            closed |= matches!(event, PickerEvent::Select | PickerEvent::Close);
        }

        let focus = self.picker.surface().focus;
        if focus != Focus::Outside {
            self.field = Some(Field::Date);
        } else if closed && self.field == Some(Field::Date) && !self.picker.options().touch_workaround {
            // Focus left a detached popup; give it back to the date field
            self.picker.focus(Focus::Input);
        }
    }

    fn push_log(&mut self, entry: String) {
        self.log.push(entry);
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.areas = Areas::new(area);
        let date_field = InputField::new("Date", self.picker.input());
        let anchor = date_field.value_area(self.areas.date);
        self.picker.set_layout(anchor, area);

        let date_focused = self.picker.surface().focus == Focus::Input;
        let notes_focused = self.field == Some(Field::Notes);
        let date_field = InputField::new("Date", self.picker.input()).with_focus(date_focused);
        let notes_field = InputField::new("Notes", &self.notes).with_focus(notes_focused);

        let buf = frame.buffer_mut();
        buf.set_stringn(
            self.areas.title.x,
            self.areas.title.y,
            TITLE,
            self.areas.title.width as usize,
            Style::default().add_modifier(Modifier::BOLD),
        );
        date_field.render(self.areas.date, buf, &self.theme);
        notes_field.render(self.areas.notes, buf, &self.theme);
        EventLog::new("Events", &self.log).render(self.areas.log, buf, &self.theme);

        if let Some(popup) = self.picker.surface().popup.as_ref() {
            CalendarWidget::new(popup, self.picker.surface().focus).render(area, buf, &self.theme);
        }

        let cursor = if date_focused {
            Some(date_field.cursor_position(self.areas.date))
        } else if notes_focused {
            Some(notes_field.cursor_position(self.areas.notes))
        } else {
            None
        };
        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("picker", &self.picker)
            .field("field", &self.field)
            .field("log", &self.log.len())
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::testing::ymd;
    use crate::tui::testing::{settle, test_app};
    use crate::tui::widgets::testing::buffer_lines;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_areas_layout() {
        let areas = Areas::new(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.title, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.date, Rect::new(0, 2, 40, 1));
        assert_eq!(areas.notes, Rect::new(0, 4, 40, 1));
        assert_eq!(areas.log, Rect::new(0, 6, 80, 18));
    }

    #[test]
    fn test_focus_date_opens_picker() {
        let (mut app, clock) = test_app("2020-01-15");
        app.focus_field(Some(Field::Date));
        settle(&mut app, &clock);

        assert!(app.picker.is_visible());
        assert_eq!(app.field(), Some(Field::Date));
        assert_eq!(app.log, vec!["open".to_string()]);
    }

    #[test]
    fn test_tab_to_notes_closes_picker() {
        let (mut app, clock) = test_app("2020-01-15");
        app.focus_field(Some(Field::Date));
        settle(&mut app, &clock);

        app.cycle_focus();
        settle(&mut app, &clock);
        assert_eq!(app.field(), Some(Field::Notes));
        assert!(!app.picker.is_visible());
        assert_eq!(app.log.last().map(String::as_str), Some("close"));
    }

    #[test]
    fn test_tab_from_focused_calendar_closes_it() {
        let (mut app, clock) = test_app("2020-01-15");
        app.focus_field(Some(Field::Date));
        settle(&mut app, &clock);
        app.picker.focus_calendar();

        app.cycle_focus();
        app.sync();
        assert!(!app.picker.is_visible());
        assert_eq!(app.field(), Some(Field::Notes));
        assert_eq!(app.picker.surface().focus, Focus::Outside);
    }

    #[test]
    fn test_selection_returns_focus_to_date_field() {
        let (mut app, clock) = test_app("2020-01-15");
        app.focus_field(Some(Field::Date));
        settle(&mut app, &clock);
        app.picker.focus_calendar();

        app.picker.set_selected_date(Some(ymd(2020, 2, 2)));
        app.sync();
        assert_eq!(app.picker.surface().focus, Focus::Input);
        assert!(app.log.contains(&"select 2020-02-02".to_string()));

        // The refocus queued a toggle; the closing guard swallows it
        settle(&mut app, &clock);
        assert!(!app.picker.is_visible());
    }

    #[test]
    fn test_poll_timeout_tracks_deadline() {
        let (mut app, clock) = test_app("");
        assert_eq!(app.poll_timeout(clock.now()), MAX_POLL);

        app.focus_field(Some(Field::Date));
        assert_eq!(app.poll_timeout(clock.now()), Duration::from_millis(5));
        clock.advance_ms(10);
        assert_eq!(app.poll_timeout(clock.now()), Duration::ZERO);
    }

    #[test]
    fn test_log_is_bounded() {
        let (mut app, _clock) = test_app("");
        for i in 0..(LOG_CAPACITY + 5) {
            app.push_log(format!("entry {}", i));
        }
        assert_eq!(app.log.len(), LOG_CAPACITY);
        assert_eq!(app.log[0], "entry 5");
    }

    #[test]
    fn test_draw_places_popup_under_date_field() {
        let (mut app, clock) = test_app("2020-01-15");
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        app.focus_field(Some(Field::Date));
        settle(&mut app, &clock);
        terminal.draw(|f| app.draw(f)).unwrap();

        let popup = app.picker.surface().popup.as_ref().unwrap();
        assert_eq!(popup.rect, Rect::new(7, 3, 30, 11));

        let lines = buffer_lines(terminal.backend().buffer());
        assert!(lines[0].starts_with("datepick"));
        assert!(lines[2].starts_with("Date   2020-01-15"));
        assert!(lines[3].contains("┌────"));
        assert!(lines[4].contains("January"));
    }
}
