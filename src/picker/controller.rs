use std::rc::Rc;
use std::time::Instant;

use chrono::NaiveDate;
use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use tracing::{debug, trace};

use super::events::{ContainerEvent, Emitter, InputEvent, PickerEvent, Propagation, Subscriptions};
use super::markup::{Cell, CellId};
use super::options::{Mode, PickerOptions};
use super::position;
use super::state::{PickerState, StatePatch, View};
use super::surface::{Focus, InputElement, PopupNode, Surface};
use super::timers::{Clock, ClosingGuard, Debounce, DEBOUNCE_WINDOW};
use crate::dates;

const INPUT_EVENTS: [InputEvent; 4] = [
    InputEvent::Focus,
    InputEvent::Blur,
    InputEvent::MouseDown,
    InputEvent::Input,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Toggle,
    Blur,
}

/// Date picker bound to a text input
///
/// Two logical states: closed, and open with a `view` sub-state. Opening and
/// closing are driven by input focus/blur/mousedown through 5ms debounces;
/// `close()` arms a 100ms guard during which `open()` is ignored so focus
/// bouncing back to the input cannot reopen the popup.
///
/// All time-based behaviour is deferred: the host calls [`tick`](Self::tick)
/// once [`next_deadline`](Self::next_deadline) has passed.
pub struct DatePicker {
    options: PickerOptions,
    state: PickerState,
    selected_date: Option<NaiveDate>,
    surface: Surface,
    emit: Emitter,
    clock: Rc<dyn Clock>,
    subscriptions: Subscriptions,
    toggle: Debounce,
    blur: Debounce,
    closing: ClosingGuard,
}

impl DatePicker {
    pub fn new(input: InputElement, options: PickerOptions, emit: Emitter, clock: Rc<dyn Clock>) -> Self {
        let mut subscriptions = Subscriptions::default();
        subscriptions.attach(&INPUT_EVENTS);

        Self {
            options,
            state: PickerState::default(),
            selected_date: None,
            surface: Surface::new(input),
            emit,
            clock,
            subscriptions,
            toggle: Debounce::new(DEBOUNCE_WINDOW),
            blur: Debounce::new(DEBOUNCE_WINDOW),
            closing: ClosingGuard::default(),
        }
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn input(&self) -> &InputElement {
        &self.surface.input
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Highlighted date, or the configured default before the first open
    pub fn hilighted_date(&self) -> NaiveDate {
        self.state.hilighted_date.unwrap_or(self.options.hilighted_date)
    }

    /// Clamp a date into the configured `[min, max]`
    pub fn constrain(&self, date: NaiveDate) -> NaiveDate {
        dates::constrain(date, self.options.min, self.options.max)
    }

    /// Popup cell by id, if the popup has content
    pub fn popup_cell(&self, id: CellId) -> Option<&Cell> {
        self.surface.popup.as_ref()?.content.as_ref()?.cell(id)
    }

    pub fn is_visible(&self) -> bool {
        self.surface.popup_attached()
    }

    pub fn has_focus(&self) -> bool {
        self.surface.popup_has_focus()
    }

    /// Whether a show/hide trigger should hide; identical to `is_visible`
    pub fn should_hide(&self) -> bool {
        self.is_visible()
    }

    fn should_focus_on_render(&self) -> bool {
        self.options.should_focus_on_render.unwrap_or_else(|| match self.options.mode {
            Mode::Modal => true,
            Mode::Below => !self.surface.input_has_focus(),
        })
    }

    pub fn open(&mut self) {
        if self.closing.is_active(self.clock.now()) {
            debug!("PICKER: open suppressed by closing guard");
            return;
        }

        if self.surface.popup.is_none() {
            debug!("PICKER: creating popup ({})", self.options.mode.class_name());
            self.surface.popup = Some(PopupNode::new(self.options.mode));
        }

        self.selected_date = (self.options.parse)(self.surface.input.text()).map(|d| self.constrain(d));
        self.state.hilighted_date = Some(self.selected_date.unwrap_or(self.options.hilighted_date));
        self.state.view = View::Day;

        if let Some(popup) = self.surface.popup.as_mut() {
            popup.attach();
        }
        debug!("PICKER: open (selected={:?})", self.selected_date);
        self.render();
        self.emit(PickerEvent::Open);
    }

    pub fn close(&mut self, because_of_blur: bool) {
        if !self.is_visible() {
            return;
        }

        if let Some(popup) = self.surface.popup.as_mut() {
            popup.detach();
        }
        // Focus cannot stay on a detached node
        if matches!(self.surface.focus, Focus::Cell(_)) {
            self.surface.focus = Focus::Outside;
        }

        self.closing.arm(self.clock.now());
        debug!("PICKER: close (because_of_blur={})", because_of_blur);

        if because_of_blur && self.options.should_focus_on_blur {
            self.focus_input();
        }
        self.emit(PickerEvent::Close);
    }

    fn focus_input(&mut self) {
        self.focus(Focus::Input);
        if self.options.touch_workaround {
            self.focus(Focus::Outside);
        }
    }

    pub fn render(&mut self) {
        if !self.is_visible() {
            return;
        }

        let had_focus = self.has_focus();
        let view = self.state.view.handler();
        if let Some(markup) = view.render(self) {
            trace!("PICKER: render {} view ({} rows)", self.state.view.name(), markup.height());
            if let Some(popup) = self.surface.popup.as_mut() {
                popup.content = Some(markup);
            }
        }

        self.reposition();

        if had_focus || self.should_focus_on_render() {
            self.focus_current();
        }
    }

    fn reposition(&mut self) {
        let Surface { popup, anchor, viewport, .. } = &mut self.surface;
        let Some(popup) = popup.as_mut() else {
            return;
        };
        let Some(content) = popup.content.as_ref() else {
            return;
        };
        popup.rect = position::place(
            popup.mode,
            *anchor,
            *viewport,
            content.width.saturating_add(2),
            content.height().saturating_add(2),
        );
    }

    fn focus_current(&mut self) {
        let current = self
            .surface
            .popup
            .as_ref()
            .and_then(|p| p.content.as_ref())
            .and_then(|c| c.current_cell());
        if let Some(id) = current {
            self.focus(Focus::Cell(id));
        }
    }

    /// Move keyboard focus into the calendar, onto the highlighted cell
    pub fn focus_calendar(&mut self) {
        if self.is_visible() {
            self.focus_current();
        }
    }

    /// Merge `patch` into the state, emit `StateChange`, and re-render
    pub fn set_state(&mut self, patch: StatePatch) {
        self.state.merge(patch);
        self.emit(PickerEvent::StateChange);
        self.render();
    }

    /// Highlight `date`, clamped into `[min, max]`
    pub fn hilight(&mut self, date: NaiveDate) {
        let date = self.constrain(date);
        self.set_state(StatePatch::hilight(date));
    }

    /// Commit a selection: writes the input, emits `Select`, and closes.
    ///
    /// Dates that are not selectable are ignored. `None` clears the input.
    pub fn set_selected_date(&mut self, date: Option<NaiveDate>) {
        if let Some(d) = date {
            if !self.options.is_selectable(d) {
                debug!("PICKER: ignoring selection of {} (out of range)", d);
                return;
            }
            self.state.hilighted_date = Some(d);
        }

        self.selected_date = date;
        let text = date.map(|d| (self.options.format)(d)).unwrap_or_default();
        self.surface.input.set_text(text);
        self.emit(PickerEvent::Select);
        self.close(false);
    }

    /// Close and detach every input listener; the picker is inert afterwards
    pub fn destroy(&mut self) {
        self.close(false);
        self.subscriptions.detach_all();
        self.toggle.cancel();
        self.blur.cancel();
        debug!("PICKER: destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Record where the input is drawn and how much room the popup has
    pub fn set_layout(&mut self, anchor: Rect, viewport: Rect) {
        if self.surface.anchor == anchor && self.surface.viewport == viewport {
            return;
        }
        self.surface.anchor = anchor;
        self.surface.viewport = viewport;
        self.reposition();
    }

    /// Move keyboard focus, notifying the input's focus/blur listeners
    pub fn focus(&mut self, target: Focus) {
        let previous = std::mem::replace(&mut self.surface.focus, target);
        if previous == target {
            return;
        }
        trace!("PICKER: focus {:?} -> {:?}", previous, target);
        if previous == Focus::Input {
            self.handle_input_event(InputEvent::Blur);
        }
        if target == Focus::Input {
            self.handle_input_event(InputEvent::Focus);
        }
    }

    /// Edit the bound input as the user would, firing `input` on change
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut InputElement)) {
        let before = self.surface.input.text().to_string();
        edit(&mut self.surface.input);
        if self.surface.input.text() != before {
            self.handle_input_event(InputEvent::Input);
        }
    }

    /// Input-level listeners
    pub fn handle_input_event(&mut self, event: InputEvent) {
        if !self.subscriptions.is_attached(event) {
            trace!("PICKER: {:?} ignored, listener detached", event);
            return;
        }

        let now = self.clock.now();
        match event {
            InputEvent::Focus => self.toggle.trigger(now),
            InputEvent::MouseDown => {
                if self.surface.input_has_focus() {
                    self.toggle.trigger(now);
                }
            }
            InputEvent::Blur => self.blur.trigger(now),
            InputEvent::Input => {
                if let Some(date) = (self.options.parse)(self.surface.input.text()) {
                    self.set_state(StatePatch::hilight(date));
                }
            }
        }
    }

    /// Popup-level listeners; inactive until the popup has been created
    pub fn handle_container_event(&mut self, event: ContainerEvent) -> Propagation {
        if self.surface.popup.is_none() || !self.is_visible() {
            return Propagation::Continue;
        }

        match event {
            ContainerEvent::KeyDown(key) if key.code == KeyCode::Enter => {
                if let Focus::Cell(id) = self.surface.focus {
                    self.dispatch_click(id);
                }
                Propagation::DefaultPrevented
            }
            ContainerEvent::KeyDown(key) => {
                let view = self.state.view.handler();
                view.on_key_down(key, self);
                Propagation::Continue
            }
            ContainerEvent::MouseDown(target) => {
                let focusable = target.filter(|id| self.popup_cell(*id).is_some_and(|c| c.focusable));
                match focusable {
                    Some(id) => {
                        self.focus(Focus::Cell(id));
                        Propagation::Continue
                    }
                    None => {
                        if !matches!(self.surface.focus, Focus::Cell(_)) {
                            self.focus_current();
                        }
                        Propagation::DefaultPrevented
                    }
                }
            }
            ContainerEvent::Click(Some(id)) => {
                self.dispatch_click(id);
                Propagation::Continue
            }
            ContainerEvent::Click(None) => Propagation::Continue,
        }
    }

    fn dispatch_click(&mut self, id: CellId) {
        let Some(actions) = self.popup_cell(id).map(|c| c.actions.clone()) else {
            return;
        };
        let view = self.state.view.handler();
        for action in actions {
            trace!("PICKER: click {:?} in {} view", action, self.state.view.name());
            view.on_click(action, self);
        }
    }

    /// Earliest pending debounce deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.toggle.deadline(), self.blur.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Fire every debounced decision whose window has elapsed, oldest first
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let mut due: Vec<(Instant, Timer)> = [
            (self.toggle.deadline(), Timer::Toggle),
            (self.blur.deadline(), Timer::Blur),
        ]
        .into_iter()
        .filter_map(|(deadline, timer)| deadline.filter(|d| *d <= now).map(|d| (d, timer)))
        .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        for (_, timer) in due {
            match timer {
                Timer::Toggle => {
                    if self.toggle.fire(now) {
                        if self.should_hide() {
                            self.close(false);
                        } else {
                            self.open();
                        }
                    }
                }
                Timer::Blur => {
                    if self.blur.fire(now) && !self.has_focus() {
                        self.close(true);
                    }
                }
            }
        }
    }

    fn emit(&mut self, event: PickerEvent) {
        trace!("PICKER: emit {}", event.name());
        (self.emit)(event);
    }
}

impl std::fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePicker")
            .field("state", &self.state)
            .field("selected_date", &self.selected_date)
            .field("visible", &self.is_visible())
            .field("focus", &self.surface.focus)
            .finish_non_exhaustive()
    }
}
