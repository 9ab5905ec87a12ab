use std::collections::HashSet;

use crossterm::event::KeyEvent;

use super::markup::CellId;

/// Notifications emitted by the picker; the name is the whole payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerEvent {
    Open,
    Close,
    Select,
    StateChange,
}

impl PickerEvent {
    pub fn name(self) -> &'static str {
        match self {
            PickerEvent::Open => "open",
            PickerEvent::Close => "close",
            PickerEvent::Select => "select",
            PickerEvent::StateChange => "statechange",
        }
    }
}

/// Callback receiving every [`PickerEvent`]
pub type Emitter = Box<dyn FnMut(PickerEvent)>;

/// Events delivered to the listeners on the bound input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Focus,
    Blur,
    MouseDown,
    /// The input's text was edited by the user
    Input,
}

/// Events delivered to the listeners on the popup root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEvent {
    KeyDown(KeyEvent),
    /// Button pressed over the popup; `None` when not over a cell
    MouseDown(Option<CellId>),
    Click(Option<CellId>),
}

/// Whether the picker handled the default behaviour of an event itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    DefaultPrevented,
}

/// Set of active input-level listeners
///
/// Attached once at construction; `detach_all` is the single teardown path.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    active: HashSet<InputEvent>,
}

impl Subscriptions {
    pub fn attach(&mut self, events: &[InputEvent]) {
        self.active.extend(events.iter().copied());
    }

    pub fn is_attached(&self, event: InputEvent) -> bool {
        self.active.contains(&event)
    }

    pub fn detach_all(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
