//! Headless date picker bound to a text input.
//!
//! [`DatePicker`] owns a [`Surface`] (input text, popup node, focus owner) and
//! reacts to input-level and popup-level events. Rendering produces
//! [`Markup`] that a front end draws; see `crate::tui` for the terminal one.

pub mod controller;
pub mod events;
pub mod markup;
pub mod options;
pub mod position;
pub mod state;
pub mod surface;
pub mod timers;
pub mod views;

#[cfg(test)]
pub mod testing;


pub use controller::DatePicker;
pub use events::{ContainerEvent, Emitter, InputEvent, PickerEvent, Propagation};
pub use markup::{Cell, CellFlags, CellId, ClickAction, Markup};
pub use options::{Lang, Mode, PickerOptions};
pub use state::{PickerState, StatePatch, View};
pub use surface::{Focus, InputElement, PopupNode, Surface};
pub use timers::{Clock, SystemClock};
