pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod picker;
pub mod tui;

pub use error::{PickerError, PickerResult};
pub use picker::{DatePicker, PickerEvent, PickerOptions};
