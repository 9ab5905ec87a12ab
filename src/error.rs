use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building picker options from configuration or CLI input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("Invalid date range: min {min} is after max {max}")]
    InvalidRange { min: NaiveDate, max: NaiveDate },

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid date format string '{0}'")]
    InvalidFormat(String),

    #[error("Invalid day offset {0} (expected 0-6)")]
    InvalidDayOffset(u8),
}

/// Result type for picker configuration
pub type PickerResult<T> = Result<T, PickerError>;
