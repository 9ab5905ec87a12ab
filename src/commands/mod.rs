pub mod show;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::dates;
use crate::picker::PickerOptions;

/// Parse an optional `--date` argument, defaulting to today
///
/// Accepts the configured input format first, then ISO `YYYY-MM-DD`.
pub fn parse_date_arg(date: Option<String>, options: &PickerOptions, today: NaiveDate) -> Result<NaiveDate> {
    let Some(text) = date else {
        return Ok(today);
    };
    if let Some(date) = (options.parse)(&text) {
        return Ok(date);
    }
    dates::parse_iso(&text).with_context(|| format!("Invalid --date '{}'", text))
}
