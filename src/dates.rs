//! Date helpers shared by the picker views and options.
//!
//! All dates are `chrono::NaiveDate`; the picker never deals with times or
//! time zones.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Days, NaiveDate};

use crate::error::{PickerError, PickerResult};

/// Default display/parse format (ISO 8601 calendar date)
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Parse `text` with a strftime-style format.
///
/// Surrounding whitespace is ignored. Empty or unparseable text yields `None`.
pub fn parse_date(format: &str, text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, format).ok()
}

/// Format `date` with a strftime-style format, falling back to ISO 8601
/// if the format cannot be applied to a plain date.
pub fn format_date(format: &str, date: NaiveDate) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format(DEFAULT_FORMAT));
    }
    out
}

/// Check that a format string is usable for both parsing and formatting dates
pub fn validate_format(format: &str) -> PickerResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(PickerError::InvalidFormat(format.to_string()));
    }
    // Day, month and year all differ so a format that drops one fails to round-trip
    let sample = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap_or_default();
    let mut probe = String::new();
    if write!(probe, "{}", sample.format(format)).is_err() {
        return Err(PickerError::InvalidFormat(format.to_string()));
    }
    if parse_date(format, &probe) != Some(sample) {
        return Err(PickerError::InvalidFormat(format.to_string()));
    }
    Ok(())
}

/// Parse an ISO 8601 date literal (`YYYY-MM-DD`) as used on the command line
/// and in the config file.
pub fn parse_iso(text: &str) -> PickerResult<NaiveDate> {
    parse_date(DEFAULT_FORMAT, text).ok_or_else(|| PickerError::InvalidDate(text.to_string()))
}

/// Clamp `date` into `[min, max]`
pub fn constrain(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> NaiveDate {
    if date < min {
        min
    } else if date > max {
        max
    } else {
        date
    }
}

/// Inclusive range check
pub fn in_bounds(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> bool {
    date >= min && date <= max
}

/// Number of days in the given month (1-12)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Move `date` by `n` days (saturating at chrono's supported range)
pub fn shift_day(date: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Move `date` by `n` months, clamping the day to the target month's length.
///
/// With `wrap` set the year never changes: December + 1 becomes January of
/// the same year.
pub fn shift_month(date: NaiveDate, n: i32, wrap: bool) -> NaiveDate {
    let total = date.month0() as i32 + n;
    let year = if wrap {
        date.year()
    } else {
        date.year() + total.div_euclid(12)
    };
    let month = total.rem_euclid(12) as u32 + 1;
    with_year_month(date, year, month)
}

/// Move `date` by `n` years, clamping Feb 29 to Feb 28 where needed
pub fn shift_year(date: NaiveDate, n: i32) -> NaiveDate {
    with_year_month(date, date.year() + n, date.month())
}

/// Replace the month (1-12), keeping the year and clamping the day
pub fn set_month(date: NaiveDate, month: u32) -> NaiveDate {
    with_year_month(date, date.year(), month)
}

/// Replace the year, keeping the month and clamping the day
pub fn set_year(date: NaiveDate, year: i32) -> NaiveDate {
    with_year_month(date, year, date.month())
}

fn with_year_month(date: NaiveDate, year: i32, month: u32) -> NaiveDate {
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}
