use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::{LangConfig, PickerConfig};
use crate::dates::{self, DEFAULT_FORMAT};
use crate::error::{PickerError, PickerResult};

/// Years either side of today used when no explicit bound is configured
const DEFAULT_RANGE_YEARS: i32 = 100;

/// How the popup is placed relative to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Dropdown anchored below (or above) the input; focus stays in the input
    #[default]
    Below,
    /// Centered overlay that takes keyboard focus when rendered
    Modal,
}

impl Mode {
    /// Class name of the popup root
    pub fn class_name(self) -> &'static str {
        match self {
            Mode::Below => "dp-below",
            Mode::Modal => "dp-modal",
        }
    }

    fn focuses_on_blur(self) -> bool {
        matches!(self, Mode::Modal)
    }
}

/// Calendar labels
#[derive(Debug, Clone, PartialEq)]
pub struct Lang {
    pub days: [String; 7],
    pub months: [String; 12],
    pub today: String,
    pub clear: String,
    pub close: String,
}

impl Lang {
    /// Build labels from config, keeping defaults for malformed day/month tables
    pub fn from_config(lang: &LangConfig) -> Self {
        let defaults = LangConfig::default();
        let days = <[String; 7]>::try_from(lang.days.clone()).unwrap_or_else(|_| {
            tracing::warn!("Expected 7 day names, got {}; using defaults", lang.days.len());
            <[String; 7]>::try_from(defaults.days.clone()).unwrap_or_default()
        });
        let months = <[String; 12]>::try_from(lang.months.clone()).unwrap_or_else(|_| {
            tracing::warn!("Expected 12 month names, got {}; using defaults", lang.months.len());
            <[String; 12]>::try_from(defaults.months.clone()).unwrap_or_default()
        });
        Self {
            days,
            months,
            today: lang.today.clone(),
            clear: lang.clear.clone(),
            close: lang.close.clone(),
        }
    }

    /// Name of a month (1-12)
    pub fn month_name(&self, month: u32) -> &str {
        self.months
            .get(month.saturating_sub(1) as usize)
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Default for Lang {
    fn default() -> Self {
        Self::from_config(&LangConfig::default())
    }
}

type FormatFn = Box<dyn Fn(NaiveDate) -> String>;
type ParseFn = Box<dyn Fn(&str) -> Option<NaiveDate>>;
type RangeFn = Box<dyn Fn(NaiveDate) -> bool>;

/// Construction-time configuration of a [`DatePicker`](super::DatePicker)
///
/// `format`, `parse` and `in_range` are replaceable callbacks; the defaults
/// use the configured strftime format and accept every date within
/// `[min, max]`.
pub struct PickerOptions {
    pub format: FormatFn,
    pub parse: ParseFn,
    pub in_range: RangeFn,
    pub min: NaiveDate,
    pub max: NaiveDate,
    /// Highlighted when the input holds no valid date
    pub hilighted_date: NaiveDate,
    pub mode: Mode,
    pub lang: Lang,
    /// First column of the week, 0 = Sunday
    pub day_offset: u32,
    pub should_focus_on_blur: bool,
    /// `None` follows the mode: a modal always takes focus, a dropdown only
    /// when the input is not focused
    pub should_focus_on_render: Option<bool>,
    /// Blur the input right after returning focus to it (virtual keyboard hosts)
    pub touch_workaround: bool,
}

impl std::fmt::Debug for PickerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerOptions")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("hilighted_date", &self.hilighted_date)
            .field("mode", &self.mode)
            .field("day_offset", &self.day_offset)
            .field("should_focus_on_blur", &self.should_focus_on_blur)
            .field("should_focus_on_render", &self.should_focus_on_render)
            .field("touch_workaround", &self.touch_workaround)
            .finish_non_exhaustive()
    }
}

impl PickerOptions {
    /// Default options relative to `today`: ISO format, ±100 years, dropdown mode
    pub fn new(today: NaiveDate) -> Self {
        let mode = Mode::default();
        Self {
            format: Box::new(|d| dates::format_date(DEFAULT_FORMAT, d)),
            parse: Box::new(|s| dates::parse_date(DEFAULT_FORMAT, s)),
            in_range: Box::new(|_| true),
            min: dates::shift_year(today, -DEFAULT_RANGE_YEARS),
            max: dates::shift_year(today, DEFAULT_RANGE_YEARS),
            hilighted_date: today,
            mode,
            lang: Lang::default(),
            day_offset: 0,
            should_focus_on_blur: mode.focuses_on_blur(),
            should_focus_on_render: None,
            touch_workaround: false,
        }
    }

    /// Build options from the `[picker]` config table
    pub fn from_config(config: &PickerConfig, today: NaiveDate) -> PickerResult<Self> {
        dates::validate_format(&config.format)?;
        if config.day_offset > 6 {
            return Err(PickerError::InvalidDayOffset(config.day_offset));
        }

        let defaults = Self::new(today);
        let min = config.min.unwrap_or(defaults.min);
        let max = config.max.unwrap_or(defaults.max);
        if min > max {
            return Err(PickerError::InvalidRange { min, max });
        }

        let format = config.format.clone();
        let parse_format = config.format.clone();
        Ok(Self {
            format: Box::new(move |d| dates::format_date(&format, d)),
            parse: Box::new(move |s| dates::parse_date(&parse_format, s)),
            min,
            max,
            hilighted_date: dates::constrain(config.hilighted_date.unwrap_or(today), min, max),
            mode: config.mode,
            lang: Lang::from_config(&config.lang),
            day_offset: u32::from(config.day_offset),
            should_focus_on_blur: config
                .should_focus_on_blur
                .unwrap_or_else(|| config.mode.focuses_on_blur()),
            should_focus_on_render: config.should_focus_on_render,
            touch_workaround: config.touch_workaround,
            ..defaults
        })
    }

    pub fn with_range(mut self, min: NaiveDate, max: NaiveDate) -> Self {
        self.min = min;
        self.max = max;
        self.hilighted_date = dates::constrain(self.hilighted_date, min, max);
        self
    }

    /// Switch placement mode, resetting both focus policies to the mode's defaults
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self.should_focus_on_blur = mode.focuses_on_blur();
        self.should_focus_on_render = None;
        self
    }

    pub fn with_format(mut self, format: impl Fn(NaiveDate) -> String + 'static) -> Self {
        self.format = Box::new(format);
        self
    }

    pub fn with_parse(mut self, parse: impl Fn(&str) -> Option<NaiveDate> + 'static) -> Self {
        self.parse = Box::new(parse);
        self
    }

    pub fn with_in_range(mut self, in_range: impl Fn(NaiveDate) -> bool + 'static) -> Self {
        self.in_range = Box::new(in_range);
        self
    }

    pub fn with_hilighted_date(mut self, date: NaiveDate) -> Self {
        self.hilighted_date = date;
        self
    }

    /// Whether `date` may be selected: inside `[min, max]` and accepted by `in_range`
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        dates::in_bounds(date, self.min, self.max) && (self.in_range)(date)
    }
}
