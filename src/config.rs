use chrono::NaiveDate;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

use crate::dates::DEFAULT_FORMAT;
use crate::picker::Mode;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub picker: PickerConfig,
    pub theme: ThemeConfig,
}

/// Picker behaviour as read from the `[picker]` table
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PickerConfig {
    /// strftime-style format used to write and parse the input text
    pub format: String,
    /// Earliest selectable date (default: 100 years before today)
    pub min: Option<NaiveDate>,
    /// Latest selectable date (default: 100 years after today)
    pub max: Option<NaiveDate>,
    /// Date highlighted when the input holds no valid date (default: today)
    pub hilighted_date: Option<NaiveDate>,
    pub mode: Mode,
    /// First column of the week, 0 = Sunday
    pub day_offset: u8,
    /// Overrides the mode's default
    pub should_focus_on_blur: Option<bool>,
    /// Overrides the mode's default
    pub should_focus_on_render: Option<bool>,
    pub touch_workaround: bool,
    pub lang: LangConfig,
}

/// Labels shown by the calendar
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LangConfig {
    pub days: Vec<String>,
    pub months: Vec<String>,
    pub today: String,
    pub clear: String,
    pub close: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfocused_selection_fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub today_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub disabled_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub edge_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub border_fg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            picker: PickerConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            format: DEFAULT_FORMAT.to_string(),
            min: None,
            max: None,
            hilighted_date: None,
            mode: Mode::default(),
            day_offset: 0,
            should_focus_on_blur: None,
            should_focus_on_render: None,
            touch_workaround: false,
            lang: LangConfig::default(),
        }
    }
}

impl Default for LangConfig {
    fn default() -> Self {
        let to_strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        LangConfig {
            days: to_strings(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            months: to_strings(&[
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]),
            today: "Today".to_string(),
            clear: "Clear".to_string(),
            close: "Close".to_string(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            unfocused_selection_fg: None,
            today_fg: Color::Cyan,
            disabled_fg: Color::DarkGray,
            edge_fg: Color::Gray,
            border_fg: Color::White,
        }
    }
}

impl ThemeConfig {
    /// Get the unfocused selection color, calculating 50% darker if not explicitly set
    pub fn unfocused_selection_fg(&self) -> Color {
        self.unfocused_selection_fg.unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * factor) as u8;
            let g = (g as f32 * factor) as u8;
            let b = (b as f32 * factor) as u8;
            Color::Rgb(r, g, b)
        }
        other => other,
    }
}

/// Deserialize a color from a string (supports named colors, RGB hex, or RGB tuple)
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Deserialize an optional color from a string
fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(color_str) => {
            let color = parse_color(&color_str)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))?;
            Ok(Some(color))
        }
        None => Ok(None),
    }
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            return Config::default();
        }
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid config {}: {}", config_path.display(), e);
        Config::default()
    })
}
