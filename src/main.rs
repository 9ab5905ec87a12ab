use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use datepick::picker::{Mode, PickerOptions};
use datepick::{commands, config, dates, tui};

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "datepick")]
#[command(about = "Terminal date picker", long_about = "Terminal date picker\n\nIf no command is specified, the program starts in interactive mode.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// strftime-style format of the date text (overrides config)
    #[arg(long, global = true)]
    format: Option<String>,

    /// Earliest selectable date, YYYY-MM-DD (overrides config)
    #[arg(long, global = true)]
    min: Option<String>,

    /// Latest selectable date, YYYY-MM-DD (overrides config)
    #[arg(long, global = true)]
    max: Option<String>,

    /// Popup placement (overrides config)
    #[arg(long, global = true)]
    mode: Option<CliMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliMode {
    /// Dropdown under the date field
    Below,
    /// Centered over the screen
    Modal,
}

impl CliMode {
    fn to_mode(self) -> Mode {
        match self {
            CliMode::Below => Mode::Below,
            CliMode::Modal => Mode::Modal,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the calendar for a date
    Show {
        /// Date in the configured format or YYYY-MM-DD (optional, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Fold picker-related CLI flags into the `[picker]` config table
fn apply_picker_overrides(cli: &Cli, config: &mut config::Config) -> Result<()> {
    let picker = &mut config.picker;
    if let Some(format) = &cli.format {
        picker.format = format.clone();
    }
    if let Some(min) = &cli.min {
        picker.min = Some(dates::parse_iso(min)?);
    }
    if let Some(max) = &cli.max {
        picker.max = Some(dates::parse_iso(max)?);
    }
    if let Some(mode) = cli.mode {
        picker.mode = mode.to_mode();
    }
    Ok(())
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &config::Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    let show_date = |d: Option<chrono::NaiveDate>| d.map_or("(default)".to_string(), |d| d.to_string());
    let show_flag = |b: Option<bool>| b.map_or("(mode default)".to_string(), |b| b.to_string());

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!();
    println!("[picker]");
    println!("format: {}", cfg.picker.format);
    println!("min: {}", show_date(cfg.picker.min));
    println!("max: {}", show_date(cfg.picker.max));
    println!("hilighted_date: {}", show_date(cfg.picker.hilighted_date));
    println!("mode: {:?}", cfg.picker.mode);
    println!("day_offset: {}", cfg.picker.day_offset);
    println!("should_focus_on_blur: {}", show_flag(cfg.picker.should_focus_on_blur));
    println!("should_focus_on_render: {}", show_flag(cfg.picker.should_focus_on_render));
    println!("touch_workaround: {}", cfg.picker.touch_workaround);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("unfocused_selection_fg: {:?}{}",
        cfg.theme.unfocused_selection_fg(),
        if cfg.theme.unfocused_selection_fg.is_none() { " (auto: 50% darker)" } else { "" }
    );
    println!("today_fg: {:?}", cfg.theme.today_fg);
    println!("disabled_fg: {:?}", cfg.theme.disabled_fg);
    println!("edge_fg: {:?}", cfg.theme.edge_fg);
    println!("border_fg: {:?}", cfg.theme.border_fg);
}

/// Build options and run the selected mode
fn execute(cli: &Cli, config: config::Config) -> Result<()> {
    let today = Local::now().date_naive();
    let options = PickerOptions::from_config(&config.picker, today)?;
    tracing::debug!("Picker options: {:?}", options);

    match &cli.command {
        None => {
            tui::run(options, config.theme)?;
            Ok(())
        }
        Some(Commands::Show { date }) => commands::show::run(date.clone(), options),
        Some(Commands::Config) => unreachable!("Config command should be handled before execute"),
    }
}

fn main() {
    let mut config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    if let Err(e) = apply_picker_overrides(&cli, &mut config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(2);
    }

    // Handle Config command separately (doesn't need a picker)
    if let Some(Commands::Config) = cli.command {
        handle_config_command(&config);
        return;
    }

    if let Err(e) = execute(&cli, config) {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
