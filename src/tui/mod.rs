// Module declarations
pub mod app;
pub mod keys;
pub mod widgets;

#[cfg(test)]
pub mod testing;

pub use app::{App, Field};
pub use keys::handle_event;

use std::io;
use std::rc::Rc;
use std::time::Instant;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use crate::config::ThemeConfig;
use crate::picker::{PickerOptions, SystemClock};

/// Main entry point for TUI mode
pub fn run(options: PickerOptions, theme: ThemeConfig) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(options, theme, Rc::new(SystemClock), "");
    app.focus_field(Some(Field::Date));

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Draw, wait for input no longer than the picker's next deadline, route it,
/// then fire due timers
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), io::Error> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            handle_event(app, event::read()?);
        }
        app.tick();

        if app.should_quit {
            tracing::debug!("LOOP: quitting");
            break;
        }
    }
    Ok(())
}
