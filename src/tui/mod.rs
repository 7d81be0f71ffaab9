//! Terminal user interface for the dashboard.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
pub mod headless;
mod ui;
pub mod widgets;

pub use app::{Action, App, StatusLine};
pub use events::{Event, EventHandler};

use crate::catalog::Catalog;
use crate::dashboard::Dashboard;
use crate::error::{InsightsError, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::{debug, info};

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| InsightsError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| {
            InsightsError::internal(format!("Failed to enter alternate screen: {e}"))
        })?;

        Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| InsightsError::internal(format!("Failed to create terminal: {e}")))
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| InsightsError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
            InsightsError::internal(format!("Failed to leave alternate screen: {e}"))
        })?;

        self.terminal
            .show_cursor()
            .map_err(|e| InsightsError::internal(format!("Failed to show cursor: {e}")))
    }

    fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| InsightsError::internal(format!("Failed to draw: {e}")))?;
        Ok(())
    }

    /// Runs the event loop until the user quits.
    ///
    /// Queries run inline: the screen shows the running state, then the result.
    pub async fn run(&mut self, dashboard: &Dashboard, mut app: App) -> Result<()> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        while app.running {
            self.draw(&app)?;

            let event = self.event_handler.next()?;
            if let Action::Run { dataset, entry } = app.handle_event(event) {
                debug!("Running {} against the {} dataset", entry.id, dataset.as_str());
                self.draw(&app)?;
                match dashboard
                    .run_entry(Catalog::for_dataset(dataset), entry)
                    .await
                {
                    Err(e) if e.is_fatal() => return Err(e),
                    outcome => app.finish_query(outcome),
                }
            }
        }

        let _ = panic::take_hook();
        info!("Dashboard closed");
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Builds the initial app state for `dashboard`.
pub fn initial_app(dashboard: &Dashboard) -> App {
    let config = dashboard.config();
    let info = format!(
        "{} | {}",
        config.flat_connection().display_string(),
        config.normalized_connection().display_string()
    );
    let mut app = App::new(Some(info));
    app.set_status(StatusLine::from_sync(dashboard.sync_status()));
    app
}

/// Runs the interactive dashboard on the real terminal.
pub async fn run(dashboard: &Dashboard) -> Result<()> {
    let app = initial_app(dashboard);
    let mut tui = Tui::new()?;
    tui.run(dashboard, app).await
}
