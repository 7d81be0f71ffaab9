//! Headless mode for scripted runs and automated checks.
//!
//! Drives the same [`App`] and layout as the terminal UI against an in-memory
//! backend, executing scripted events and capturing the final screen.

mod events;
mod output;

pub use events::{Assertion, Event, EventParser};
pub use output::{HeadlessOutput, ScreenRenderer};

use crate::catalog::{Catalog, TableView};
use crate::cli::{Cli, OutputFormat};
use crate::dashboard::Dashboard;
use crate::error::{InsightsError, Result};
use crate::tui::app::{Action, App, StatusLine};
use crate::tui::ui;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Configuration for headless mode execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessConfig {
    /// Screen width in columns.
    pub width: u16,
    /// Screen height in rows.
    pub height: u16,
    /// Output format.
    pub output_format: OutputFormat,
}

impl HeadlessConfig {
    /// Creates a HeadlessConfig from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (width, height) = cli.parse_screen_size()?;
        Ok(Self {
            width,
            height,
            output_format: cli.parse_output_format()?,
        })
    }
}

/// Result of headless execution.
#[derive(Debug)]
pub struct HeadlessResult {
    /// Final screen content as text.
    pub screen: String,
    /// Number of events executed.
    pub events_executed: usize,
    /// Total execution duration.
    pub duration: Duration,
    /// Number of assertions passed.
    pub assertions_passed: usize,
    /// Number of assertions failed.
    pub assertions_failed: usize,
    /// Application state snapshot.
    pub state: HeadlessState,
    /// The table on screen when the script ended.
    pub table: Option<TableView>,
}

/// Snapshot of application state for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessState {
    /// Catalog with focus.
    pub active: String,
    /// Highlighted entry identifier.
    pub selected: Option<String>,
    /// Whether a query is executing.
    pub is_processing: bool,
    /// Whether the app is still running.
    pub running: bool,
    /// Status line text.
    pub status: String,
}

impl HeadlessState {
    fn from_app(app: &App) -> Self {
        Self {
            active: app.active.as_str().to_string(),
            selected: app.selected_entry().map(|entry| entry.id.to_string()),
            is_processing: app.is_processing,
            running: app.running,
            status: app.status.text.clone(),
        }
    }
}

/// Runs the dashboard without a terminal.
pub struct HeadlessRunner<'a> {
    dashboard: &'a Dashboard,
    terminal: Terminal<TestBackend>,
    app: App,
    events: Vec<Event>,
    assertions_passed: usize,
    assertions_failed: usize,
}

impl<'a> HeadlessRunner<'a> {
    /// Creates a runner with a `width` x `height` screen.
    pub fn new(dashboard: &'a Dashboard, app: App, width: u16, height: u16) -> Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height)).map_err(|e| {
            InsightsError::internal(format!("Failed to create test terminal: {e}"))
        })?;

        Ok(Self {
            dashboard,
            terminal,
            app,
            events: Vec::new(),
            assertions_passed: 0,
            assertions_failed: 0,
        })
    }

    /// Loads events from a string (comma-separated or newline-separated).
    pub fn load_events(&mut self, input: &str) -> Result<()> {
        self.events = EventParser::new().parse_all(input)?;
        Ok(())
    }

    /// Executes the loaded events and returns the final state.
    pub async fn run(mut self) -> Result<HeadlessResult> {
        let start_time = Instant::now();
        self.render()?;

        let events = std::mem::take(&mut self.events);
        let mut events_executed = 0;

        for event in events {
            debug!("Headless event: {}", event);
            match event {
                Event::Key(key) => {
                    let action = self.app.handle_event(crate::tui::Event::Key(key));
                    self.perform(action).await?;
                }
                Event::Select(key) => match self.app.select(&key) {
                    Ok(action) => self.perform(action).await?,
                    Err(e) => self.app.set_status(StatusLine::error(e.to_string())),
                },
                Event::Resize(width, height) => {
                    self.terminal
                        .resize(Rect::new(0, 0, width, height))
                        .map_err(|e| InsightsError::internal(format!("Resize failed: {e}")))?;
                }
                Event::Assert(assertion) => {
                    let screen = ScreenRenderer::render(self.terminal.backend().buffer());
                    if assertion.check(&screen, &self.app) {
                        self.assertions_passed += 1;
                    } else {
                        warn!("Assertion failed: {}", Event::Assert(assertion));
                        self.assertions_failed += 1;
                    }
                }
            }

            events_executed += 1;
            self.render()?;

            if !self.app.running {
                break;
            }
        }

        Ok(HeadlessResult {
            screen: ScreenRenderer::render(self.terminal.backend().buffer()),
            events_executed,
            duration: start_time.elapsed(),
            assertions_passed: self.assertions_passed,
            assertions_failed: self.assertions_failed,
            state: HeadlessState::from_app(&self.app),
            table: self.app.view.take(),
        })
    }

    async fn perform(&mut self, action: Action) -> Result<()> {
        if let Action::Run { dataset, entry } = action {
            match self
                .dashboard
                .run_entry(Catalog::for_dataset(dataset), entry)
                .await
            {
                Err(e) if e.is_fatal() => return Err(e),
                outcome => self.app.finish_query(outcome),
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let app = &self.app;
        self.terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| InsightsError::internal(format!("Failed to render: {e}")))?;
        Ok(())
    }
}

/// Runs headless mode from CLI arguments and returns the process exit code.
pub async fn run_headless(cli: &Cli, dashboard: &Dashboard) -> Result<i32> {
    let config = HeadlessConfig::from_cli(cli)?;

    let app = crate::tui::initial_app(dashboard);
    let mut runner = HeadlessRunner::new(dashboard, app, config.width, config.height)?;
    if let Some(events) = &cli.events {
        runner.load_events(events)?;
    }

    let result = runner.run().await?;
    print!("{}", HeadlessOutput::new(config.output_format).format(&result));

    Ok(if result.assertions_failed > 0 { 1 } else { 0 })
}
