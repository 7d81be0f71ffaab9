//! Application state for the TUI.
//!
//! Holds the catalog selection, the last rendered table and the status line.
//! Key handling is pure state manipulation; running a query is requested
//! through [`Action::Run`] and completed with [`App::finish_query`].

use super::Event;
use crate::catalog::{self, Catalog, CatalogEntry, DatasetKind, TableView};
use crate::dashboard::SyncStatus;
use crate::error::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Work the runner must perform after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do beyond redrawing.
    None,
    /// Execute `entry` against the dataset of `dataset`.
    Run {
        dataset: DatasetKind,
        entry: &'static CatalogEntry,
    },
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Single-line message shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// Startup message describing the normalization outcome.
    pub fn from_sync(status: &SyncStatus) -> Self {
        match status {
            SyncStatus::Failed(_) => Self::error(status.message()),
            _ => Self::info(status.message()),
        }
    }
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Catalog whose list has focus.
    pub active: DatasetKind,
    /// Highlighted entry index in the flat catalog.
    pub flat_selected: usize,
    /// Highlighted entry index in the normalized catalog.
    pub normalized_selected: usize,
    /// Most recent successful result.
    pub view: Option<TableView>,
    /// Rows scrolled past in the result pane.
    pub results_scroll: usize,
    /// Status line contents.
    pub status: StatusLine,
    /// Whether a query is executing.
    pub is_processing: bool,
    /// Dataset names for the header.
    pub dataset_info: Option<String>,
}

impl App {
    /// Creates a new App instance.
    pub fn new(dataset_info: Option<String>) -> Self {
        Self {
            running: true,
            active: DatasetKind::Flat,
            flat_selected: 0,
            normalized_selected: 0,
            view: None,
            results_scroll: 0,
            status: StatusLine::info("Select a query and press Enter"),
            is_processing: false,
            dataset_info,
        }
    }

    /// Returns the catalog that currently has focus.
    pub fn active_catalog(&self) -> &'static Catalog {
        Catalog::for_dataset(self.active)
    }

    /// Returns the highlighted index for `dataset`.
    pub fn selected_index(&self, dataset: DatasetKind) -> usize {
        match dataset {
            DatasetKind::Flat => self.flat_selected,
            DatasetKind::Normalized => self.normalized_selected,
        }
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match self.active {
            DatasetKind::Flat => &mut self.flat_selected,
            DatasetKind::Normalized => &mut self.normalized_selected,
        }
    }

    /// Returns the highlighted entry of the active catalog.
    pub fn selected_entry(&self) -> Option<&'static CatalogEntry> {
        self.active_catalog()
            .entry(self.selected_index(self.active))
    }

    /// Handles an event and returns the follow-up work.
    pub fn handle_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(_, _) | Event::Tick => Action::None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.is_processing {
            return Action::None;
        }

        let len = self.active_catalog().len();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.active = match self.active {
                    DatasetKind::Flat => DatasetKind::Normalized,
                    DatasetKind::Normalized => DatasetKind::Flat,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = self.selected_index_mut();
                *selected = selected.checked_sub(1).unwrap_or(len.saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let selected = self.selected_index_mut();
                *selected = if *selected + 1 >= len { 0 } else { *selected + 1 };
            }
            KeyCode::PageUp => {
                self.results_scroll = self.results_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                let max = self.view.as_ref().map_or(0, |v| v.row_count().saturating_sub(1));
                self.results_scroll = (self.results_scroll + 10).min(max);
            }
            KeyCode::Enter => {
                if let Some(entry) = self.selected_entry() {
                    return self.begin_query(entry);
                }
            }
            _ => {}
        }
        Action::None
    }

    /// Highlights the entry named `key` in its catalog and requests its execution.
    pub fn select(&mut self, key: &str) -> Result<Action> {
        let (catalog, entry) = catalog::find(key)?;
        let index = catalog
            .entries
            .iter()
            .position(|candidate| candidate == entry)
            .unwrap_or_default();

        self.active = catalog.dataset;
        *self.selected_index_mut() = index;
        Ok(self.begin_query(entry))
    }

    fn begin_query(&mut self, entry: &'static CatalogEntry) -> Action {
        self.is_processing = true;
        self.status = StatusLine::info(format!("Running {}...", entry.title));
        Action::Run {
            dataset: self.active,
            entry,
        }
    }

    /// Records the outcome of a query started with [`Action::Run`].
    ///
    /// A failure leaves the previous table on screen and reports the error.
    pub fn finish_query(&mut self, outcome: Result<TableView>) {
        self.is_processing = false;
        match outcome {
            Ok(view) => {
                let rows = view.row_count();
                let mut text = format!(
                    "{} row{} returned ({}ms)",
                    rows,
                    if rows == 1 { "" } else { "s" },
                    view.execution_time.as_millis()
                );
                if let Some(warning) = &view.truncation_warning {
                    text.push_str(" | ");
                    text.push_str(warning);
                }
                self.status = StatusLine::info(text);
                self.results_scroll = 0;
                self.view = Some(view);
            }
            Err(e) => {
                self.status = StatusLine::error(e.to_string());
            }
        }
    }

    /// Shows a startup message, such as the normalization outcome.
    pub fn set_status(&mut self, status: StatusLine) {
        self.status = status;
    }
}
