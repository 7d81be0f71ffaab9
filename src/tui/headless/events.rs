//! Event DSL parser for headless mode.
//!
//! Parses event strings like "key:down", "select:yearly_revenue" or
//! "assert:contains:Revenue" into executable events.

use crate::error::{InsightsError, Result};
use crate::tui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// An assertion to check against the screen or state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// Screen contains text (case-insensitive).
    Contains(String),
    /// Screen contains text (case-sensitive).
    ContainsExact(String),
    /// Screen does not contain text.
    NotContains(String),
    /// State field equals value.
    StateEquals { field: String, value: String },
}

impl Assertion {
    /// Checks the assertion against the screen and app state.
    pub fn check(&self, screen: &str, app: &App) -> bool {
        match self {
            Self::Contains(text) => screen.to_lowercase().contains(&text.to_lowercase()),
            Self::ContainsExact(text) => screen.contains(text),
            Self::NotContains(text) => !screen.to_lowercase().contains(&text.to_lowercase()),
            Self::StateEquals { field, value } => {
                state_field(app, field).as_deref() == Some(value.as_str())
            }
        }
    }
}

/// Reads a state field by name.
fn state_field(app: &App, field: &str) -> Option<String> {
    match field {
        "active" => Some(app.active.as_str().to_string()),
        "selected" => app.selected_entry().map(|entry| entry.id.to_string()),
        "view" => app.view.as_ref().map(|view| view.id.to_string()),
        "row_count" => Some(app.view.as_ref().map_or(0, |v| v.row_count()).to_string()),
        "is_processing" => Some(app.is_processing.to_string()),
        "running" => Some(app.running.to_string()),
        _ => None,
    }
}

/// A parsed event that can be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// Highlight and run a catalog entry by identifier or title.
    Select(String),
    /// Resize the terminal.
    Resize(u16, u16),
    /// Assert something about the screen or state.
    Assert(Assertion),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => {
                let prefix = if key.modifiers.contains(KeyModifiers::CONTROL) {
                    "ctrl+"
                } else {
                    ""
                };
                write!(f, "key:{prefix}{}", key_code_to_string(&key.code))
            }
            Self::Select(key) => write!(f, "select:{key}"),
            Self::Resize(w, h) => write!(f, "resize:{w}x{h}"),
            Self::Assert(a) => match a {
                Assertion::Contains(t) => write!(f, "assert:contains:{t}"),
                Assertion::ContainsExact(t) => write!(f, "assert:contains-exact:{t}"),
                Assertion::NotContains(t) => write!(f, "assert:not-contains:{t}"),
                Assertion::StateEquals { field, value } => {
                    write!(f, "assert:state:{field}={value}")
                }
            },
        }
    }
}

fn key_code_to_string(code: &KeyCode) -> String {
    match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "backtab".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        _ => "unknown".to_string(),
    }
}

/// Parser for the event DSL.
#[derive(Debug, Default)]
pub struct EventParser;

impl EventParser {
    /// Creates a new event parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses all events from an input string.
    /// Supports comma-separated and newline-separated events; `#` starts a comment line.
    pub fn parse_all(&self, input: &str) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            for part in line.split(',') {
                let part = part.trim();
                if !part.is_empty() {
                    events.push(self.parse_one(part)?);
                }
            }
        }

        Ok(events)
    }

    /// Parses a single event string.
    pub fn parse_one(&self, input: &str) -> Result<Event> {
        let (event_type, value) = input.trim().split_once(':').ok_or_else(|| {
            InsightsError::config(format!(
                "Invalid event syntax: '{input}'. Expected format: type:value"
            ))
        })?;

        match event_type.trim().to_lowercase().as_str() {
            "key" => self.parse_key(value.trim()),
            "select" => Ok(Event::Select(value.trim().to_string())),
            "resize" => {
                let (width, height) = crate::cli::parse_size(value.trim())?;
                Ok(Event::Resize(width, height))
            }
            "assert" => self.parse_assert(value.trim()),
            other => Err(InsightsError::config(format!(
                "Unknown event type: '{other}'. Valid types: key, select, resize, assert"
            ))),
        }
    }

    /// Parses a key event like "enter" or "ctrl+c".
    fn parse_key(&self, value: &str) -> Result<Event> {
        let (modifiers, key) = match value.rsplit_once('+') {
            Some((modifier, key)) => match modifier.to_lowercase().as_str() {
                "ctrl" | "control" => (KeyModifiers::CONTROL, key),
                "shift" => (KeyModifiers::SHIFT, key),
                _ => {
                    return Err(InsightsError::config(format!(
                        "Unknown modifier: '{modifier}'. Valid modifiers: ctrl, shift"
                    )))
                }
            },
            None => (KeyModifiers::NONE, value),
        };

        Ok(Event::Key(KeyEvent::new(self.parse_key_code(key)?, modifiers)))
    }

    /// Parses a key code string into a KeyCode.
    fn parse_key_code(&self, s: &str) -> Result<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        return Err(InsightsError::config(format!(
                            "Unknown key: '{s}'. Use single characters or named keys like enter, tab, up, down"
                        )))
                    }
                }
            }
        };

        Ok(code)
    }

    /// Parses an assertion like "contains:Revenue" or "state:view=yearly_revenue".
    fn parse_assert(&self, value: &str) -> Result<Event> {
        let (assert_type, rest) = value.split_once(':').ok_or_else(|| {
            InsightsError::config(format!(
                "Invalid assertion syntax: '{value}'. Expected assert:type:value"
            ))
        })?;
        let rest = rest.trim();

        let assertion = match assert_type.trim().to_lowercase().as_str() {
            "contains" => Assertion::Contains(rest.to_string()),
            "contains-exact" => Assertion::ContainsExact(rest.to_string()),
            "not-contains" => Assertion::NotContains(rest.to_string()),
            "state" => {
                let (field, value) = rest.split_once('=').ok_or_else(|| {
                    InsightsError::config(format!(
                        "Invalid state assertion: '{rest}'. Expected field=value"
                    ))
                })?;
                Assertion::StateEquals {
                    field: field.trim().to_string(),
                    value: value.trim().to_string(),
                }
            }
            other => {
                return Err(InsightsError::config(format!(
                    "Unknown assertion type: '{other}'. Valid types: contains, contains-exact, not-contains, state"
                )))
            }
        };

        Ok(Event::Assert(assertion))
    }
}
