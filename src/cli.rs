//! Command-line argument parsing.

use crate::error::{InsightsError, Result};
use clap::Parser;
use std::path::PathBuf;

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output of the final screen.
    #[default]
    Text,
    /// JSON output with screen, state, and the current table.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Terminal dashboard for retail order analytics.
#[derive(Parser, Debug)]
#[command(name = "retail-insights")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite file holding the flat orders table
    #[arg(long, value_name = "PATH", env = "RETAIL_FLAT_DB")]
    pub flat_db: Option<PathBuf>,

    /// SQLite file that receives the normalized tables
    #[arg(long, value_name = "PATH", env = "RETAIL_NORMALIZED_DB")]
    pub normalized_db: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the query catalogs and exit
    #[arg(long)]
    pub list: bool,

    // === Headless mode options ===
    /// Run without a terminal UI, executing scripted events
    #[arg(long)]
    pub headless: bool,

    /// Comma-separated events for headless mode (e.g., "key:down,key:enter")
    #[arg(long, value_name = "EVENTS")]
    pub events: Option<String>,

    /// Screen size for headless mode (WIDTHxHEIGHT)
    #[arg(long, value_name = "SIZE", default_value = "120x40")]
    pub size: String,

    /// Output format for headless mode
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Parses the screen size from the --size argument.
    pub fn parse_screen_size(&self) -> Result<(u16, u16)> {
        parse_size(&self.size)
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> Result<OutputFormat> {
        self.output.parse().map_err(InsightsError::config)
    }

    /// Validates headless mode arguments.
    pub fn validate_headless(&self) -> Result<()> {
        if !self.headless {
            return Ok(());
        }
        if self.events.is_none() {
            return Err(InsightsError::config("--headless requires --events"));
        }
        self.parse_screen_size()?;
        self.parse_output_format()?;
        Ok(())
    }
}

/// Parses `WIDTHxHEIGHT`.
pub fn parse_size(size: &str) -> Result<(u16, u16)> {
    let (width, height) = size.split_once('x').ok_or_else(|| {
        InsightsError::config(format!(
            "Invalid size format: '{size}'. Expected WIDTHxHEIGHT (e.g., 120x40)"
        ))
    })?;
    let width = width
        .parse::<u16>()
        .map_err(|_| InsightsError::config(format!("Invalid width: '{width}'")))?;
    let height = height
        .parse::<u16>()
        .map_err(|_| InsightsError::config(format!("Invalid height: '{height}'")))?;
    Ok((width, height))
}
