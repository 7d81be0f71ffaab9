//! Configuration management for retail-insights.
//!
//! Handles loading configuration from a TOML file, with dataset locations and
//! query execution limits.

use crate::error::{InsightsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Locations of the two datasets.
    #[serde(default)]
    pub datasets: DatasetsConfig,

    /// Query execution limits shared by both datasets.
    #[serde(default)]
    pub query: QueryConfig,
}

/// Locations of the flat and normalized SQLite datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetsConfig {
    /// Dataset holding the flat `orders` table (read-only).
    #[serde(default = "default_flat_path")]
    pub flat: PathBuf,

    /// Dataset that receives the derived `product_details` and `customer_details` tables.
    #[serde(default = "default_normalized_path")]
    pub normalized: PathBuf,
}

fn default_flat_path() -> PathBuf {
    PathBuf::from("orders.db")
}

fn default_normalized_path() -> PathBuf {
    PathBuf::from("orders_normalized.db")
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            flat: default_flat_path(),
            normalized: default_normalized_path(),
        }
    }
}

/// Query execution limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Per-statement timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum rows kept from a single result set.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_rows() -> usize {
    1000
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_rows: default_max_rows(),
        }
    }
}

/// How a dataset is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Open an existing file without write access.
    #[default]
    ReadOnly,
    /// Open for writing, creating the file if it does not exist.
    ReadWrite,
}

/// Everything needed to open one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Path to the SQLite file.
    pub path: PathBuf,

    /// Access mode used when opening.
    pub mode: AccessMode,

    /// Limits applied to statements run on this connection.
    pub query: QueryConfig,
}

impl ConnectionConfig {
    /// Creates a connection config for the given path and mode with default limits.
    pub fn new(path: impl Into<PathBuf>, mode: AccessMode) -> Self {
        Self {
            path: path.into(),
            mode,
            query: QueryConfig::default(),
        }
    }

    /// Sets the query limits.
    pub fn with_query_config(mut self, query: QueryConfig) -> Self {
        self.query = query;
        self
    }

    /// Returns a short string for UI purposes (the file name).
    pub fn display_string(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("retail-insights")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file, falling back to defaults when absent.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| InsightsError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            InsightsError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects limits that would make every query fail.
    pub fn validate(&self) -> Result<()> {
        if self.query.timeout_secs == 0 {
            return Err(InsightsError::config("query.timeout_secs must be positive"));
        }
        if self.query.max_rows == 0 {
            return Err(InsightsError::config("query.max_rows must be positive"));
        }
        Ok(())
    }

    /// Overrides dataset locations with values given on the command line.
    pub fn apply_overrides(&mut self, flat: Option<&Path>, normalized: Option<&Path>) {
        if let Some(path) = flat {
            self.datasets.flat = path.to_path_buf();
        }
        if let Some(path) = normalized {
            self.datasets.normalized = path.to_path_buf();
        }
    }

    /// Connection settings for the flat dataset.
    pub fn flat_connection(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.datasets.flat, AccessMode::ReadOnly)
            .with_query_config(self.query)
    }

    /// Connection settings for the normalized dataset.
    pub fn normalized_connection(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.datasets.normalized, AccessMode::ReadWrite)
            .with_query_config(self.query)
    }
}
