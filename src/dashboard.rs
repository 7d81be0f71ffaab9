//! Selection-to-table orchestration.
//!
//! The dashboard owns the resolved configuration, performs the one-time sync
//! of the normalized dataset and turns a query selection into a [`TableView`].
//! Every selection opens its dataset fresh and releases it before returning.

use crate::catalog::{self, Catalog, CatalogEntry, DatasetKind, TableView};
use crate::config::{Config, ConnectionConfig};
use crate::db;
use crate::error::Result;
use crate::normalize::{self, SyncReport};
use tracing::{error, info};

/// State of the startup sync of the normalized dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// The sync has not run yet.
    Pending,
    /// The derived tables were rebuilt.
    Synced(SyncReport),
    /// The sync aborted; the message is shown to the user.
    Failed(String),
}

impl SyncStatus {
    /// Status-line text for this state.
    pub fn message(&self) -> String {
        match self {
            Self::Pending => "Normalization pending".to_string(),
            Self::Synced(report) => report.summary(),
            Self::Failed(msg) => format!("Normalization failed: {msg}"),
        }
    }
}

/// Runs catalog queries against the configured datasets.
pub struct Dashboard {
    config: Config,
    sync_status: SyncStatus,
}

impl Dashboard {
    /// Creates a dashboard for the given configuration. No dataset is opened yet.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sync_status: SyncStatus::Pending,
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the outcome of the last sync.
    pub fn sync_status(&self) -> &SyncStatus {
        &self.sync_status
    }

    /// Connection settings for `dataset`.
    pub fn connection_for(&self, dataset: DatasetKind) -> ConnectionConfig {
        match dataset {
            DatasetKind::Flat => self.config.flat_connection(),
            DatasetKind::Normalized => self.config.normalized_connection(),
        }
    }

    /// Rebuilds the derived tables of the normalized dataset.
    ///
    /// Failure is recorded rather than returned so the flat catalog stays usable.
    pub async fn prepare(&mut self) -> &SyncStatus {
        let connection = self.connection_for(DatasetKind::Normalized);
        info!(
            "Normalizing derived tables in {}",
            connection.path.display()
        );

        let outcome = db::with_client(&connection, |client| {
            Box::pin(async move { normalize::sync_derived_tables(client).await })
        })
        .await;

        self.sync_status = match outcome {
            Ok(report) => SyncStatus::Synced(report),
            Err(e) => {
                error!("{}: {}", e.category(), e);
                SyncStatus::Failed(e.to_string())
            }
        };
        &self.sync_status
    }

    /// Runs the entry identified by `key` (identifier or title) from either catalog.
    pub async fn run(&self, key: &str) -> Result<TableView> {
        let (catalog, entry) = catalog::find(key)?;
        self.run_entry(catalog, entry).await
    }

    /// Runs `entry` against the dataset of `catalog`.
    pub async fn run_entry(
        &self,
        catalog: &Catalog,
        entry: &'static CatalogEntry,
    ) -> Result<TableView> {
        let connection = self.connection_for(catalog.dataset);
        let view = db::with_client(&connection, |client| {
            Box::pin(async move { entry.execute(client).await })
        })
        .await?;

        info!(
            "{} returned {} rows in {}ms",
            entry.id,
            view.row_count(),
            view.execution_time.as_millis()
        );
        Ok(view)
    }
}
