//! Database abstraction layer.
//!
//! Provides a trait-based interface over the SQLite datasets and a scoped
//! helper that opens a dataset, runs a bounded sequence of statements and
//! releases the handle on every exit path.

pub mod schema;
mod sqlite;
mod types;

pub use schema::OrderRecord;
pub use sqlite::SqliteClient;
pub use types::{QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use tracing::{debug, warn};

/// Trait defining the interface for dataset clients.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a read query and returns the results.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Executes statements in a single transaction, returning rows affected per statement.
    ///
    /// Nothing is committed if any statement fails.
    async fn execute_batch(&self, statements: &[&str]) -> Result<Vec<u64>>;

    /// Returns the column names of `table` in declaration order, empty if it does not exist.
    async fn table_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Closes the underlying connection.
    async fn close(&self) -> Result<()>;
}

/// Opens the dataset described by `config`, runs `f` against it and closes it.
///
/// The client is closed whether `f` succeeds or fails; if the future is dropped
/// early the pool is released by its own `Drop`.
pub async fn with_client<T, F>(config: &ConnectionConfig, f: F) -> Result<T>
where
    F: for<'c> FnOnce(&'c dyn DatabaseClient) -> BoxFuture<'c, Result<T>>,
{
    let client = SqliteClient::connect(config).await?;
    debug!("Opened dataset {}", config.path.display());

    let outcome = f(&client).await;

    if let Err(e) = client.close().await {
        warn!("Error closing dataset {}: {}", config.path.display(), e);
    }

    outcome
}
