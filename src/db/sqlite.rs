//! SQLite client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient` trait
//! for dataset files using sqlx.

use crate::config::{AccessMode, ConnectionConfig, QueryConfig};
use crate::db::schema::{OrderRecord, ORDER_COLUMNS};
use crate::db::{DatabaseClient, QueryResult, Row, Value};
use crate::error::{InsightsError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Executor, Row as SqlxRow, TypeInfo, ValueRef};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// SQLite dataset client.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
    limits: QueryConfig,
}

impl SqliteClient {
    /// Opens the dataset described by `config`.
    ///
    /// Read-only datasets must already exist; read-write datasets are created on demand.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let writable = config.mode == AccessMode::ReadWrite;
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(!writable)
            .create_if_missing(writable)
            .foreign_keys(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| {
                InsightsError::connection(format!(
                    "Failed to open {}: {e}",
                    config.path.display()
                ))
            })?;

        debug!(
            "Connected to {} ({:?})",
            config.path.display(),
            config.mode
        );

        Ok(Self {
            pool,
            limits: config.query,
        })
    }

    /// Creates a client from an existing pool.
    ///
    /// This is primarily useful for testing against in-memory databases.
    pub fn from_pool(pool: SqlitePool, limits: QueryConfig) -> Self {
        Self { pool, limits }
    }

    /// Inserts order records into the flat `orders` table in one transaction.
    ///
    /// The dashboard never writes to the flat table itself; this is used to
    /// seed datasets.
    pub async fn insert_orders(&self, records: &[OrderRecord]) -> Result<u64> {
        let placeholders = vec!["?"; ORDER_COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO orders ({}) VALUES ({placeholders})",
            ORDER_COLUMNS.join(", ")
        );

        let mut tx = self.pool.begin().await.map_err(query_error)?;
        let mut inserted = 0;

        for record in records {
            let done = sqlx::query(&sql)
                .bind(record.order_id)
                .bind(&record.order_date)
                .bind(&record.ship_mode)
                .bind(&record.segment)
                .bind(&record.country)
                .bind(&record.city)
                .bind(&record.state)
                .bind(&record.postal_code)
                .bind(&record.region)
                .bind(&record.category)
                .bind(&record.sub_category)
                .bind(&record.product_id)
                .bind(record.cost_price)
                .bind(record.list_price)
                .bind(record.quantity)
                .bind(record.discount_percent)
                .bind(record.discount)
                .bind(record.sale_price)
                .bind(record.profit)
                .execute(&mut *tx)
                .await
                .map_err(query_error)?;
            inserted += done.rows_affected();
        }

        tx.commit().await.map_err(query_error)?;
        Ok(inserted)
    }

    /// Runs `fut` under the configured statement timeout.
    async fn timed<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        let secs = self.limits.timeout_secs;
        tokio::time::timeout(Duration::from_secs(secs), fut)
            .await
            .map_err(|_| InsightsError::query(format!("Query timed out after {secs} seconds")))?
            .map_err(query_error)
    }

    /// Fetches column names for a statement without rows to read them from.
    async fn describe_columns(&self, sql: &str) -> Vec<String> {
        match (&self.pool).describe(sql).await {
            Ok(described) => described
                .columns()
                .iter()
                .map(|col| col.name().to_string())
                .collect(),
            Err(e) => {
                debug!("Could not describe statement: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();
        let fetched = self.timed(sqlx::query(sql).fetch_all(&self.pool)).await?;
        let execution_time = start.elapsed();

        let columns = match fetched.first() {
            Some(first) => first
                .columns()
                .iter()
                .map(|col| col.name().to_string())
                .collect(),
            None => self.describe_columns(sql).await,
        };

        let rows: Vec<Row> = fetched.iter().map(convert_row).collect();
        let result = QueryResult::with_data(columns, rows)
            .with_execution_time(execution_time)
            .truncated_to(self.limits.max_rows);

        if result.was_truncated {
            warn!(
                "Query returned {} rows, truncating to {} rows",
                result.total_rows, result.row_count
            );
        }

        Ok(result)
    }

    async fn execute_batch(&self, statements: &[&str]) -> Result<Vec<u64>> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;
        let mut affected = Vec::with_capacity(statements.len());

        for statement in statements {
            let done = self.timed(sqlx::query(statement).execute(&mut *tx)).await?;
            affected.push(done.rows_affected());
        }

        tx.commit().await.map_err(query_error)?;
        Ok(affected)
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        self.timed(
            sqlx::query_scalar("SELECT name FROM pragma_table_info(?) ORDER BY cid")
                .bind(table)
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

fn query_error(e: sqlx::Error) -> InsightsError {
    match e {
        sqlx::Error::Database(db) => InsightsError::query(db.message().to_string()),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            InsightsError::connection(e.to_string())
        }
        other => InsightsError::query(other.to_string()),
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Decodes one value using its runtime storage class rather than the declared column type.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let storage_class = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(_) => return Value::Null,
    };

    let decoded = match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get::<i64, _>(index).map(Value::Int),
        "REAL" | "NUMERIC" => row.try_get::<f64, _>(index).map(Value::Float),
        "BLOB" => row.try_get::<Vec<u8>, _>(index).map(Value::Blob),
        _ => row.try_get::<String, _>(index).map(Value::Text),
    };

    decoded.unwrap_or_else(|e| {
        warn!("Failed to decode column {index} ({storage_class}): {e}");
        Value::Null
    })
}
