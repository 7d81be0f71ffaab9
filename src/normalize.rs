//! Derivation of the normalized tables from the flat `orders` table.
//!
//! `product_details` holds one row per product and `customer_details` one row
//! per order. Both are rebuilt from `orders` on every sync inside a single
//! transaction, so readers see either the previous snapshot or the new one.

use crate::db::schema::{
    self, CREATE_CUSTOMER_DETAILS, CREATE_ORDERS, CREATE_PRODUCT_DETAILS,
    CUSTOMER_DETAIL_COLUMNS, PRODUCT_DETAIL_COLUMNS,
};
use crate::db::{DatabaseClient, Value};
use crate::error::{InsightsError, Result};
use std::time::{Duration, Instant};
use tracing::info;

/// Outcome of a successful sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Rows in `product_details` after the sync.
    pub products: u64,
    /// Rows in `customer_details` after the sync.
    pub customers: u64,
    /// Wall time spent syncing.
    pub elapsed: Duration,
}

impl SyncReport {
    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        format!(
            "Normalized {} products and {} orders in {}ms",
            self.products,
            self.customers,
            self.elapsed.as_millis()
        )
    }
}

/// Builds the statements that rebuild both derived tables.
///
/// Rows are replayed in ascending `order_id`, so when several orders share a
/// product the attributes of the highest order id are kept.
pub fn refresh_statements() -> Vec<String> {
    let product_cols = PRODUCT_DETAIL_COLUMNS.join(", ");
    let customer_cols = CUSTOMER_DETAIL_COLUMNS.join(", ");

    vec![
        CREATE_PRODUCT_DETAILS.to_string(),
        CREATE_CUSTOMER_DETAILS.to_string(),
        "DELETE FROM customer_details".to_string(),
        "DELETE FROM product_details".to_string(),
        format!(
            "INSERT OR REPLACE INTO product_details ({product_cols}) \
             SELECT {product_cols} FROM orders ORDER BY order_id"
        ),
        format!(
            "INSERT OR REPLACE INTO customer_details ({customer_cols}) \
             SELECT {customer_cols} FROM orders ORDER BY order_id"
        ),
    ]
}

/// Creates the derived tables if needed and rebuilds them from `orders`.
///
/// An empty dataset gets an empty `orders` table first. Any failing statement
/// aborts the whole sync and nothing is committed.
pub async fn sync_derived_tables(client: &dyn DatabaseClient) -> Result<SyncReport> {
    let start = Instant::now();

    client.execute_batch(&[CREATE_ORDERS]).await?;
    schema::ensure_orders_table(client).await?;

    let statements = refresh_statements();
    let statements: Vec<&str> = statements.iter().map(String::as_str).collect();
    client.execute_batch(&statements).await?;

    let counts = client
        .execute_query(
            "SELECT (SELECT COUNT(*) FROM product_details), \
                    (SELECT COUNT(*) FROM customer_details)",
        )
        .await?;

    let (products, customers) = match counts.rows.first().map(Vec::as_slice) {
        Some([Value::Int(products), Value::Int(customers)]) => (*products, *customers),
        _ => {
            return Err(InsightsError::internal(
                "Unexpected shape of derived table counts",
            ))
        }
    };

    let report = SyncReport {
        products: products as u64,
        customers: customers as u64,
        elapsed: start.elapsed(),
    };
    info!("{}", report.summary());
    Ok(report)
}
