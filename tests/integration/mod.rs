//! Catalog and normalizer tests against seeded dataset files.

pub mod catalog_test;
pub mod normalize_test;

use retail_insights::config::{AccessMode, Config, ConnectionConfig};
use retail_insights::db::schema::CREATE_ORDERS;
use retail_insights::db::{DatabaseClient, OrderRecord, SqliteClient};
use std::path::Path;
use tempfile::TempDir;

/// Builds an order line with the fields the catalogs aggregate over.
#[allow(clippy::too_many_arguments)]
pub fn order(
    order_id: i64,
    order_date: &str,
    segment: &str,
    city: &str,
    region: &str,
    category: &str,
    product_id: &str,
    cost_price: f64,
    quantity: i64,
    discount_percent: f64,
    sale_price: f64,
    profit: f64,
) -> OrderRecord {
    OrderRecord {
        order_id,
        order_date: order_date.to_string(),
        ship_mode: "Standard Class".to_string(),
        segment: segment.to_string(),
        country: "United States".to_string(),
        city: city.to_string(),
        state: "Texas".to_string(),
        postal_code: "73301".to_string(),
        region: region.to_string(),
        category: category.to_string(),
        sub_category: "General".to_string(),
        product_id: product_id.to_string(),
        cost_price,
        list_price: cost_price * 1.5,
        quantity,
        discount_percent,
        discount: sale_price * discount_percent / 100.0,
        sale_price,
        profit,
    }
}

/// Four order lines covering the edge cases the catalogs guard against.
///
/// FUR-2 and CHR-1 have zero cost; the Nowhere line has zero sale price.
pub fn sample_orders() -> Vec<OrderRecord> {
    vec![
        order(1, "2023-01-05", "Consumer", "Austin", "Central", "Furniture", "FUR-1", 40.0, 2, 2.0, 50.0, 60.0),
        order(2, "2023-06-01", "Corporate", "Boston", "East", "Furniture", "FUR-2", 0.0, 3, 5.0, 100.0, 80.0),
        order(3, "2024-02-10", "Consumer", "Denver", "West", "Chairs", "CHR-1", 0.0, 1, 4.0, 30.0, 100.0),
        order(4, "2024-03-01", "Home Office", "Nowhere", "South", "Office", "OFF-1", 10.0, 1, 0.0, 0.0, 0.0),
    ]
}

/// Creates `orders` in the file at `path` and inserts `records`.
pub async fn seed(path: &Path, records: &[OrderRecord]) {
    let client = SqliteClient::connect(&ConnectionConfig::new(path, AccessMode::ReadWrite))
        .await
        .unwrap();
    client.execute_batch(&[CREATE_ORDERS]).await.unwrap();
    client.insert_orders(records).await.unwrap();
    client.close().await.unwrap();
}

/// Seeds a flat dataset and a normalized copy with the same orders.
pub async fn seeded_config(records: &[OrderRecord]) -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let flat = dir.path().join("orders.db");
    let normalized = dir.path().join("Copy of orders.db");
    seed(&flat, records).await;
    seed(&normalized, records).await;

    let mut config = Config::default();
    config.apply_overrides(Some(&flat), Some(&normalized));
    (dir, config)
}
