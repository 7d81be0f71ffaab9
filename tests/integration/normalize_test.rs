//! Normalizer behavior against dataset files.

use super::{order, sample_orders, seed};
use pretty_assertions::assert_eq;
use retail_insights::config::{AccessMode, ConnectionConfig};
use retail_insights::db::{self, schema, DatabaseClient, SqliteClient, Value};
use retail_insights::normalize;

fn connection(path: &std::path::Path) -> ConnectionConfig {
    ConnectionConfig::new(path, AccessMode::ReadWrite)
}

async fn table_rows(path: &std::path::Path, sql: &'static str) -> Vec<Vec<Value>> {
    db::with_client(&connection(path), |client| {
        Box::pin(async move { client.execute_query(sql).await })
    })
    .await
    .unwrap()
    .rows
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.db");
    seed(&path, &sample_orders()).await;

    let client = SqliteClient::connect(&connection(&path)).await.unwrap();
    let first = normalize::sync_derived_tables(&client).await.unwrap();
    let products = client
        .execute_query("SELECT * FROM product_details ORDER BY product_id")
        .await
        .unwrap();
    let customers = client
        .execute_query("SELECT * FROM customer_details ORDER BY order_id")
        .await
        .unwrap();
    let second = normalize::sync_derived_tables(&client).await.unwrap();
    let products_again = client
        .execute_query("SELECT * FROM product_details ORDER BY product_id")
        .await
        .unwrap();
    let customers_again = client
        .execute_query("SELECT * FROM customer_details ORDER BY order_id")
        .await
        .unwrap();
    client.close().await.unwrap();

    assert_eq!((first.products, first.customers), (4, 4));
    assert_eq!((second.products, second.customers), (4, 4));
    assert_eq!(products.rows, products_again.rows);
    assert_eq!(customers.rows.len(), 4);
    assert_eq!(customers.rows, customers_again.rows);
}

#[tokio::test]
async fn test_later_order_wins_for_shared_product() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.db");
    seed(
        &path,
        &[
            order(7, "2023-01-01", "Consumer", "Austin", "Central", "Furniture", "FUR-1", 40.0, 2, 0.0, 50.0, 60.0),
            order(3, "2023-02-01", "Consumer", "Dallas", "Central", "Furniture", "FUR-1", 40.0, 9, 0.0, 55.0, 15.0),
        ],
    )
    .await;

    let report = db::with_client(&connection(&path), |client| {
        Box::pin(async move { normalize::sync_derived_tables(client).await })
    })
    .await
    .unwrap();
    assert_eq!((report.products, report.customers), (1, 2));

    let rows = table_rows(&path, "SELECT quantity, profit FROM product_details").await;
    assert_eq!(rows, vec![vec![Value::Int(2), Value::Float(60.0)]]);

    let rows = table_rows(&path, "SELECT order_id, city FROM customer_details ORDER BY order_id").await;
    assert_eq!(
        rows,
        vec![
            vec![Value::Int(3), Value::from("Dallas")],
            vec![Value::Int(7), Value::from("Austin")],
        ]
    );
}

#[tokio::test]
async fn test_removed_orders_disappear_on_resync() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.db");
    seed(&path, &sample_orders()).await;

    let client = SqliteClient::connect(&connection(&path)).await.unwrap();
    normalize::sync_derived_tables(&client).await.unwrap();
    client
        .execute_batch(&["DELETE FROM orders WHERE category = 'Office'"])
        .await
        .unwrap();
    let report = normalize::sync_derived_tables(&client).await.unwrap();
    client.close().await.unwrap();

    assert_eq!((report.products, report.customers), (3, 3));
}

#[tokio::test]
async fn test_incomplete_orders_table_aborts_sync() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.db");

    let client = SqliteClient::connect(&connection(&path)).await.unwrap();
    client
        .execute_batch(&["CREATE TABLE orders (order_id INTEGER PRIMARY KEY, city TEXT)"])
        .await
        .unwrap();

    let missing = schema::missing_order_columns(&client).await.unwrap();
    assert_eq!(missing.len(), 17);

    let err = normalize::sync_derived_tables(&client).await.unwrap_err();
    assert_eq!(err.category(), "Query Error");
    assert!(err.to_string().contains("missing columns: order_date"));

    let derived = client.table_columns("product_details").await.unwrap();
    assert!(derived.is_empty());
    client.close().await.unwrap();
}
