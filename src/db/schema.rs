//! Table layouts for the flat and normalized datasets.
//!
//! The flat `orders` table is populated outside this program. The two derived
//! tables are created and refreshed by [`crate::normalize`].

use crate::db::DatabaseClient;
use crate::error::{InsightsError, Result};
use serde::Serialize;

/// Name of the flat source table.
pub const ORDERS_TABLE: &str = "orders";

/// Columns of the flat `orders` table, in declaration order.
pub const ORDER_COLUMNS: [&str; 19] = [
    "order_id",
    "order_date",
    "ship_mode",
    "segment",
    "country",
    "city",
    "state",
    "postal_code",
    "region",
    "category",
    "sub_category",
    "product_id",
    "cost_price",
    "list_price",
    "quantity",
    "discount_percent",
    "discount",
    "sale_price",
    "profit",
];

/// Columns projected into `product_details`; `product_id` is the key.
pub const PRODUCT_DETAIL_COLUMNS: [&str; 10] = [
    "product_id",
    "category",
    "sub_category",
    "cost_price",
    "list_price",
    "quantity",
    "discount_percent",
    "discount",
    "sale_price",
    "profit",
];

/// Columns projected into `customer_details`; `order_id` is the key.
pub const CUSTOMER_DETAIL_COLUMNS: [&str; 10] = [
    "order_id",
    "order_date",
    "ship_mode",
    "segment",
    "country",
    "city",
    "state",
    "postal_code",
    "region",
    "product_id",
];

pub const CREATE_ORDERS: &str = "
CREATE TABLE IF NOT EXISTS orders (
    order_id         INTEGER PRIMARY KEY,
    order_date       TEXT,
    ship_mode        VARCHAR(100),
    segment          VARCHAR(100),
    country          VARCHAR(100),
    city             VARCHAR(100),
    state            VARCHAR(100),
    postal_code      TEXT,
    region           VARCHAR(100),
    category         VARCHAR(100),
    sub_category     VARCHAR(100),
    product_id       VARCHAR(100),
    cost_price       REAL,
    list_price       REAL,
    quantity         INTEGER,
    discount_percent REAL,
    discount         REAL,
    sale_price       REAL,
    profit           REAL
)";

pub const CREATE_PRODUCT_DETAILS: &str = "
CREATE TABLE IF NOT EXISTS product_details (
    product_id       VARCHAR(100) PRIMARY KEY,
    category         VARCHAR(100),
    sub_category     VARCHAR(100),
    cost_price       REAL,
    list_price       REAL,
    quantity         INTEGER,
    discount_percent REAL,
    discount         REAL,
    sale_price       REAL,
    profit           REAL
)";

/// The `product_id` reference is declared only; connections run with foreign
/// key enforcement off.
pub const CREATE_CUSTOMER_DETAILS: &str = "
CREATE TABLE IF NOT EXISTS customer_details (
    order_id    INTEGER PRIMARY KEY,
    order_date  TEXT,
    ship_mode   VARCHAR(100),
    segment     VARCHAR(100),
    country     VARCHAR(100),
    city        VARCHAR(100),
    state       VARCHAR(100),
    postal_code TEXT,
    region      VARCHAR(100),
    product_id  VARCHAR(100),
    FOREIGN KEY (product_id) REFERENCES product_details (product_id)
)";

/// One row of the flat `orders` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub order_id: i64,
    pub order_date: String,
    pub ship_mode: String,
    pub segment: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub region: String,
    pub category: String,
    pub sub_category: String,
    pub product_id: String,
    pub cost_price: f64,
    pub list_price: f64,
    pub quantity: i64,
    pub discount_percent: f64,
    pub discount: f64,
    pub sale_price: f64,
    pub profit: f64,
}

/// Returns the required `orders` columns that `client`'s dataset lacks.
pub async fn missing_order_columns(client: &dyn DatabaseClient) -> Result<Vec<&'static str>> {
    let present = client.table_columns(ORDERS_TABLE).await?;
    Ok(ORDER_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.iter().any(|p| p.eq_ignore_ascii_case(col)))
        .collect())
}

/// Fails with a query error naming the columns if `orders` is missing or incomplete.
pub async fn ensure_orders_table(client: &dyn DatabaseClient) -> Result<()> {
    let missing = missing_order_columns(client).await?;

    if missing.len() == ORDER_COLUMNS.len() {
        return Err(InsightsError::query("no such table: orders"));
    }
    if !missing.is_empty() {
        return Err(InsightsError::query(format!(
            "orders table is missing columns: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}
