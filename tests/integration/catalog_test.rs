//! Catalog queries against seeded datasets.

use super::{order, sample_orders, seeded_config};
use pretty_assertions::assert_eq;
use retail_insights::catalog::{self, Catalog, TableView};
use retail_insights::dashboard::{Dashboard, SyncStatus};
use retail_insights::db::Value;

async fn prepared_dashboard() -> (tempfile::TempDir, Dashboard) {
    let (dir, config) = seeded_config(&sample_orders()).await;
    let mut dashboard = Dashboard::new(config);
    assert!(matches!(dashboard.prepare().await, SyncStatus::Synced(_)));
    (dir, dashboard)
}

fn text_column(view: &TableView, index: usize) -> Vec<String> {
    view.rows
        .iter()
        .map(|row| row[index].to_display_string())
        .collect()
}

#[tokio::test]
async fn test_every_entry_matches_its_labels() {
    let (_dir, dashboard) = prepared_dashboard().await;

    for catalog in catalog::all() {
        for entry in catalog.entries {
            let view = dashboard.run_entry(catalog, entry).await.unwrap();
            assert_eq!(view.columns.len(), entry.columns.len(), "{}", entry.id);
            for row in &view.rows {
                assert_eq!(row.len(), entry.columns.len(), "{}", entry.id);
            }
        }
    }
}

#[tokio::test]
async fn test_top_n_entries_respect_their_bounds() {
    let (_dir, dashboard) = prepared_dashboard().await;

    for (id, limit) in [
        ("top_revenue_products", 10),
        ("city_profit_margins", 5),
        ("top_segments_by_quantity", 3),
        ("top_profit_products_with_region", 5),
        ("top_city_discounts", 3),
    ] {
        let view = dashboard.run(id).await.unwrap();
        assert!(view.row_count() <= limit, "{id} returned {}", view.row_count());
        assert!(!view.is_empty(), "{id} returned nothing");
    }

    for id in [
        "top_region_avg_sale_price",
        "top_profit_category",
        "top_region_product_revenue",
    ] {
        let view = dashboard.run(id).await.unwrap();
        assert_eq!(view.row_count(), 1, "{id}");
    }
}

#[tokio::test]
async fn test_category_profit() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let view = dashboard.run("Total Profit per Category").await.unwrap();

    assert_eq!(view.columns, vec!["Category", "Total Profit"]);
    assert_eq!(
        view.rows,
        vec![
            vec![Value::from("Furniture"), Value::Float(140.0)],
            vec![Value::from("Chairs"), Value::Float(100.0)],
            vec![Value::from("Office"), Value::Float(0.0)],
        ]
    );
}

#[tokio::test]
async fn test_zero_sale_city_has_no_margin() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let view = dashboard.run("city_profit_margins").await.unwrap();

    assert_eq!(text_column(&view, 0), vec!["Denver", "Austin", "Boston"]);
}

#[tokio::test]
async fn test_yearly_revenue() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let view = dashboard.run("yearly_revenue").await.unwrap();

    assert_eq!(
        view.rows,
        vec![
            vec![Value::from("2023"), Value::Float(400.0)],
            vec![Value::from("2024"), Value::Float(30.0)],
        ]
    );
}

#[tokio::test]
async fn test_top_region_by_average_sale_price() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let view = dashboard.run("top_region_avg_sale_price").await.unwrap();

    assert_eq!(view.rows, vec![vec![Value::from("East"), Value::Float(100.0)]]);
}

#[tokio::test]
async fn test_furniture_total_quantity() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let view = dashboard.run("furniture_total_quantity").await.unwrap();

    assert_eq!(view.rows, vec![vec![Value::Int(5)]]);
}

#[tokio::test]
async fn test_zero_cost_lines_excluded_from_margin() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let view = dashboard.run("category_avg_profit_margin").await.unwrap();

    // Chairs has only zero-cost lines and FUR-2 does not count towards Furniture
    assert_eq!(
        view.rows,
        vec![
            vec![Value::from("Furniture"), Value::Float(150.0)],
            vec![Value::from("Office"), Value::Float(0.0)],
        ]
    );
}

#[tokio::test]
async fn test_city_discounts_pick_each_city_once() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let view = dashboard.run("top_city_discounts").await.unwrap();

    assert_eq!(text_column(&view, 0), vec!["Boston", "Denver", "Austin"]);
    assert_eq!(text_column(&view, 1), vec!["FUR-2", "CHR-1", "FUR-1"]);
}

#[tokio::test]
async fn test_high_profit_products_empty_when_none_qualify() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let view = dashboard.run("high_profit_products").await.unwrap();

    assert!(view.is_empty());
    assert_eq!(view.columns.len(), 5);
}

#[tokio::test]
async fn test_flat_dataset_is_not_modified() {
    let (_dir, dashboard) = prepared_dashboard().await;
    let flat = Catalog::flat();
    let before = dashboard.run_entry(flat, flat.get("category_profit").unwrap()).await.unwrap();

    let mut dashboard = dashboard;
    dashboard.prepare().await;
    let after = dashboard.run_entry(flat, flat.get("category_profit").unwrap()).await.unwrap();

    assert_eq!(before.rows, after.rows);
}

#[tokio::test]
async fn test_three_order_scenario() {
    let (_dir, config) = seeded_config(&[
        order(1, "2023-01-01", "Consumer", "Austin", "Central", "Furniture", "p1", 50.0, 2, 0.0, 100.0, 50.0),
        order(2, "2023-01-02", "Consumer", "Boston", "East", "Chairs", "p2", 100.0, 1, 0.0, 200.0, 100.0),
        order(3, "2023-01-03", "Corporate", "Denver", "West", "Furniture", "p3", 60.0, 3, 0.0, 150.0, 90.0),
    ])
    .await;
    let mut dashboard = Dashboard::new(config);
    dashboard.prepare().await;

    let quantity = dashboard
        .run("Total Quantity of Orders in Furniture Products")
        .await
        .unwrap();
    assert_eq!(quantity.rows, vec![vec![Value::Int(5)]]);

    let profit = dashboard.run("category_profit").await.unwrap();
    assert_eq!(
        profit.rows,
        vec![
            vec![Value::from("Furniture"), Value::Float(140.0)],
            vec![Value::from("Chairs"), Value::Float(100.0)],
        ]
    );
}
