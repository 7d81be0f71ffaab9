//! Integration tests for headless mode.

use super::run_binary;
use crate::integration::{sample_orders, seed};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

struct Datasets {
    dir: TempDir,
    flat: PathBuf,
    normalized: PathBuf,
}

impl Datasets {
    async fn seeded() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let flat = dir.path().join("orders.db");
        let normalized = dir.path().join("Copy of orders.db");
        seed(&flat, &sample_orders()).await;
        seed(&normalized, &sample_orders()).await;
        Self {
            dir,
            flat,
            normalized,
        }
    }

    fn run(&self, events: &str, extra: &[&str]) -> (i32, String, String) {
        let flat = self.flat.to_string_lossy().to_string();
        let normalized = self.normalized.to_string_lossy().to_string();
        let mut args = vec![
            "--flat-db",
            flat.as_str(),
            "--normalized-db",
            normalized.as_str(),
            "--headless",
            "--events",
            events,
        ];
        args.extend_from_slice(extra);
        run_binary(self.dir.path(), &args)
    }
}

#[test]
fn test_list_prints_both_catalogs() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_binary(dir.path(), &["--list"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Questions 1-10 (flat)"));
    assert!(stdout.contains("Questions 11-20 (normalized)"));
    assert!(stdout.contains("yearly_revenue"));
    assert!(stdout.contains("Product that Gives Profit More Than 1000"));
}

#[tokio::test]
async fn test_startup_screen_reports_normalization() {
    let datasets = Datasets::seeded().await;
    let (code, stdout, _) = datasets.run(
        "assert:contains:Normalized 4 products and 4 orders,assert:contains:Retail Insights",
        &[],
    );

    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("Assertions: 2 passed, 0 failed"));
}

#[tokio::test]
async fn test_select_renders_table() {
    let datasets = Datasets::seeded().await;
    let (code, stdout, _) = datasets.run(
        "select:category_profit,assert:contains:Total Profit,assert:contains:Furniture",
        &["--output", "json"],
    );

    assert_eq!(code, 0, "{stdout}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["assertions"]["passed"], 2);
    assert_eq!(parsed["table"]["id"], "category_profit");
    assert_eq!(parsed["table"]["rows"][0][0], "Furniture");
    assert_eq!(parsed["table"]["rows"][0][1], 140.0);
}

#[tokio::test]
async fn test_keyboard_navigation_runs_normalized_entry() {
    let datasets = Datasets::seeded().await;
    let (code, stdout, _) = datasets.run(
        "key:tab,key:down,key:enter,assert:state:view=region_product_avg_quantity,assert:state:active=normalized",
        &["--output", "json"],
    );

    assert_eq!(code, 0, "{stdout}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["state"]["selected"], "region_product_avg_quantity");
    assert_eq!(parsed["table"]["columns"][2], "Avg Quantity Sold");
}

#[tokio::test]
async fn test_failed_assertion_exits_nonzero() {
    let datasets = Datasets::seeded().await;
    let (code, stdout, _) = datasets.run("select:yearly_revenue,assert:contains:1999", &[]);

    assert_eq!(code, 1);
    assert!(stdout.contains("Assertions: 0 passed, 1 failed"));
}

#[test]
fn test_missing_flat_dataset_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let flat = dir.path().join("absent.db");
    let flat_arg = flat.to_string_lossy().to_string();
    let normalized_arg = dir.path().join("copy.db").to_string_lossy().to_string();
    let (code, stdout, _) = run_binary(
        dir.path(),
        &[
            "--flat-db",
            flat_arg.as_str(),
            "--normalized-db",
            normalized_arg.as_str(),
            "--headless",
            "--events",
            "key:enter,assert:contains:Connection error,select:furniture_total_quantity,assert:state:view=furniture_total_quantity",
        ],
    );

    assert_eq!(code, 0, "{stdout}");
    assert!(!flat.exists());
}

#[test]
fn test_headless_requires_events() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_binary(dir.path(), &["--headless"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("--headless requires --events"));
}

#[tokio::test]
async fn test_invalid_event_is_configuration_error() {
    let datasets = Datasets::seeded().await;
    let (code, stdout, stderr) = datasets.run("type:hello", &[]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown event type"));
}
