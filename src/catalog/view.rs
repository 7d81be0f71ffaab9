//! Pairing of query results with catalog labels.

use super::CatalogEntry;
use crate::db::{QueryResult, Row};
use crate::error::{InsightsError, Result};
use serde::Serialize;
use std::time::Duration;

/// A result ready to render: the entry's labels plus the rows it produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Identifier of the entry that produced the rows.
    pub id: &'static str,
    /// Title of the entry.
    pub title: &'static str,
    /// Column labels from the catalog.
    pub columns: Vec<&'static str>,
    /// Result rows, each with one value per label.
    pub rows: Vec<Row>,
    /// Time spent executing.
    #[serde(skip)]
    pub execution_time: Duration,
    /// Set when rows were dropped because of the row limit.
    pub truncation_warning: Option<String>,
}

impl TableView {
    /// Builds a view, rejecting rows whose arity differs from the label list.
    pub fn from_result(entry: &'static CatalogEntry, result: QueryResult) -> Result<Self> {
        let expected = entry.columns.len();
        if let Some(row) = result.rows.iter().find(|row| row.len() != expected) {
            return Err(InsightsError::query(format!(
                "{} returned {} columns but {} labels are defined",
                entry.id,
                row.len(),
                expected
            )));
        }

        let truncation_warning = result.truncation_warning();
        Ok(Self {
            id: entry.id,
            title: entry.title,
            columns: entry.columns.to_vec(),
            rows: result.rows,
            execution_time: result.execution_time,
            truncation_warning,
        })
    }

    /// Number of rows in the view.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the query produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::db::Value;

    #[test]
    fn test_view_uses_catalog_labels() {
        let entry = Catalog::flat().get("category_profit").unwrap();
        let result = QueryResult::with_data(
            vec!["category".to_string(), "total_profit".to_string()],
            vec![vec![Value::from("Furniture"), Value::Float(140.0)]],
        );

        let view = TableView::from_result(entry, result).unwrap();
        assert_eq!(view.columns, vec!["Category", "Total Profit"]);
        assert_eq!(view.title, "Total Profit per Category");
        assert_eq!(view.row_count(), 1);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let entry = Catalog::normalized().get("high_profit_products").unwrap();
        let view = TableView::from_result(entry, QueryResult::new()).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.columns.len(), 5);
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let entry = Catalog::flat().get("yearly_revenue").unwrap();
        let result = QueryResult::with_data(vec![], vec![vec![Value::from("2023")]]);

        let err = TableView::from_result(entry, result).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Query error: yearly_revenue returned 1 columns but 2 labels are defined"
        );
    }

    #[test]
    fn test_truncation_warning_carried() {
        let entry = Catalog::flat().get("yearly_revenue").unwrap();
        let rows = (0..3)
            .map(|y| vec![Value::from(format!("202{y}")), Value::Int(y)])
            .collect();
        let result = QueryResult::with_data(vec![], rows).truncated_to(2);

        let view = TableView::from_result(entry, result).unwrap();
        assert!(view.truncation_warning.is_some());
    }
}
