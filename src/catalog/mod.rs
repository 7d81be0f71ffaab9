//! Fixed catalogs of analytical queries.
//!
//! Each [`CatalogEntry`] binds a stable identifier to its statement, its
//! display title and the ordered column labels of its result, so labels can
//! never drift from the query that produces them.

mod flat;
mod normalized;
mod view;

pub use view::TableView;

use crate::db::DatabaseClient;
use crate::error::{InsightsError, Result};
use tracing::debug;

/// Which dataset a catalog runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// The dataset holding only the flat `orders` table.
    Flat,
    /// The dataset where `orders` is split into `product_details` and `customer_details`.
    Normalized,
}

impl DatasetKind {
    /// Returns the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Normalized => "normalized",
        }
    }
}

/// A named query with its result labels.
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Stable identifier used for selection.
    pub id: &'static str,
    /// Human-readable title shown in the selector.
    pub title: &'static str,
    /// SQL statement to execute.
    pub sql: &'static str,
    /// Column labels, one per result column.
    pub columns: &'static [&'static str],
    /// One-line description of what the numbers mean.
    pub description: &'static str,
}

impl CatalogEntry {
    /// Runs the entry against `client` and pairs the rows with the entry's labels.
    pub async fn execute(&'static self, client: &dyn DatabaseClient) -> Result<TableView> {
        debug!("Executing catalog query {}", self.id);
        let result = client.execute_query(self.sql).await?;
        TableView::from_result(self, result)
    }
}

/// An ordered set of entries bound to one dataset.
#[derive(Debug)]
pub struct Catalog {
    /// Dataset the entries run against.
    pub dataset: DatasetKind,
    /// Section heading shown above the entries.
    pub heading: &'static str,
    /// Entries in display order.
    pub entries: &'static [CatalogEntry],
}

static FLAT: Catalog = Catalog {
    dataset: DatasetKind::Flat,
    heading: "Questions 1-10",
    entries: flat::ENTRIES,
};

static NORMALIZED: Catalog = Catalog {
    dataset: DatasetKind::Normalized,
    heading: "Questions 11-20",
    entries: normalized::ENTRIES,
};

impl Catalog {
    /// Queries over the flat `orders` table.
    pub fn flat() -> &'static Catalog {
        &FLAT
    }

    /// Join queries over the normalized tables.
    pub fn normalized() -> &'static Catalog {
        &NORMALIZED
    }

    /// Returns the catalog for `dataset`.
    pub fn for_dataset(dataset: DatasetKind) -> &'static Catalog {
        match dataset {
            DatasetKind::Flat => Self::flat(),
            DatasetKind::Normalized => Self::normalized(),
        }
    }

    /// Looks up an entry by identifier or exact title.
    pub fn get(&self, key: &str) -> Result<&'static CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.id == key || entry.title == key)
            .ok_or_else(|| InsightsError::invalid_selection(key))
    }

    /// Returns the entry at `index` in display order.
    pub fn entry(&self, index: usize) -> Option<&'static CatalogEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both catalogs in display order.
pub fn all() -> [&'static Catalog; 2] {
    [Catalog::flat(), Catalog::normalized()]
}

/// Finds an entry in either catalog by identifier or exact title.
pub fn find(key: &str) -> Result<(&'static Catalog, &'static CatalogEntry)> {
    all()
        .into_iter()
        .find_map(|catalog| catalog.get(key).ok().map(|entry| (catalog, entry)))
        .ok_or_else(|| InsightsError::invalid_selection(key))
}
