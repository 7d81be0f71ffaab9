//! Retail Insights - analytics over retail order datasets.
//!
//! The library exposes the query catalogs, the normalizer, and the terminal
//! UI so the binary and the integration tests share one implementation.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod tui;
