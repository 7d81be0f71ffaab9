//! Integration tests for retail-insights.
//!
//! Each test seeds its own SQLite files in a temporary directory.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
mod tui;
