//! TUI widgets for the dashboard.

pub mod header;
pub mod selector;
pub mod table;
