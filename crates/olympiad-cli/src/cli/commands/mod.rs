//! CLI command handlers.

pub mod call;
pub mod config;
pub mod dashboard;
