//! Core Olympiad Prep client library (API client, action table, session, config).

pub mod actions;
pub mod api;
pub mod config;
pub mod logging;
pub mod models;
pub mod outcome;
pub mod quiz;
pub mod session;
