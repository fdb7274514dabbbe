//! Full-screen terminal dashboard for Olympiad Prep.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::{Context, Result};
use olympiad_core::api::ApiClient;
use olympiad_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the dashboard until the user quits.
///
/// Must be called from within a multi-threaded tokio runtime: requests are
/// spawned onto it while this thread polls the terminal.
pub fn run_dashboard(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `olympiad call <module> <action>` for non-interactive requests."
        );
    }

    let client = ApiClient::new(config).context("Failed to create API client")?;
    tracing::info!(base_url = client.base_url(), "Starting dashboard");

    let mut runtime = TuiRuntime::new(client)?;
    runtime.run()?;
    drop(runtime);

    tracing::info!("Dashboard closed");
    Ok(())
}
