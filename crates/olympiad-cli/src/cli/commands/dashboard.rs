//! Interactive dashboard command.

use anyhow::Result;
use olympiad_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    olympiad_tui::run_dashboard(config)
}
