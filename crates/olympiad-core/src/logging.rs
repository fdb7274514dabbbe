//! File logging.
//!
//! The dashboard owns the terminal, so logs go to a daily-rolling file under
//! `$OLYMPIAD_HOME/logs` instead of stderr.

use std::path::Path;
use std::{env, fs};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{Config, paths};

const LOG_FILE_PREFIX: &str = "olympiad.log";

const DEFAULT_LEVEL: &str = "info";

/// Builds the filter: `RUST_LOG` wins, otherwise the configured level.
pub fn env_filter(config: &Config) -> EnvFilter {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), &config.log_level)
}

/// The first of `rust_log`, `log_level` and `info` that parses.
fn filter_from(rust_log: Option<&str>, log_level: &str) -> EnvFilter {
    [rust_log.unwrap_or_default(), log_level]
        .into_iter()
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

/// Initializes the global subscriber writing to `$OLYMPIAD_HOME/logs`.
///
/// Keep the returned guard alive for the whole process; dropping it
/// flushes and stops the background writer.
pub fn init_logging(config: &Config) -> Result<WorkerGuard> {
    init_logging_in(config, &paths::logs_dir())
}

/// Same as [`init_logging`] with an explicit log directory.
pub fn init_logging_in(config: &Config, dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_rust_log_wins_over_configured_level() {
        let filter = filter_from(Some("olympiad_core=trace"), "warn");
        assert_eq!(filter.to_string(), "olympiad_core=trace");
    }

    #[test]
    fn test_configured_level_used_without_rust_log() {
        assert_eq!(filter_from(None, "debug").to_string(), "debug");
        assert_eq!(filter_from(Some("  "), " warn ").to_string(), "warn");
    }

    #[test]
    fn test_invalid_levels_fall_back_to_info() {
        assert_eq!(filter_from(Some("api=bogus"), "warn").to_string(), "warn");
        assert_eq!(filter_from(None, "api=verbose").to_string(), "info");
        assert_eq!(filter_from(None, "").to_string(), "info");
    }

    #[test]
    fn test_init_logging_in_creates_dir_and_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let config = Config {
            log_level: "info".to_string(),
            ..Config::default()
        };

        let guard = init_logging_in(&config, &dir).unwrap();
        assert!(dir.is_dir());
        tracing::error!("logging ready");
        drop(guard);

        let files: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(LOG_FILE_PREFIX), "{name}");
        assert!(fs::read_to_string(&files[0]).unwrap().contains("logging ready"));

        // the global subscriber can only be installed once per process
        let err = init_logging_in(&config, &dir).unwrap_err();
        assert!(err.to_string().contains("Failed to install tracing subscriber"));
    }
}
