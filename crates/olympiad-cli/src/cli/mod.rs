//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use olympiad_core::config::{self, BASE_URL_ENV};
use olympiad_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "olympiad")]
#[command(version)]
#[command(about = "Terminal client for the Olympiad Prep backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, env = BASE_URL_ENV, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard,

    /// Send one request to the backend and print the response
    Call {
        /// Module: exams, sections, syllabus, notes, questions, analytics, auth
        #[arg(value_name = "MODULE")]
        module: String,

        /// Action within the module, e.g. list, get, create, update, delete
        #[arg(value_name = "ACTION")]
        action: String,

        /// Value for the action's ID field (exam, section, syllabus, note or question)
        #[arg(long)]
        id: Option<u64>,

        /// Form field as key=value (repeatable)
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// List modules, their actions and fields
    Actions {
        /// Only show this module
        #[arg(value_name = "MODULE")]
        module: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config generated from defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, base_url } = cli;

    // Commands that never touch the backend.
    match &command {
        Some(Commands::Config { command }) => {
            return match command {
                ConfigCommands::Path => {
                    commands::config::path();
                    Ok(())
                }
                ConfigCommands::Init => commands::config::init(),
                ConfigCommands::Generate => commands::config::generate(),
            };
        }
        Some(Commands::Actions { module }) => return commands::call::list(module.as_deref()),
        Some(Commands::Dashboard | Commands::Call { .. }) | None => {}
    }

    let mut config = config::Config::load().context("load config")?;
    if let Some(url) = base_url.as_deref() {
        config.apply_base_url_override(url);
    }

    let _log_guard = match logging::init_logging(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    match command {
        Some(Commands::Call {
            module,
            action,
            id,
            fields,
        }) => {
            commands::call::run(
                &commands::call::CallOptions {
                    module: &module,
                    action: &action,
                    id,
                    fields: &fields,
                },
                &config,
            )
            .await
        }
        // default to the dashboard
        Some(Commands::Dashboard) | None => commands::dashboard::run(&config),
        Some(Commands::Config { .. } | Commands::Actions { .. }) => Ok(()),
    }
}
