mod activity;
mod config;
mod credentials;
mod dashboard;
mod error;
mod event;
mod github;
mod logging;
#[cfg(test)]
mod test_utils;
mod tracker;
mod watcher;

use clap::{Parser, Subcommand};
use config::{CliOverrides, Config};
use credentials::{CredentialState, CredentialStore};
use dashboard::server::AppState;
use std::path::PathBuf;
use logging::LogTarget;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "repo-radar", about = "Open PRs and recent commits across your GitHub repositories")]
struct Cli {
    #[arg(long, global = true, help = "Path to config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web dashboard
    Serve {
        #[arg(long, help = "Address to listen on, e.g. 127.0.0.1:5000")]
        bind: Option<String>,
    },
    /// Print live activity in the terminal
    Track {
        #[arg(long, short, help = "Seconds between rescans")]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut overrides = CliOverrides {
        config_file: cli.config,
        ..Default::default()
    };
    match &cli.command {
        Command::Serve { bind } => overrides.bind_addr = bind.clone(),
        Command::Track { interval } => overrides.poll_interval_secs = *interval,
    }

    let config = Config::load(&overrides);
    match &cli.command {
        Command::Serve { .. } => logging::init(&LogTarget::Stderr, "info"),
        Command::Track { .. } => {
            logging::init(&LogTarget::File(config.tracker_log_path()), "warn")
        }
    }
    tracing::debug!(?config, "configuration loaded");

    let store = CredentialStore::new(&config.credentials_path);
    let credentials = match CredentialState::load(store, config.configured_token()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Serve { .. } => {
            let state = AppState {
                config: Arc::new(config),
                credentials: Arc::new(credentials),
            };
            dashboard::server::serve(state).await
        }
        Command::Track { .. } => run_tracker(&config, &credentials).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run_tracker(config: &Config, credentials: &CredentialState) -> error::Result<()> {
    let credential = tracker::setup::ensure_credential(
        credentials,
        std::io::stdin().lock(),
        &mut std::io::stdout(),
    )?;
    tracker::run(config, &credential).await
}
