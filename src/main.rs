//! Simon Says - terminal memory game.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use simon_says::{Cli, SimonConfig, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing(&cli)?;

    let config = SimonConfig::load_or_default(&cli.config)?.with_seed(cli.seed);
    info!(seed = ?config.seed(), "Configuration ready");

    run_tui(&config)
}

/// Logs go to a file so they do not interfere with the TUI.
fn initialize_tracing(cli: &Cli) -> Result<()> {
    let log_file = std::fs::File::create(&cli.log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
