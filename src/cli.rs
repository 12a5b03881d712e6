//! Command-line interface for simon_says.

use clap::Parser;
use std::path::PathBuf;

/// Simon Says - repeat the sequence the squares play back
#[derive(Parser, Debug)]
#[command(name = "simon_says")]
#[command(about = "Terminal Simon Says memory game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file; defaults are used if it does not exist
    #[arg(short, long, default_value = "simon_says.toml")]
    pub config: PathBuf,

    /// Seed for a reproducible sequence (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// File that receives log output
    #[arg(long, default_value = "simon_says.log")]
    pub log_file: PathBuf,
}
