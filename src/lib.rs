//! Simon Says - terminal front end for the strictly_simon game logic.
//!
//! # Architecture
//!
//! - **Config**: optional TOML file with board size, animation timing and seed
//! - **TUI**: ratatui renderer and crossterm input implementing the game's
//!   device traits
//!
//! # Example
//!
//! ```no_run
//! use simon_says::{SimonConfig, run_tui};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = SimonConfig::load_or_default("simon_says.toml")?;
//! run_tui(&config)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod tui;

pub use cli::Cli;
pub use config::{BoardConfig, ConfigError, SimonConfig};
pub use tui::{
    CrosstermInput, TerminalGuard, TerminalRenderer, draw, map_key, run_tui, scale_region,
};
