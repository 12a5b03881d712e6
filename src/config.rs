//! Game configuration, loadable from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_simon::Timing;
use tracing::{debug, info, instrument, warn};

/// Upper bound for any configured delay.
const MAX_DELAY_MS: u64 = 10_000;

/// Board size in board units.
///
/// The renderer scales these to whatever the terminal offers, so only the
/// aspect ratio is visible on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Board width.
    pub width: u32,
    /// Board height.
    pub height: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct SimonConfig {
    /// Board dimensions.
    board: BoardConfig,

    /// Animation delays.
    timing: Timing,

    /// Fixed seed for a reproducible sequence.
    seed: Option<u64>,
}

impl SimonConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(board = ?config.board, timing = ?config.timing, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the seed when one is given.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Checks value ranges.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width < 2 || self.board.height < 2 {
            return Err(ConfigError::new(format!(
                "Board must be at least 2x2, got {}x{}",
                self.board.width, self.board.height
            )));
        }
        let delays = [
            ("highlight_ms", self.timing.highlight_ms),
            ("gap_ms", self.timing.gap_ms),
            ("transition_ms", self.timing.transition_ms),
        ];
        for (name, value) in delays {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::new(format!(
                    "timing.{} must be at most {} ms, got {}",
                    name, MAX_DELAY_MS, value
                )));
            }
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
