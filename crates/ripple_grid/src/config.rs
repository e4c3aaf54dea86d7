//! Grid configuration.

use crate::types::CellValue;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Number of rows and columns in the default grid.
pub const GRID_SIZE: usize = 3;

/// Largest accepted grid dimension.
pub const MAX_GRID_SIZE: usize = 256;

/// Cells at or above this value are locked.
pub const LOCK_THRESHOLD: CellValue = 15;

/// How long ripple highlights stay lit, in milliseconds.
pub const RIPPLE_DURATION_MS: u64 = 400;

/// Tunable parameters for a grid session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid dimension.
    #[serde(default = "default_grid_size")]
    grid_size: usize,

    /// Lock threshold.
    #[serde(default = "default_lock_threshold")]
    lock_threshold: CellValue,

    /// Highlight duration for ripple-affected cells.
    #[serde(default = "default_ripple_duration_ms")]
    ripple_duration_ms: u64,
}

fn default_grid_size() -> usize {
    GRID_SIZE
}

fn default_lock_threshold() -> CellValue {
    LOCK_THRESHOLD
}

fn default_ripple_duration_ms() -> u64 {
    RIPPLE_DURATION_MS
}

impl GridConfig {
    /// Creates a validated configuration.
    #[instrument]
    pub fn new(
        grid_size: usize,
        lock_threshold: CellValue,
        ripple_duration_ms: u64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            grid_size,
            lock_threshold,
            ripple_duration_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            grid_size = config.grid_size,
            lock_threshold = config.lock_threshold,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with the grid size replaced.
    pub fn with_grid_size(self, grid_size: usize) -> Result<Self, ConfigError> {
        Self::new(grid_size, self.lock_threshold, self.ripple_duration_ms)
    }

    /// Returns a copy with the lock threshold replaced.
    pub fn with_lock_threshold(self, lock_threshold: CellValue) -> Result<Self, ConfigError> {
        Self::new(self.grid_size, lock_threshold, self.ripple_duration_ms)
    }

    /// Highlight duration as a [`Duration`].
    pub fn ripple_duration(&self) -> Duration {
        Duration::from_millis(self.ripple_duration_ms)
    }

    #[track_caller]
    fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::new("grid_size must be at least 1".to_string()));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::new(format!(
                "grid_size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.lock_threshold < 1 {
            return Err(ConfigError::new(format!(
                "lock_threshold must be at least 1, got {}",
                self.lock_threshold
            )));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            lock_threshold: LOCK_THRESHOLD,
            ripple_duration_ms: RIPPLE_DURATION_MS,
        }
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
