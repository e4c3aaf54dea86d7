//! Command-line interface for the ripple grid.

use clap::{Args, Parser, Subcommand};
use ripple_grid::{CellValue, ConfigError, GridConfig, Position};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Ripple Grid - click cells, watch neighbours ripple
#[derive(Parser, Debug)]
#[command(name = "ripple-grid")]
#[command(about = "Interactive ripple grid in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Grid options
        #[command(flatten)]
        grid: GridArgs,
    },

    /// Apply clicks to a fresh grid and print the result
    Replay {
        /// Grid options
        #[command(flatten)]
        grid: GridArgs,

        /// Print the final grid as JSON
        #[arg(long)]
        json: bool,

        /// Clicks in order, as row-col (e.g. 0-0 0-1)
        #[arg(required = true)]
        clicks: Vec<Position>,
    },
}

/// Options shared by every command that builds a grid.
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Path to a TOML grid config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid dimension (overrides the config file)
    #[arg(long)]
    pub size: Option<usize>,

    /// Lock threshold (overrides the config file)
    #[arg(long)]
    pub lock_threshold: Option<CellValue>,
}

impl GridArgs {
    /// Loads the config file, if any, then applies flag overrides.
    #[instrument(skip(self))]
    pub fn resolve(&self) -> Result<GridConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GridConfig::from_file(path)?,
            None => {
                info!("No config file given, using defaults");
                GridConfig::default()
            }
        };

        if let Some(size) = self.size {
            info!(size, "Overriding grid size");
            config = config.with_grid_size(size)?;
        }
        if let Some(threshold) = self.lock_threshold {
            info!(threshold, "Overriding lock threshold");
            config = config.with_lock_threshold(threshold)?;
        }

        Ok(config)
    }
}
