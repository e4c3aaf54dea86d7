//! Ripple grid - pure click-propagation logic for an N×N number grid.
//!
//! Clicking a cell increments it. If the new value is a multiple of 3 the
//! right neighbour loses 1 (never below zero); if it is a multiple of 5
//! the bottom neighbour gains 2. Cells at or above the lock threshold
//! ignore clicks and ripples.
//!
//! # Architecture
//!
//! - **Types**: [`GridState`] snapshots, [`Position`], [`RippleResult`]
//! - **Rules**: predicates and the [`RippleEngine`]
//! - **Session**: [`GridSession`] owns the live grid for a front end
//! - **Style / Highlight**: cosmetic helpers for renderers
//!
//! # Example
//!
//! ```
//! use ripple_grid::{GridState, Position, apply_ripple};
//!
//! let grid = GridState::default();
//! let result = apply_ripple(&grid, Position::new(0, 0));
//! assert_eq!(result.state().get(Position::new(0, 0)), Some(1));
//! assert!(result.affected().is_empty());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod contracts;
mod highlight;
mod session;
mod style;
mod types;

pub mod invariants;
pub mod rules;

// Crate-level exports - Core types
pub use types::{AffectedSet, CellValue, GridError, GridState, Position, RippleResult};

// Crate-level exports - Configuration
pub use config::{
    ConfigError, GRID_SIZE, GridConfig, LOCK_THRESHOLD, MAX_GRID_SIZE, RIPPLE_DURATION_MS,
};

// Crate-level exports - Rules
pub use rules::{RippleEngine, RippleRule, apply_ripple, clamp, in_bounds, is_locked, locked_at};

// Crate-level exports - Clicks and contracts
pub use action::{Click, ClickError, ClickOutcome};
pub use contracts::{ClickContract, Contract};

// Crate-level exports - Session
pub use session::GridSession;

// Crate-level exports - Presentation helpers
pub use highlight::RippleHighlight;
pub use style::{CellTone, Rgb, cell_background, cell_label, cell_text_color};

/// Creates the initial all-zero grid of the given size.
pub fn create_initial_grid(size: usize) -> GridState {
    GridState::new(size)
}
