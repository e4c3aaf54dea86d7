//! Clicks as first-class domain events.

use super::{GridState, Position, RippleResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A click on one cell.
///
/// Clicks are processed strictly in arrival order, each against the grid
/// produced by the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Click {
    /// The clicked cell.
    pub position: Position,
}

impl Click {
    /// Creates a new click.
    #[instrument]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns the clicked position.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl From<Position> for Click {
    fn from(position: Position) -> Self {
        Self::new(position)
    }
}

impl std::fmt::Display for Click {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "click {}", self.position)
    }
}

/// What a session did with a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was applied; carries the new grid and affected set.
    Applied(RippleResult),
    /// The target was locked; the grid is unchanged.
    Ignored,
}

impl ClickOutcome {
    /// Whether the grid changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, ClickOutcome::Applied(_))
    }

    /// The resulting grid, or `None` when ignored.
    pub fn state(&self) -> Option<&GridState> {
        match self {
            ClickOutcome::Applied(result) => Some(result.state()),
            ClickOutcome::Ignored => None,
        }
    }
}

/// Error that can occur when validating or applying a click.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ClickError {
    /// The clicked position is not on the grid.
    #[display("Position {} is outside the {}x{} grid", position, size, size)]
    OutOfBounds {
        /// The rejected position.
        position: Position,
        /// Grid dimension.
        size: usize,
    },

    /// A postcondition failed after applying the click.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for ClickError {}
