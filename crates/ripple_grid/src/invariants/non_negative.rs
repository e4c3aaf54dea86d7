//! Invariant: no cell is negative.

use super::Invariant;
use crate::GridState;
use tracing::{instrument, warn};

/// Every cell value is at least zero.
pub struct NonNegativeCells;

impl Invariant<GridState> for NonNegativeCells {
    #[instrument(skip(state))]
    fn holds(state: &GridState) -> bool {
        let negative = state.cells().iter().filter(|&&v| v < 0).count();
        if negative > 0 {
            warn!(negative, "Negative cell values found");
        }
        negative == 0
    }

    fn description() -> &'static str {
        "All cell values must be non-negative"
    }
}
