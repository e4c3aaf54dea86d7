//! Invariant: storage holds exactly size² cells.

use super::Invariant;
use crate::GridState;
use tracing::{instrument, warn};

/// Cell count equals the square of the grid dimension.
pub struct SquareShape;

impl Invariant<GridState> for SquareShape {
    #[instrument(skip(state))]
    fn holds(state: &GridState) -> bool {
        let expected = state.size() * state.size();
        let found = state.cells().len();
        let valid = found == expected && state.size() > 0;
        if !valid {
            warn!(expected, found, "Grid shape violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Grid must hold size x size cells"
    }
}
