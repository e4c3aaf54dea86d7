//! Contract-based validation for clicks.
//!
//! Contracts pair a precondition on the input snapshot with
//! postconditions relating the input to the produced result: {P} click {Q}.

use super::action::{Click, ClickError};
use super::invariants::{GridInvariants, InvariantSet};
use super::rules::in_bounds;
use super::{GridState, RippleResult};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A, R> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ClickError>;

    /// Checks postconditions relating the input state to the outcome.
    fn post(before: &S, action: &A, after: &R) -> Result<(), ClickError>;
}

// ─────────────────────────────────────────────────────────────
//  Click Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the clicked cell exists.
pub struct InBounds;

impl InBounds {
    /// Rejects positions outside the grid.
    #[instrument(skip(state))]
    pub fn check(click: &Click, state: &GridState) -> Result<(), ClickError> {
        if in_bounds(click.position, state.size()) {
            Ok(())
        } else {
            Err(ClickError::OutOfBounds {
                position: click.position,
                size: state.size(),
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Click Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: the clicked cell went up by exactly one.
pub struct ClickedCellIncremented;

impl ClickedCellIncremented {
    /// Checks the clicked cell's delta.
    pub fn holds(before: &GridState, click: &Click, after: &RippleResult) -> bool {
        let old = before.get(click.position);
        let new = after.state().get(click.position);
        let valid = matches!((old, new), (Some(o), Some(n)) if n == o.saturating_add(1));
        if !valid {
            warn!(?old, ?new, "Clicked cell not incremented by one");
        }
        valid
    }
}

/// Postcondition: only the clicked cell and the affected set changed.
pub struct OnlyAffectedChanged;

impl OnlyAffectedChanged {
    /// Checks that every other cell kept its value.
    pub fn holds(before: &GridState, click: &Click, after: &RippleResult) -> bool {
        if before.size() != after.state().size() {
            warn!("Grid size changed during click");
            return false;
        }

        let stray: Vec<_> = before
            .positions()
            .filter(|pos| *pos != click.position && !after.affected().contains(pos))
            .filter(|pos| before.get(*pos) != after.state().get(*pos))
            .collect();
        if !stray.is_empty() {
            warn!(?stray, "Cells changed outside the affected set");
        }
        stray.is_empty()
    }
}

/// Postcondition: the affected set holds at most two neighbours and never
/// the clicked cell.
pub struct AffectedNeighboursOnly;

impl AffectedNeighboursOnly {
    /// Checks the affected set's shape.
    pub fn holds(click: &Click, after: &RippleResult) -> bool {
        let origin = click.position;
        let affected = after.affected();
        let valid = affected.len() <= 2
            && affected
                .iter()
                .all(|pos| *pos == origin.right() || *pos == origin.below());
        if !valid {
            warn!(?affected, %origin, "Affected set is not a subset of the neighbours");
        }
        valid
    }
}

// ─────────────────────────────────────────────────────────────
//  Click Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for an accepted (unlocked) click.
///
/// Preconditions:
/// - Clicked cell is in bounds
///
/// Postconditions:
/// - Clicked cell incremented by exactly one
/// - Only the clicked cell and affected neighbours changed
/// - Affected set is drawn from the right and bottom neighbours
/// - Grid invariants hold
pub struct ClickContract;

impl Contract<GridState, Click, RippleResult> for ClickContract {
    fn pre(state: &GridState, action: &Click) -> Result<(), ClickError> {
        InBounds::check(action, state)
    }

    fn post(before: &GridState, action: &Click, after: &RippleResult) -> Result<(), ClickError> {
        let mut failures = Vec::new();

        if !ClickedCellIncremented::holds(before, action, after) {
            failures.push("clicked cell must increase by exactly 1".to_string());
        }
        if !OnlyAffectedChanged::holds(before, action, after) {
            failures.push("only the clicked cell and affected cells may change".to_string());
        }
        if !AffectedNeighboursOnly::holds(action, after) {
            failures.push("affected cells must be right or bottom neighbours".to_string());
        }
        if let Err(violations) = GridInvariants::check_all(after.state()) {
            failures.extend(violations.into_iter().map(|v| v.description));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ClickError::InvariantViolation(format!(
                "Postcondition failed: {}",
                failures.join("; ")
            )))
        }
    }
}
