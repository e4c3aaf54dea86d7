//! Ripple propagation from a clicked cell to its right and bottom neighbours.

use super::super::config::LOCK_THRESHOLD;
use super::super::{AffectedSet, CellValue, GridState, Position, RippleResult};
use super::predicates::{clamp, in_bounds, locked_at};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// A neighbour rule triggered by the clicked cell's new value.
///
/// Rules run in declaration order, each against the grid produced by the
/// previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum RippleRule {
    /// Multiples of 3 decrement the right neighbour by 1.
    Right,
    /// Multiples of 5 increment the bottom neighbour by 2.
    Below,
}

impl RippleRule {
    /// The divisor that triggers this rule.
    pub fn divisor(self) -> CellValue {
        match self {
            RippleRule::Right => 3,
            RippleRule::Below => 5,
        }
    }

    /// The amount added to the target neighbour.
    pub fn delta(self) -> CellValue {
        match self {
            RippleRule::Right => -1,
            RippleRule::Below => 2,
        }
    }

    /// The neighbour this rule targets. May be out of bounds.
    pub fn target(self, origin: Position) -> Position {
        match self {
            RippleRule::Right => origin.right(),
            RippleRule::Below => origin.below(),
        }
    }

    /// Whether the clicked cell's new value fires this rule.
    pub fn fires_on(self, value: CellValue) -> bool {
        value % self.divisor() == 0
    }

    /// Applies the delta, flooring decrements at zero.
    fn shift(self, value: CellValue) -> CellValue {
        clamp(value.saturating_add(self.delta()))
    }
}

/// Ripple engine parameterised by lock threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleEngine {
    lock_threshold: CellValue,
}

impl RippleEngine {
    /// Creates an engine with the given lock threshold.
    pub fn new(lock_threshold: CellValue) -> Self {
        Self { lock_threshold }
    }

    /// The lock threshold.
    pub fn lock_threshold(&self) -> CellValue {
        self.lock_threshold
    }

    /// Whether a value is locked for this engine.
    pub fn is_locked(&self, value: CellValue) -> bool {
        locked_at(value, self.lock_threshold)
    }

    /// Applies a click at `pos` and propagates one hop to the neighbours.
    ///
    /// A locked target returns the input snapshot itself (shared storage)
    /// and an empty affected set. Otherwise the clicked cell is incremented
    /// by one and each [`RippleRule`] whose divisor divides the new value
    /// updates its neighbour, unless that neighbour is off the grid or
    /// locked. The clicked cell is never part of the affected set.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid. Callers check bounds first.
    #[instrument(skip(self, state), fields(size = state.size(), threshold = self.lock_threshold))]
    pub fn apply(&self, state: &GridState, pos: Position) -> RippleResult {
        let size = state.size();
        let Some(current) = state.get(pos) else {
            panic!("clicked position {pos} outside {size}x{size} grid");
        };

        if self.is_locked(current) {
            debug!(value = current, "Clicked cell is locked, ignoring");
            return RippleResult::new(state.clone(), AffectedSet::new());
        }

        let new_value = current.saturating_add(1);
        let mut next = state.clone();
        next.set(pos, new_value);
        let mut affected = AffectedSet::new();

        for rule in RippleRule::iter() {
            if !rule.fires_on(new_value) {
                continue;
            }

            let target = rule.target(pos);
            if !in_bounds(target, size) {
                debug!(%rule, %target, "Neighbour off grid, skipping");
                continue;
            }

            // In bounds, so the lookup cannot miss.
            let Some(value) = next.get(target) else {
                continue;
            };
            if self.is_locked(value) {
                debug!(%rule, %target, value, "Neighbour locked, skipping");
                continue;
            }

            let shifted = rule.shift(value);
            debug!(%rule, %target, from = value, to = shifted, "Ripple applied");
            next.set(target, shifted);
            affected.insert(target);
        }

        RippleResult::new(next, affected)
    }
}

impl Default for RippleEngine {
    fn default() -> Self {
        Self::new(LOCK_THRESHOLD)
    }
}

/// Applies a click with the default lock threshold.
///
/// See [`RippleEngine::apply`].
pub fn apply_ripple(state: &GridState, pos: Position) -> RippleResult {
    RippleEngine::default().apply(state, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<CellValue>>) -> GridState {
        GridState::from_rows(rows).unwrap()
    }

    #[test]
    fn test_rule_order_is_right_then_below() {
        let rules: Vec<_> = RippleRule::iter().collect();
        assert_eq!(rules, vec![RippleRule::Right, RippleRule::Below]);
    }

    #[test]
    fn test_plain_increment() {
        let state = GridState::new(3);
        let result = apply_ripple(&state, Position::new(1, 1));
        assert_eq!(result.state().get(Position::new(1, 1)), Some(1));
        assert!(result.affected().is_empty());
    }

    #[test]
    fn test_right_rule_decrements_neighbour() {
        let state = grid(vec![vec![2, 4, 0], vec![0; 3], vec![0; 3]]);
        let result = apply_ripple(&state, Position::new(0, 0));
        assert_eq!(result.state().get(Position::new(0, 0)), Some(3));
        assert_eq!(result.state().get(Position::new(0, 1)), Some(3));
        assert!(result.affected().contains(&Position::new(0, 1)));
    }

    #[test]
    fn test_right_rule_skipped_in_last_column() {
        let state = grid(vec![vec![0, 0, 2], vec![0, 0, 0], vec![0; 3]]);
        let result = apply_ripple(&state, Position::new(0, 2));
        assert_eq!(result.state().get(Position::new(0, 2)), Some(3));
        assert_eq!(result.state().get(Position::new(1, 0)), Some(0));
        assert!(result.affected().is_empty());
    }

    #[test]
    fn test_below_rule_skipped_in_last_row() {
        let state = grid(vec![vec![0; 3], vec![0; 3], vec![0, 4, 0]]);
        let result = apply_ripple(&state, Position::new(2, 1));
        assert_eq!(result.state().get(Position::new(2, 1)), Some(5));
        assert!(result.affected().is_empty());
    }

    #[test]
    fn test_locked_click_returns_input_snapshot() {
        let state = grid(vec![vec![15, 0], vec![0, 0]]);
        let result = apply_ripple(&state, Position::new(0, 0));
        assert!(result.is_noop(&state));
        assert_eq!(result.state(), &state);
    }

    #[test]
    fn test_custom_threshold() {
        let engine = RippleEngine::new(3);
        let state = grid(vec![vec![2, 0], vec![0, 0]]);

        let once = engine.apply(&state, Position::new(0, 0));
        assert_eq!(once.state().get(Position::new(0, 0)), Some(3));

        let twice = engine.apply(once.state(), Position::new(0, 0));
        assert!(twice.is_noop(once.state()));
    }

    #[test]
    fn test_rules_compose_against_updated_state() {
        // Right neighbour of (0,0) is (0,1); bottom neighbour is (1,0).
        // The two targets differ, but the bottom lock check must still see
        // the grid after the right rule ran.
        let state = grid(vec![vec![14, 15, 0], vec![13, 0, 0], vec![0; 3]]);
        let result = apply_ripple(&state, Position::new(0, 0));

        assert_eq!(result.state().get(Position::new(0, 0)), Some(15));
        assert_eq!(result.state().get(Position::new(0, 1)), Some(15));
        assert_eq!(result.state().get(Position::new(1, 0)), Some(15));
        let affected: Vec<_> = result.affected().iter().copied().collect();
        assert_eq!(affected, vec![Position::new(1, 0)]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_click_panics() {
        let state = GridState::new(3);
        apply_ripple(&state, Position::new(3, 0));
    }
}
