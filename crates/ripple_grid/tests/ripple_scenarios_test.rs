//! Tests for ripple propagation against concrete grid scenarios.

use ripple_grid::{AffectedSet, GridState, LOCK_THRESHOLD, Position, apply_ripple, is_locked};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn keys(affected: &AffectedSet) -> Vec<String> {
    affected.iter().map(ToString::to_string).collect()
}

/// Clicks (0,0) `n` times on a fresh 3x3 grid.
fn clicked(n: usize) -> GridState {
    (0..n).fold(GridState::default(), |state, _| {
        apply_ripple(&state, pos(0, 0)).into_parts().0
    })
}

#[test]
fn test_lock_predicate_matches_threshold() {
    for v in 0..40 {
        assert_eq!(is_locked(v), v >= 15, "value {v}");
    }
    assert_eq!(LOCK_THRESHOLD, 15);
}

#[test]
fn test_first_click_on_zero_has_no_ripple() {
    let result = apply_ripple(&GridState::default(), pos(0, 0));
    assert_eq!(result.state().get(pos(0, 0)), Some(1));
    assert!(result.affected().is_empty());
}

#[test]
fn test_multiple_of_three_decrements_right_neighbour() {
    let state = clicked(2);
    assert_eq!(state.get(pos(0, 0)), Some(2));

    let result = apply_ripple(&state, pos(0, 0));
    assert_eq!(result.state().get(pos(0, 0)), Some(3));
    // Already zero, clamped.
    assert_eq!(result.state().get(pos(0, 1)), Some(0));
    assert_eq!(keys(result.affected()), vec!["0-1"]);
}

#[test]
fn test_multiple_of_five_increments_bottom_neighbour() {
    let state = GridState::from_rows(vec![vec![4, 0, 0], vec![0; 3], vec![0; 3]]).unwrap();
    let result = apply_ripple(&state, pos(0, 0));
    assert_eq!(result.state().get(pos(0, 0)), Some(5));
    assert_eq!(result.state().get(pos(1, 0)), Some(2));
    assert_eq!(keys(result.affected()), vec!["1-0"]);
}

#[test]
fn test_multiple_of_fifteen_fires_both_rules_and_locks() {
    let state = GridState::from_rows(vec![vec![14, 6, 0], vec![1, 0, 0], vec![0; 3]]).unwrap();
    let result = apply_ripple(&state, pos(0, 0));

    assert_eq!(result.state().get(pos(0, 0)), Some(15));
    assert_eq!(result.state().get(pos(0, 1)), Some(5));
    assert_eq!(result.state().get(pos(1, 0)), Some(3));
    assert_eq!(keys(result.affected()), vec!["0-1", "1-0"]);

    let next = result.state().clone();
    let again = apply_ripple(&next, pos(0, 0));
    assert!(again.is_noop(&next));
}

#[test]
fn test_locked_right_neighbour_untouched() {
    let state = GridState::from_rows(vec![vec![2, 15, 0], vec![0; 3], vec![0; 3]]).unwrap();
    let result = apply_ripple(&state, pos(0, 0));
    assert_eq!(result.state().get(pos(0, 0)), Some(3));
    assert_eq!(result.state().get(pos(0, 1)), Some(15));
    assert!(result.affected().is_empty());
}

#[test]
fn test_locked_bottom_neighbour_untouched() {
    let state = GridState::from_rows(vec![vec![9, 0, 0], vec![20, 0, 0], vec![0; 3]]).unwrap();
    let result = apply_ripple(&state, pos(0, 0));
    assert_eq!(result.state().get(pos(0, 0)), Some(10));
    assert_eq!(result.state().get(pos(1, 0)), Some(20));
    assert!(result.affected().is_empty());
}

#[test]
fn test_locked_target_guard_is_idempotent() {
    let state = GridState::from_rows(vec![vec![0, 0], vec![0, 30]]).unwrap();
    let first = apply_ripple(&state, pos(1, 1));
    let second = apply_ripple(&state, pos(1, 1));

    assert_eq!(first, second);
    assert!(first.is_noop(&state));
    assert!(second.is_noop(&state));
}

#[test]
fn test_clicked_cell_always_increments_by_one() {
    let rows = vec![vec![2, 4, 9], vec![14, 0, 7], vec![1, 13, 5]];
    let state = GridState::from_rows(rows).unwrap();

    for target in state.positions() {
        let before = state.get(target).unwrap();
        let result = apply_ripple(&state, target);
        assert_eq!(result.state().get(target), Some(before + 1), "cell {target}");
        assert!(!result.affected().contains(&target));
    }
}

#[test]
fn test_neighbour_deltas_follow_divisibility() {
    // Exhaustive over the clicked cell's pre-click value on a 2x2 grid with
    // unlocked neighbours at 5.
    for v in 0..15 {
        let state = GridState::from_rows(vec![vec![v, 5], vec![5, 5]]).unwrap();
        let result = apply_ripple(&state, pos(0, 0));
        let new_value = v + 1;

        let right = result.state().get(pos(0, 1)).unwrap();
        let below = result.state().get(pos(1, 0)).unwrap();

        if new_value % 3 == 0 {
            assert_eq!(right, 4, "value {new_value}");
            assert!(result.affected().contains(&pos(0, 1)));
        } else {
            assert_eq!(right, 5, "value {new_value}");
            assert!(!result.affected().contains(&pos(0, 1)));
        }

        if new_value % 5 == 0 {
            assert_eq!(below, 7, "value {new_value}");
            assert!(result.affected().contains(&pos(1, 0)));
        } else {
            assert_eq!(below, 5, "value {new_value}");
            assert!(!result.affected().contains(&pos(1, 0)));
        }

        assert_eq!(result.state().get(pos(1, 1)), Some(5));
    }
}

#[test]
fn test_no_wraparound_from_bottom_right() {
    let state = GridState::from_rows(vec![vec![0; 3], vec![0; 3], vec![0, 0, 14]]).unwrap();
    let result = apply_ripple(&state, pos(2, 2));
    assert_eq!(result.state().get(pos(2, 2)), Some(15));
    assert!(result.affected().is_empty());
    assert_eq!(result.state().cells().iter().sum::<i32>(), 15);
}

#[test]
fn test_input_snapshot_never_modified() {
    let state = GridState::from_rows(vec![vec![14, 3, 0], vec![3, 0, 0], vec![0; 3]]).unwrap();
    let copy: Vec<_> = state.cells().to_vec();
    let _ = apply_ripple(&state, pos(0, 0));
    assert_eq!(state.cells(), copy.as_slice());
}

#[test]
fn test_larger_grid_generalises() {
    let mut state = GridState::new(5);
    for _ in 0..5 {
        state = apply_ripple(&state, pos(3, 4)).into_parts().0;
    }
    // 3 fired the right rule at the edge (skipped); 5 fired the bottom rule.
    assert_eq!(state.get(pos(3, 4)), Some(5));
    assert_eq!(state.get(pos(4, 4)), Some(2));
}
