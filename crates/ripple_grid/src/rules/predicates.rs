//! Pure predicates over cell values and positions.

use super::super::config::LOCK_THRESHOLD;
use super::super::{CellValue, Position};

/// Whether a value is locked under the default threshold.
pub fn is_locked(value: CellValue) -> bool {
    locked_at(value, LOCK_THRESHOLD)
}

/// Whether a value is locked under an explicit threshold.
///
/// Locking is a read-time property of the value; nothing stores it.
pub fn locked_at(value: CellValue, threshold: CellValue) -> bool {
    value >= threshold
}

/// Whether both coordinates lie in `[0, size)`.
pub fn in_bounds(pos: Position, size: usize) -> bool {
    pos.row < size && pos.col < size
}

/// Floors a value at zero.
///
/// Applied to every decrement before it is written back.
pub fn clamp(value: CellValue) -> CellValue {
    value.max(0)
}
