//! Core domain types for the ripple grid.

use crate::config::GRID_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::instrument;

/// A single cell's value.
///
/// Values are never negative; constructors reject negative input.
pub type CellValue = i32;

/// Positions mutated by a ripple during one click, in row-major order.
pub type AffectedSet = BTreeSet<Position>;

/// A position within the grid, zero-indexed by row and column.
///
/// Ordering is row-major, so sets of positions iterate top-left first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The orthogonal neighbour to the right. May lie outside the grid.
    pub const fn right(self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    /// The orthogonal neighbour below. May lie outside the grid.
    pub const fn below(self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    /// Converts to a row-major index for a grid of the given size.
    ///
    /// Returns `None` when the position is out of bounds.
    pub fn to_index(self, size: usize) -> Option<usize> {
        (self.row < size && self.col < size).then_some(self.row * size + self.col)
    }

    /// Creates a position from a row-major index.
    pub fn from_index(index: usize, size: usize) -> Option<Self> {
        (size > 0 && index < size * size).then(|| Self::new(index / size, index % size))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl std::str::FromStr for Position {
    type Err = GridError;

    /// Parses `row-col` (the display format) or `row,col`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (row, col) = s
            .split_once('-')
            .or_else(|| s.split_once(','))
            .ok_or_else(|| GridError::InvalidPosition(s.to_string()))?;

        let row = row
            .trim()
            .parse()
            .map_err(|_| GridError::InvalidPosition(s.to_string()))?;
        let col = col
            .trim()
            .parse()
            .map_err(|_| GridError::InvalidPosition(s.to_string()))?;

        Ok(Self::new(row, col))
    }
}

/// Error raised when building a grid or a position from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GridError {
    /// The grid has no rows.
    #[display("Grid must have at least one row")]
    Empty,

    /// A row's length differs from the number of rows.
    #[display("Row {} has {} cells, expected {}", row, found, expected)]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Expected row length (the number of rows).
        expected: usize,
        /// Actual row length.
        found: usize,
    },

    /// A cell holds a negative value.
    #[display("Cell {} has negative value {}", position, value)]
    NegativeValue {
        /// Offending cell.
        position: Position,
        /// The negative value.
        value: CellValue,
    },

    /// Text could not be parsed as a position.
    #[display("Invalid position '{}' (expected row-col)", _0)]
    InvalidPosition(String),
}

impl std::error::Error for GridError {}

/// Immutable N×N snapshot of cell values, stored row-major.
///
/// Clones share storage; [`GridState::with_value`] copies on write, so a
/// snapshot observed by one reader never changes underneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<CellValue>>", into = "Vec<Vec<CellValue>>")]
pub struct GridState {
    size: usize,
    cells: Arc<Vec<CellValue>>,
}

impl GridState {
    /// Creates an all-zero grid of the given size.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: Arc::new(vec![0; size * size]),
        }
    }

    /// Builds a grid from rows, validating shape and values.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            for (col, value) in values.into_iter().enumerate() {
                if value < 0 {
                    return Err(GridError::NegativeValue {
                        position: Position::new(row, col),
                        value,
                    });
                }
                cells.push(value);
            }
        }

        Ok(Self {
            size,
            cells: Arc::new(cells),
        })
    }

    /// Grid dimension (number of rows and of columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the value at a position, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<CellValue> {
        pos.to_index(self.size).map(|i| self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        // chunks(0) panics; an empty grid has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size * size).map(move |i| Position::new(i / size, i % size))
    }

    /// Returns a new snapshot with one cell replaced.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn with_value(&self, pos: Position, value: CellValue) -> Self {
        let mut next = self.clone();
        next.set(pos, value);
        next
    }

    /// Writes a cell, copying the storage first if it is shared.
    pub(crate) fn set(&mut self, pos: Position, value: CellValue) {
        let size = self.size;
        let index = pos
            .to_index(size)
            .unwrap_or_else(|| panic!("position {pos} outside {size}x{size} grid"));
        Arc::make_mut(&mut self.cells)[index] = value;
    }

    /// Whether two snapshots share the same storage.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.cells, &b.cells)
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl PartialEq for GridState {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for GridState {}

impl TryFrom<Vec<Vec<CellValue>>> for GridState {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<CellValue>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<GridState> for Vec<Vec<CellValue>> {
    fn from(state: GridState) -> Self {
        state.rows().map(<[CellValue]>::to_vec).collect()
    }
}

impl std::fmt::Display for GridState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .cells
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);

        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                let sep = vec!["-".repeat(width); self.size].join("-+-");
                writeln!(f)?;
                writeln!(f, "{sep}")?;
            }
            let line = row
                .iter()
                .map(|v| format!("{v:>width$}"))
                .collect::<Vec<_>>()
                .join(" | ");
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Outcome of one ripple: the next snapshot plus the neighbours it mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleResult {
    state: GridState,
    affected: AffectedSet,
}

impl RippleResult {
    /// Creates a new result.
    pub fn new(state: GridState, affected: AffectedSet) -> Self {
        Self { state, affected }
    }

    /// The resulting grid.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Neighbour positions mutated by the ripple.
    pub fn affected(&self) -> &AffectedSet {
        &self.affected
    }

    /// Whether this result is the untouched input (locked-cell guard).
    pub fn is_noop(&self, input: &GridState) -> bool {
        self.affected.is_empty() && GridState::ptr_eq(&self.state, input)
    }

    /// Splits into state and affected set.
    pub fn into_parts(self) -> (GridState, AffectedSet) {
        (self.state, self.affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_zeros() {
        let grid = GridState::new(3);
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cells(), &[0; 9]);
    }

    #[test]
    fn test_with_value_leaves_source_untouched() {
        let grid = GridState::new(3);
        let next = grid.with_value(Position::new(1, 2), 7);

        assert_eq!(grid.get(Position::new(1, 2)), Some(0));
        assert_eq!(next.get(Position::new(1, 2)), Some(7));
        assert!(!GridState::ptr_eq(&grid, &next));
    }

    #[test]
    fn test_clone_shares_storage() {
        let grid = GridState::new(3);
        let copy = grid.clone();
        assert!(GridState::ptr_eq(&grid, &copy));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = GridState::from_rows(vec![vec![0, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_negative() {
        let err = GridState::from_rows(vec![vec![0, -1], vec![0, 0]]).unwrap_err();
        assert!(matches!(err, GridError::NegativeValue { value: -1, .. }));
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert_eq!(GridState::from_rows(vec![]), Err(GridError::Empty));
    }

    #[test]
    fn test_position_display_and_parse() {
        let pos = Position::new(0, 1);
        assert_eq!(pos.to_string(), "0-1");
        assert_eq!("0-1".parse::<Position>(), Ok(pos));
        assert_eq!(" 2,0 ".parse::<Position>(), Ok(Position::new(2, 0)));
        assert!("banana".parse::<Position>().is_err());
        assert!("1-x".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_ordering_is_row_major() {
        let set: AffectedSet = [Position::new(1, 0), Position::new(0, 1)].into_iter().collect();
        let order: Vec<_> = set.into_iter().collect();
        assert_eq!(order, vec![Position::new(0, 1), Position::new(1, 0)]);
    }

    #[test]
    fn test_index_conversion() {
        assert_eq!(Position::new(2, 1).to_index(3), Some(7));
        assert_eq!(Position::new(3, 0).to_index(3), None);
        assert_eq!(Position::from_index(7, 3), Some(Position::new(2, 1)));
        assert_eq!(Position::from_index(9, 3), None);
    }

    #[test]
    fn test_display() {
        let grid = GridState::from_rows(vec![vec![1, 12], vec![0, 3]]).unwrap();
        assert_eq!(grid.to_string(), " 1 | 12\n---+---\n 0 |  3");
    }
}
