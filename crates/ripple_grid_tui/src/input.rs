//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use ripple_grid::Position;

/// Moves the cursor with arrow keys, stopping at the grid edges.
pub fn move_cursor(cursor: Position, key: KeyCode, size: usize) -> Position {
    let last = size.saturating_sub(1);
    match key {
        KeyCode::Right => Position::new(cursor.row, (cursor.col + 1).min(last)),
        KeyCode::Left => Position::new(cursor.row, cursor.col.saturating_sub(1)),
        KeyCode::Down => Position::new((cursor.row + 1).min(last), cursor.col),
        KeyCode::Up => Position::new(cursor.row.saturating_sub(1), cursor.col),
        // No change for other keys
        _ => cursor,
    }
}
