//! Application state and key handling.

use crate::input::move_cursor;
use crossterm::event::KeyCode;
use ripple_grid::{ClickOutcome, GridConfig, GridSession, Position};
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Main application state.
pub struct App {
    session: GridSession,
    lock_threshold: ripple_grid::CellValue,
    cursor: Position,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(config: &GridConfig) -> Self {
        Self {
            session: GridSession::new(config),
            lock_threshold: *config.lock_threshold(),
            cursor: Position::new(0, 0),
            status_message: "Click a cell to start.".to_string(),
            should_quit: false,
        }
    }

    /// The click session.
    pub fn session(&self) -> &GridSession {
        &self.session
    }

    /// The lock threshold in use.
    pub fn lock_threshold(&self) -> ripple_grid::CellValue {
        self.lock_threshold
    }

    /// The cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one key press.
    #[instrument(skip(self, now))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                debug!("Quit requested");
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.click(now),
            code => {
                self.cursor = move_cursor(self.cursor, code, self.session.state().size());
            }
        }
    }

    /// Expires ripple highlights.
    pub fn tick(&mut self, now: Instant) {
        if self.session.tick(now) {
            debug!("Ripple highlight expired");
        }
    }

    /// Clicks the cell under the cursor.
    fn click(&mut self, now: Instant) {
        let pos = self.cursor;
        // Locked cells are not clickable; the session would ignore them anyway.
        if self.session.is_locked(pos) {
            self.status_message = format!("Cell {} is locked.", pos);
            return;
        }

        match self.session.click(pos, now) {
            Ok(ClickOutcome::Applied(result)) => {
                let value = result.state().get(pos).unwrap_or_default();
                self.status_message = if result.affected().is_empty() {
                    format!("Cell {} is now {}.", pos, value)
                } else {
                    let hit = result
                        .affected()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("Cell {} is now {}; rippled into {}.", pos, value, hit)
                };
            }
            Ok(ClickOutcome::Ignored) => {
                self.status_message = format!("Cell {} is locked.", pos);
            }
            Err(e) => {
                warn!(error = %e, "Click failed");
                self.status_message = format!("Click error: {}", e);
            }
        }
    }

    /// Restarts with an all-zero grid.
    pub fn restart(&mut self) {
        debug!("Restarting grid");
        self.session.reset();
        self.cursor = Position::new(0, 0);
        self.status_message = "Grid reset.".to_string();
    }
}
