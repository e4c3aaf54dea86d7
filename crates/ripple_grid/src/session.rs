//! Click session: owns the current grid and feeds the highlight overlay.

use super::action::{Click, ClickError, ClickOutcome};
use super::config::GridConfig;
use super::contracts::{ClickContract, Contract};
use super::highlight::RippleHighlight;
use super::rules::RippleEngine;
use super::{GridState, Position};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Owner of the live grid for one player.
///
/// Every accepted click replaces the grid wholesale; snapshots handed out
/// earlier keep their values.
#[derive(Debug, Clone)]
pub struct GridSession {
    engine: RippleEngine,
    size: usize,
    state: GridState,
    highlight: RippleHighlight,
    clicks: u64,
}

impl GridSession {
    /// Creates a session with an all-zero grid.
    #[instrument]
    pub fn new(config: &GridConfig) -> Self {
        let size = *config.grid_size();
        Self {
            engine: RippleEngine::new(*config.lock_threshold()),
            size,
            state: GridState::new(size),
            highlight: RippleHighlight::new(config.ripple_duration()),
            clicks: 0,
        }
    }

    /// The current grid snapshot.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// The engine in use.
    pub fn engine(&self) -> &RippleEngine {
        &self.engine
    }

    /// The highlight overlay.
    pub fn highlight(&self) -> &RippleHighlight {
        &self.highlight
    }

    /// Number of clicks applied since creation or the last reset.
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// Whether the cell at `pos` is locked. Off-grid positions are not.
    pub fn is_locked(&self, pos: Position) -> bool {
        self.state
            .get(pos)
            .is_some_and(|value| self.engine.is_locked(value))
    }

    /// Applies one click.
    ///
    /// Locked targets are ignored without calling the engine. Postconditions
    /// are verified in debug builds only.
    #[instrument(skip(self, now), fields(clicks = self.clicks))]
    pub fn click(&mut self, pos: Position, now: Instant) -> Result<ClickOutcome, ClickError> {
        let click = Click::new(pos);
        ClickContract::pre(&self.state, &click)?;

        if self.is_locked(pos) {
            debug!(%pos, "Cell locked, click ignored");
            return Ok(ClickOutcome::Ignored);
        }

        let result = self.engine.apply(&self.state, pos);

        #[cfg(debug_assertions)]
        ClickContract::post(&self.state, &click, &result)?;

        self.highlight.flash(result.affected(), now);
        self.state = result.state().clone();
        self.clicks += 1;
        debug!(%pos, affected = ?result.affected(), "Click applied");

        Ok(ClickOutcome::Applied(result))
    }

    /// Applies clicks in order, each against the previous click's grid.
    ///
    /// Stops at the first out-of-bounds click; earlier clicks stay applied.
    #[instrument(skip(self, clicks, now))]
    pub fn replay(
        &mut self,
        clicks: impl IntoIterator<Item = Position>,
        now: Instant,
    ) -> Result<Vec<ClickOutcome>, ClickError> {
        clicks
            .into_iter()
            .map(|pos| self.click(pos, now))
            .collect()
    }

    /// Expires the highlight overlay. Returns whether anything was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.highlight.expire(now)
    }

    /// Restores the all-zero grid and clears the overlay.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(clicks = self.clicks, "Resetting grid");
        self.state = GridState::new(self.size);
        self.highlight.clear();
        self.clicks = 0;
    }
}

impl Default for GridSession {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}
