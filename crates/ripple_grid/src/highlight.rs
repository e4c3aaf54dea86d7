//! Short-lived highlight overlay for cells hit by a ripple.
//!
//! The overlay is purely cosmetic. The engine never reads or writes it;
//! the session feeds it each click's affected set and callers poll it
//! with the current time.

use crate::types::{AffectedSet, Position};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Positions currently lit, with an explicit expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleHighlight {
    duration: Duration,
    lit: AffectedSet,
    expires_at: Option<Instant>,
}

impl RippleHighlight {
    /// Creates an empty overlay whose flashes last `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            lit: AffectedSet::new(),
            expires_at: None,
        }
    }

    /// Lights `affected` until `now + duration`.
    ///
    /// A new flash replaces whatever was lit before, including its expiry.
    /// An empty set leaves the overlay as it was.
    #[instrument(skip(self, now))]
    pub fn flash(&mut self, affected: &AffectedSet, now: Instant) {
        if affected.is_empty() {
            return;
        }
        self.lit = affected.clone();
        self.expires_at = Some(now + self.duration);
        debug!(count = self.lit.len(), "Highlight flashed");
    }

    /// Whether `pos` is lit at time `now`.
    pub fn is_lit(&self, pos: Position, now: Instant) -> bool {
        self.is_active(now) && self.lit.contains(&pos)
    }

    /// Whether anything is lit at time `now`.
    pub fn is_active(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now < deadline)
    }

    /// Lit positions, ignoring expiry.
    pub fn lit(&self) -> &AffectedSet {
        &self.lit
    }

    /// Drops the lit set once it has expired. Returns whether it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Clears the overlay immediately.
    pub fn clear(&mut self) {
        self.lit.clear();
        self.expires_at = None;
    }
}
