//! Grid rules: cell predicates and ripple propagation.

pub mod predicates;
pub mod ripple;

pub use predicates::{clamp, in_bounds, is_locked, locked_at};
pub use ripple::{RippleEngine, RippleRule, apply_ripple};
