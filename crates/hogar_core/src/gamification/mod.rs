//! Pure gamification core.
//!
//! # Responsibility
//! - Turn task completion transitions into level/XP changes (`progression`).
//! - Recompute achievement unlock state against a profile (`achievements`).
//!
//! # Invariants
//! - Every function here is total and side-effect free; callers persist results.
//! - Evaluation always runs after progression, as two separate calls.

pub mod achievements;
pub mod progression;
