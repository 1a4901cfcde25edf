//! Core domain logic for Mi Hogar.
//! This crate is the single source of truth for gamification invariants.

pub mod db;
pub mod gamification;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use gamification::achievements::{
    evaluate, filter_achievements, generate_catalog, newly_unlocked, reset, summarize,
    AchievementFilter, AchievementSummary,
};
pub use gamification::progression::{
    apply_task_toggle, compute_level_requirement, xp_progress_percent,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::achievement::Achievement;
pub use model::profile::{Priority, PriorityParseError, Profile, ProfileValidationError};
pub use model::task::{Task, TaskId};
pub use service::gamification_service::{GamificationService, GamificationSnapshot, ToggleOutcome};
pub use service::task_service::{TaskService, TaskServiceError, TaskToggleResult};
pub use store::{
    Collection, DualStore, GamificationStore, SnapshotRepository, SqliteSnapshotRepository,
    StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
