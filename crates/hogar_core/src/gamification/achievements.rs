//! Achievement catalog generation and evaluation.
//!
//! # Responsibility
//! - Build the fixed 100-entry milestone catalog.
//! - Re-stamp `unlocked` for a whole catalog against one profile.
//! - Provide display helpers (filter/search/summary) over evaluated lists.
//!
//! # Invariants
//! - Evaluation preserves catalog order, count and every field except `unlocked`.
//! - Evaluation is idempotent and has no latch: a lower profile re-locks entries.
//! - Catalog order: level milestones 1..=50, then task milestones 10..=500.

use crate::model::achievement::Achievement;
use crate::model::profile::Profile;
use std::collections::HashSet;

/// Number of level milestones in the generated catalog.
pub const LEVEL_MILESTONES: u32 = 50;
/// Number of task-count milestones in the generated catalog.
pub const TASK_MILESTONES: u32 = 50;
/// Completed-task spacing between consecutive task milestones.
pub const TASK_MILESTONE_STEP: u32 = 10;

/// Returns whether `achievement` is satisfied by `profile`.
///
/// Absent requirements are vacuously satisfied.
pub fn is_unlocked(profile: &Profile, achievement: &Achievement) -> bool {
    let level_ok = achievement
        .level_req
        .map_or(true, |required| profile.level >= required);
    let tasks_ok = achievement
        .tasks_req
        .map_or(true, |required| profile.total_tasks_completed >= required);
    level_ok && tasks_ok
}

/// Recomputes `unlocked` for every achievement against `profile`.
pub fn evaluate(profile: &Profile, achievements: &[Achievement]) -> Vec<Achievement> {
    achievements
        .iter()
        .map(|achievement| Achievement {
            unlocked: is_unlocked(profile, achievement),
            ..achievement.clone()
        })
        .collect()
}

/// Builds the default catalog, all entries locked.
pub fn generate_catalog() -> Vec<Achievement> {
    let levels = (1..=LEVEL_MILESTONES).map(Achievement::level_milestone);
    let tasks =
        (1..=TASK_MILESTONES).map(|step| Achievement::tasks_milestone(step * TASK_MILESTONE_STEP));
    levels.chain(tasks).collect()
}

/// Default profile plus a freshly generated catalog evaluated against it.
///
/// Previously persisted catalog state is never consulted.
pub fn reset() -> (Profile, Vec<Achievement>) {
    let profile = Profile::default();
    let catalog = evaluate(&profile, &generate_catalog());
    (profile, catalog)
}

/// Achievements unlocked in `after` that were not unlocked in `before`, by id.
pub fn newly_unlocked(before: &[Achievement], after: &[Achievement]) -> Vec<Achievement> {
    let previously: HashSet<&str> = before
        .iter()
        .filter(|achievement| achievement.unlocked)
        .map(|achievement| achievement.id.as_str())
        .collect();
    after
        .iter()
        .filter(|achievement| achievement.unlocked && !previously.contains(achievement.id.as_str()))
        .cloned()
        .collect()
}

/// Status filter used by achievement listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AchievementFilter {
    #[default]
    All,
    Unlocked,
    Pending,
}

impl AchievementFilter {
    fn accepts(self, achievement: &Achievement) -> bool {
        match self {
            Self::All => true,
            Self::Unlocked => achievement.unlocked,
            Self::Pending => !achievement.unlocked,
        }
    }
}

/// Applies status filter and case-insensitive text search over title/description.
///
/// A blank `query` matches everything.
pub fn filter_achievements(
    achievements: &[Achievement],
    filter: AchievementFilter,
    query: &str,
) -> Vec<Achievement> {
    let needle = query.trim().to_lowercase();
    achievements
        .iter()
        .filter(|achievement| filter.accepts(achievement))
        .filter(|achievement| {
            needle.is_empty()
                || achievement.title.to_lowercase().contains(&needle)
                || achievement.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Unlocked/total counters for a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementSummary {
    pub unlocked: usize,
    pub total: usize,
}

/// Counts unlocked entries against the catalog size.
pub fn summarize(achievements: &[Achievement]) -> AchievementSummary {
    AchievementSummary {
        unlocked: achievements.iter().filter(|a| a.unlocked).count(),
        total: achievements.len(),
    }
}
