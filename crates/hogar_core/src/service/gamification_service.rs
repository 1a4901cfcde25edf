//! Gamification use-case service.
//!
//! # Responsibility
//! - Orchestrate pure progression/evaluation with persistence side effects.
//! - Replace implicit re-evaluation hooks with explicit call sequences.
//!
//! # Invariants
//! - A toggle always runs `apply_task_toggle`, then `evaluate`, in that order.
//! - Every returned state is the in-memory result, regardless of write outcome.
//! - `reset` never touches task data.

use crate::gamification::achievements::{evaluate, newly_unlocked, reset, summarize};
use crate::gamification::progression::apply_task_toggle;
use crate::model::achievement::Achievement;
use crate::model::profile::{Priority, Profile};
use crate::store::GamificationStore;
use log::info;

/// Current profile plus its evaluated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamificationSnapshot {
    pub profile: Profile,
    pub achievements: Vec<Achievement>,
}

/// Result of routing one task completion transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub profile: Profile,
    pub achievements: Vec<Achievement>,
    /// Entries that flipped to unlocked because of this toggle.
    pub newly_unlocked: Vec<Achievement>,
}

/// Service facade over a `GamificationStore` implementation.
pub struct GamificationService<S: GamificationStore> {
    store: S,
}

impl<S: GamificationStore> GamificationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying gateway, shared with sibling services.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads state on startup, re-evaluates the catalog and persists it.
    ///
    /// Generates the catalog when none is stored yet.
    pub fn bootstrap(&self) -> GamificationSnapshot {
        let profile = self.store.load_profile();
        let achievements = evaluate(&profile, &self.store.load_achievements());
        self.store.save_achievements(&achievements);

        let summary = summarize(&achievements);
        info!(
            "event=gamification_bootstrap module=service status=ok level={} unlocked={} total={}",
            profile.level, summary.unlocked, summary.total
        );
        GamificationSnapshot {
            profile,
            achievements,
        }
    }

    /// Read-only view of stored state, evaluated against the stored profile.
    pub fn snapshot(&self) -> GamificationSnapshot {
        let profile = self.store.load_profile();
        let achievements = evaluate(&profile, &self.store.load_achievements());
        GamificationSnapshot {
            profile,
            achievements,
        }
    }

    /// Applies one task completion transition and re-evaluates achievements.
    pub fn record_toggle(
        &self,
        was_completed: bool,
        now_completed: bool,
        priority: Priority,
    ) -> ToggleOutcome {
        let before = self.store.load_profile();
        let profile = apply_task_toggle(&before, was_completed, now_completed, priority);
        self.store.save_profile(&profile);

        let previous = self.store.load_achievements();
        let achievements = evaluate(&profile, &previous);
        self.store.save_achievements(&achievements);

        let fresh = newly_unlocked(&previous, &achievements);
        info!(
            "event=task_toggle module=service status=ok priority={} level={} xp={} total_tasks={} newly_unlocked={}",
            priority.as_str(),
            profile.level,
            profile.xp,
            profile.total_tasks_completed,
            fresh.len()
        );
        if profile.level > before.level {
            info!(
                "event=level_up module=service status=ok from={} to={}",
                before.level, profile.level
            );
        }
        for achievement in &fresh {
            info!(
                "event=achievement_unlocked module=service status=ok id={}",
                achievement.id
            );
        }

        ToggleOutcome {
            profile,
            achievements,
            newly_unlocked: fresh,
        }
    }

    /// Resets profile and catalog to defaults and persists both.
    pub fn reset(&self) -> GamificationSnapshot {
        let (profile, achievements) = reset();
        self.store.save_profile(&profile);
        self.store.save_achievements(&achievements);
        info!("event=gamification_reset module=service status=ok");
        GamificationSnapshot {
            profile,
            achievements,
        }
    }
}
