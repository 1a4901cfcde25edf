//! Level/XP progression driven by task completion toggles.
//!
//! # Invariants
//! - `compute_level_requirement` is strictly increasing in `level`.
//! - `xp` and `total_tasks_completed` never go below zero.
//! - `level` never decreases: XP withdrawn after a level-up only drains the
//!   current level's bank, floored at zero.

use crate::model::profile::{Priority, Profile};

/// XP needed to advance from `level` to `level + 1`: `100 + level² × 20`.
pub fn compute_level_requirement(level: u32) -> u64 {
    let level = u64::from(level);
    level
        .saturating_mul(level)
        .saturating_mul(20)
        .saturating_add(100)
}

/// Applies one task completion transition and returns the normalized profile.
///
/// `false -> true` adds the priority XP and one completion, `true -> false`
/// withdraws them. Same-state calls leave XP and the counter untouched but
/// still normalize. Task identity is not inspected, so repeated calls add up.
pub fn apply_task_toggle(
    profile: &Profile,
    was_completed: bool,
    now_completed: bool,
    priority: Priority,
) -> Profile {
    let delta = i64::from(priority.xp_delta());
    let mut xp = i64::from(profile.xp);
    let mut completed = profile.total_tasks_completed;

    match (was_completed, now_completed) {
        (false, true) => {
            xp += delta;
            completed = completed.saturating_add(1);
        }
        (true, false) => {
            xp -= delta;
            completed = completed.saturating_sub(1);
        }
        _ => {}
    }

    // i64 arithmetic keeps the negative case representable before the floor.
    let mut xp = u64::try_from(xp).unwrap_or(0);
    let mut level = profile.level.max(1);
    loop {
        let requirement = compute_level_requirement(level);
        if xp < requirement {
            break;
        }
        xp -= requirement;
        level = level.saturating_add(1);
    }

    Profile {
        level,
        // xp < requirement(level) and the starting value fit in u32.
        xp: u32::try_from(xp).unwrap_or(u32::MAX),
        total_tasks_completed: completed,
    }
}

/// Progress towards the next level as a whole percentage, capped at 100.
pub fn xp_progress_percent(profile: &Profile) -> u8 {
    let requirement = compute_level_requirement(profile.level.max(1));
    let xp = u64::from(profile.xp);
    let rounded = (xp.saturating_mul(100) + requirement / 2) / requirement;
    u8::try_from(rounded.min(100)).unwrap_or(100)
}
