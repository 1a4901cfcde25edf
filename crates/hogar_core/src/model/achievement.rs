//! Achievement definition plus its current unlocked flag.
//!
//! # Invariants
//! - `id` is stable across evaluations and never regenerated.
//! - `unlocked` is derived from the current profile, never set independently.
//! - An achievement with no requirement is vacuously unlocked.

use serde::{Deserialize, Serialize};

/// One unlockable milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unlocked: bool,
    /// Minimum profile level, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_req: Option<u32>,
    /// Minimum net completed tasks, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_req: Option<u32>,
}

impl Achievement {
    /// Level milestone `lvl-{level}`, initially locked.
    pub fn level_milestone(level: u32) -> Self {
        Self {
            id: format!("lvl-{level}"),
            title: format!("Nivel {level}"),
            description: format!("Alcanza el nivel {level}"),
            unlocked: false,
            level_req: Some(level),
            tasks_req: None,
        }
    }

    /// Task-count milestone `tasks-{tasks}`, initially locked.
    pub fn tasks_milestone(tasks: u32) -> Self {
        Self {
            id: format!("tasks-{tasks}"),
            title: format!("{tasks} tareas"),
            description: format!("Completa {tasks} tareas"),
            unlocked: false,
            level_req: None,
            tasks_req: Some(tasks),
        }
    }
}
