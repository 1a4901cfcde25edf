//! Household task use-case service.
//!
//! # Responsibility
//! - Keep the persisted task list (add/toggle/delete).
//! - Route completion transitions into gamification.
//!
//! # Invariants
//! - New tasks are prepended and start pending.
//! - Only `toggle_task` changes XP; deleting a completed task does not revert it.
//! - Task titles are trimmed and never logged.

use crate::model::profile::Priority;
use crate::model::task::{pending_first, Task, TaskId};
use crate::service::gamification_service::{GamificationService, ToggleOutcome};
use crate::store::GamificationStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskServiceError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Target task does not exist.
    TaskNotFound(TaskId),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for TaskServiceError {}

/// Result of toggling one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskToggleResult {
    pub task: Task,
    pub gamification: ToggleOutcome,
}

pub struct TaskService<S: GamificationStore> {
    gamification: GamificationService<S>,
}

impl<S: GamificationStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self {
            gamification: GamificationService::new(store),
        }
    }

    /// Gamification service sharing this service's store.
    pub fn gamification(&self) -> &GamificationService<S> {
        &self.gamification
    }

    /// Tasks in display order: pending first, then completed.
    pub fn list_tasks(&self) -> Vec<Task> {
        pending_first(&self.gamification.store().load_tasks())
    }

    /// Number of tasks not yet completed.
    pub fn pending_count(&self) -> usize {
        self.gamification
            .store()
            .load_tasks()
            .iter()
            .filter(|task| !task.completed)
            .count()
    }

    pub fn add_task(
        &self,
        title: impl Into<String>,
        priority: Priority,
    ) -> Result<Task, TaskServiceError> {
        let title = title.into();
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskServiceError::EmptyTitle);
        }

        let task = Task::new(title, priority);
        let store = self.gamification.store();
        let mut tasks = store.load_tasks();
        tasks.insert(0, task.clone());
        store.save_tasks(&tasks);

        info!(
            "event=task_add module=service status=ok task_id={} priority={}",
            task.id,
            priority.as_str()
        );
        Ok(task)
    }

    /// Flips completion of one task and applies the matching XP transition.
    pub fn toggle_task(&self, id: TaskId) -> Result<TaskToggleResult, TaskServiceError> {
        let store = self.gamification.store();
        let mut tasks = store.load_tasks();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let was_completed = task.completed;
        task.completed = !was_completed;
        let toggled = task.clone();
        store.save_tasks(&tasks);

        let gamification =
            self.gamification
                .record_toggle(was_completed, toggled.completed, toggled.priority);
        Ok(TaskToggleResult {
            task: toggled,
            gamification,
        })
    }

    pub fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        let store = self.gamification.store();
        let mut tasks = store.load_tasks();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(TaskServiceError::TaskNotFound(id));
        }
        store.save_tasks(&tasks);
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }
}
