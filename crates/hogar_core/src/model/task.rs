//! Household task record.
//!
//! Only completion transitions of a task matter to gamification; the title
//! is display data and is never logged.

use crate::model::profile::Priority;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable task identifier.
pub type TaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
}

impl Task {
    /// Creates a pending task with a generated id.
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            priority,
        }
    }
}

/// Returns tasks ordered pending-first, keeping relative order otherwise.
pub fn pending_first(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.completed);
    sorted
}

#[cfg(test)]
mod tests {
    use super::{pending_first, Task};
    use crate::model::profile::Priority;

    #[test]
    fn new_task_is_pending() {
        let task = Task::new("regar plantas", Priority::Low);
        assert!(!task.completed);
        assert!(!task.id.is_nil());
    }

    #[test]
    fn pending_first_is_stable() {
        let mut a = Task::new("a", Priority::Low);
        a.completed = true;
        let b = Task::new("b", Priority::High);
        let c = Task::new("c", Priority::Medium);

        let sorted = pending_first(&[a.clone(), b.clone(), c.clone()]);
        let ids: Vec<_> = sorted.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![b.id, c.id, a.id]);
    }
}
