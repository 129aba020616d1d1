//! Grouping of tasks into ordered board columns.

use super::{Task, TaskId, TaskStatus};

/// Tasks sharing one status, sorted by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl BoardColumn {
    /// Collects the tasks in `status` from `tasks`, sorted by position.
    ///
    /// The sort is stable, so ties keep their input order.
    #[must_use]
    pub fn collect<'a>(status: TaskStatus, tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut members: Vec<Task> = tasks
            .into_iter()
            .filter(|task| task.status() == status)
            .cloned()
            .collect();
        members.sort_by_key(Task::position);
        Self {
            status,
            tasks: members,
        }
    }

    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the ordered tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the task identifiers in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(Task::id).collect()
    }

    /// Returns `true` when positions are exactly `0..len` in order.
    #[must_use]
    pub fn has_dense_positions(&self) -> bool {
        self.tasks
            .iter()
            .enumerate()
            .all(|(index, task)| usize::try_from(task.position()).is_ok_and(|pos| pos == index))
    }
}

/// Groups tasks into every board column, in board order.
///
/// Empty columns are included so callers can render drop zones for them.
#[must_use]
pub fn group_columns<'a>(tasks: impl IntoIterator<Item = &'a Task> + Clone) -> Vec<BoardColumn> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| BoardColumn::collect(status, tasks.clone()))
        .collect()
}

/// Returns the number of tasks in `status`.
#[must_use]
pub fn column_len(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status() == status).count()
}
