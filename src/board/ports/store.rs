//! Task store port: the remote data service holding the authoritative tasks.

use super::ChangeFeed;
use crate::board::domain::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Remote task storage with change notifications.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task, ordered by status and then position.
    async fn list(&self) -> TaskStoreResult<Vec<Task>>;

    /// Inserts a task; the store assigns identity and timestamps.
    async fn insert(&self, task: NewTask) -> TaskStoreResult<Task>;

    /// Applies a partial update to one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<()>;

    /// Deletes one task.
    ///
    /// Deleting a task that does not exist succeeds.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Subscribes to inserts, updates, and deletes on `table` made by any
    /// client, including this one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::UnknownTable`] when the store does not
    /// publish changes for `table`.
    async fn subscribe(&self, table: &str) -> TaskStoreResult<ChangeFeed>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store does not publish changes for this table.
    #[error("no change feed for table '{0}'")]
    UnknownTable(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
