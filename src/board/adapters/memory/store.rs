//! In-memory task store with a broadcast change feed.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::board::{
    domain::{NewTask, Task, TaskId, TaskPatch},
    ports::{ChangeEvent, ChangeFeed, ChangeKind, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Table name under which the in-memory store publishes changes.
const TASKS_TABLE: &str = "tasks";

/// Buffered notifications per subscriber before older ones are dropped.
const FEED_CAPACITY: usize = 64;

/// Thread-safe in-memory task store.
///
/// Clones share state and change notifications, so two board sessions built
/// over clones behave like two clients of one remote store.
pub struct InMemoryTaskStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
    changes: broadcast::Sender<ChangeEvent>,
    clock: Arc<C>,
}

impl InMemoryTaskStore {
    /// Creates an empty store stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        let (changes, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            changes,
            clock,
        }
    }

    fn publish(&self, kind: ChangeKind, id: TaskId) {
        // No subscribers is not an error.
        if self.changes.send(ChangeEvent::new(kind, id)).is_err() {
            tracing::trace!(task_id = %id, "no change subscribers");
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            changes: self.changes.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> std::fmt::Debug for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTaskStore")
            .field("subscribers", &self.changes.receiver_count())
            .finish_non_exhaustive()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state.values().cloned().collect();
        tasks.sort_by_key(|task| (task.status(), task.position(), task.created_at()));
        Ok(tasks)
    }

    async fn insert(&self, task: NewTask) -> TaskStoreResult<Task> {
        let created = Task::create(task, &*self.clock);
        {
            let mut state = self.state.write().map_err(lock_error)?;
            state.insert(created.id(), created.clone());
        }
        self.publish(ChangeKind::Insert, created.id());
        Ok(created)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        {
            let mut state = self.state.write().map_err(lock_error)?;
            let task = state.get_mut(&id).ok_or(TaskStoreError::NotFound(id))?;
            task.apply_patch(patch, &*self.clock);
        }
        self.publish(ChangeKind::Update, id);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let removed = {
            let mut state = self.state.write().map_err(lock_error)?;
            state.remove(&id)
        };
        if removed.is_some() {
            self.publish(ChangeKind::Delete, id);
        }
        Ok(())
    }

    async fn subscribe(&self, table: &str) -> TaskStoreResult<ChangeFeed> {
        if table != TASKS_TABLE {
            return Err(TaskStoreError::UnknownTable(table.to_owned()));
        }
        Ok(ChangeFeed::new(table, self.changes.subscribe()))
    }
}
