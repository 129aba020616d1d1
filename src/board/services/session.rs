//! Client-side board session: the local task collection and everything that
//! reads or writes it.

use crate::board::{
    domain::{
        BoardColumn, BoardDomainError, DropTarget, DueWindow, MovePlan, NewTask, Owner, Task,
        TaskDraft, TaskFilter, TaskId, TaskPatch, TaskStatus, column_len, group_columns,
        plan_compaction, plan_move,
    },
    ports::{ChangeFeed, TaskStore, TaskStoreError},
};
use crate::config::BoardConfig;
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

/// Service-level errors for board session operations.
#[derive(Debug, Error)]
pub enum BoardSessionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// The task is not in the local collection.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),
}

/// Result type for board session operations.
pub type BoardSessionResult<T> = Result<T, BoardSessionError>;

/// Outcome of persisting a move.
///
/// Failed writes are reported here and logged, never retried; the next full
/// refresh restores the authoritative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Tasks whose placement was written successfully.
    pub persisted: Vec<TaskId>,
    /// Tasks whose placement write failed.
    pub failed: Vec<TaskId>,
}

impl MoveReport {
    /// Returns `true` when the move touched no task.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.persisted.is_empty() && self.failed.is_empty()
    }
}

/// One client's view of the shared board.
///
/// The session owns the local task collection, the change subscription, and
/// the fetch-error banner. It is the only writer of that state; every method
/// that touches it takes `&mut self`.
pub struct BoardSession<S, C>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: BoardConfig,
    tasks: Vec<Task>,
    loading: bool,
    error_banner: Option<String>,
    feed: Option<ChangeFeed>,
}

impl<S, C> BoardSession<S, C>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync,
{
    /// Subscribes to task changes and loads the board.
    ///
    /// A failed initial load is reported through [`Self::error_banner`]
    /// rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when the change subscription
    /// cannot be established.
    pub async fn open(
        store: Arc<S>,
        clock: Arc<C>,
        config: BoardConfig,
    ) -> BoardSessionResult<Self> {
        let feed = store.subscribe(&config.tasks_table).await?;
        let mut session = Self {
            store,
            clock,
            config,
            tasks: Vec::new(),
            loading: true,
            error_banner: None,
            feed: Some(feed),
        };
        session.refresh().await;
        Ok(session)
    }

    /// Returns the local task collection.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns a task from the local collection.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns `true` while a full fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the message from the last failed fetch, if not dismissed.
    #[must_use]
    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// Hides the fetch-error banner.
    pub fn dismiss_error(&mut self) {
        self.error_banner = None;
    }

    /// Returns `true` while the change subscription is active.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.feed.is_some()
    }

    /// Replaces the local collection with the store's current tasks.
    ///
    /// On failure the previously loaded tasks stay visible and the error is
    /// shown in the banner.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.store.list().await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "board refreshed");
                self.tasks = tasks;
                self.error_banner = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "board refresh failed");
                self.error_banner = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Waits for the next change notification and refreshes.
    ///
    /// Returns `false` without refreshing when there is no subscription or
    /// the store closed it.
    pub async fn sync_next_change(&mut self) -> bool {
        let Some(feed) = self.feed.as_mut() else {
            return false;
        };
        let Some(event) = feed.next().await else {
            return false;
        };
        tracing::debug!(kind = ?event.kind, task_id = ?event.task_id, "remote change");
        self.refresh().await;
        true
    }

    /// Drains already-delivered notifications, refreshing once if any
    /// arrived, and returns how many were drained.
    pub async fn sync_pending_changes(&mut self) -> usize {
        let Some(feed) = self.feed.as_mut() else {
            return 0;
        };
        let mut drained = 0;
        while feed.try_next().is_some() {
            drained += 1;
        }
        if drained > 0 {
            self.refresh().await;
        }
        drained
    }

    /// Returns the filtered tasks grouped into every board column.
    #[must_use]
    pub fn columns(&self, filter: &TaskFilter) -> Vec<BoardColumn> {
        let window = self.due_window();
        group_columns(filter.apply(&self.tasks, &window).into_iter())
    }

    /// Returns the due-soon window starting from the session clock's local
    /// calendar date.
    #[must_use]
    pub fn due_window(&self) -> DueWindow {
        DueWindow::starting(self.clock.local().date_naive(), self.config.due_soon_days)
    }

    /// Handles a drop gesture: plans the move, applies it locally, then
    /// writes every changed placement concurrently.
    pub async fn move_task(&mut self, active: TaskId, target: DropTarget) -> MoveReport {
        let plan = plan_move(&self.tasks, active, target);
        tracing::debug!(
            task_id = %active,
            ?target,
            changes = plan.placements().len(),
            "move planned"
        );
        self.apply_and_persist(&plan).await
    }

    /// Inserts a placeholder task at the end of the backlog and returns a
    /// draft of it for editing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when the insert fails.
    pub async fn create_task(
        &mut self,
        creator_email: Option<&str>,
    ) -> BoardSessionResult<TaskDraft> {
        let backlog_len =
            u32::try_from(column_len(&self.tasks, TaskStatus::Backlog)).unwrap_or(u32::MAX);
        let new_task = NewTask::placeholder(Owner::for_email(creator_email), backlog_len);
        let created = self.store.insert(new_task).await?;
        let draft = TaskDraft::open(&created);
        if self.task(created.id()).is_none() {
            self.tasks.push(created);
        }
        Ok(draft)
    }

    /// Opens an editing draft for a task on the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::UnknownTask`] when the task is not loaded.
    pub fn edit(&self, id: TaskId) -> BoardSessionResult<TaskDraft> {
        self.task(id)
            .map(TaskDraft::open)
            .ok_or(BoardSessionError::UnknownTask(id))
    }

    /// Persists a finished draft and returns the task as now held locally.
    ///
    /// Content fields are overwritten from the draft. Placement is taken from
    /// the loaded task, not the draft, so a move made while the draft was
    /// open survives. A status change in the draft moves the task to the end
    /// of its new column the same way a column drop does; failed placement
    /// writes are logged and left for the next refresh.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Domain`] when the draft is invalid,
    /// [`BoardSessionError::UnknownTask`] when the task is no longer loaded,
    /// or [`BoardSessionError::Store`] when the update fails.
    pub async fn save(&mut self, draft: TaskDraft) -> BoardSessionResult<Task> {
        let edited = draft.finish()?;
        let id = edited.id();
        let Some(loaded_status) = self.task(id).map(Task::status) else {
            return Err(BoardSessionError::UnknownTask(id));
        };
        self.store.update(id, &TaskPatch::content(&edited)).await?;
        if let Some(local) = self.tasks.iter_mut().find(|task| task.id() == id) {
            local.adopt_fields(&edited);
        }

        if edited.status() != loaded_status {
            let plan = plan_move(&self.tasks, id, DropTarget::Column(edited.status()));
            let report = self.apply_and_persist(&plan).await;
            tracing::debug!(
                task_id = %id,
                status = %edited.status(),
                failed = report.failed.len(),
                "edited task changed column"
            );
        }
        self.task(id)
            .cloned()
            .ok_or(BoardSessionError::UnknownTask(id))
    }

    /// Deletes a task, then closes the gap it leaves in its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when the delete fails.
    pub async fn delete(&mut self, id: TaskId) -> BoardSessionResult<MoveReport> {
        self.store.delete(id).await?;
        let Some(index) = self.tasks.iter().position(|task| task.id() == id) else {
            return Ok(MoveReport::default());
        };
        let removed = self.tasks.remove(index);
        let plan = plan_compaction(&self.tasks, removed.status());
        Ok(self.apply_and_persist(&plan).await)
    }

    /// Ends the change subscription.
    pub fn close(mut self) {
        if let Some(feed) = self.feed.take() {
            tracing::debug!(table = %feed.table(), "unsubscribing from task changes");
            feed.unsubscribe();
        }
    }

    async fn apply_and_persist(&mut self, plan: &MovePlan) -> MoveReport {
        if plan.is_empty() {
            return MoveReport::default();
        }
        plan.apply(&mut self.tasks);

        let mut writes = JoinSet::new();
        let mut outstanding = HashSet::new();
        for placement in plan.placements() {
            let store = Arc::clone(&self.store);
            let task_id = placement.task_id;
            let patch = TaskPatch::placement(placement.status, placement.position);
            outstanding.insert(task_id);
            writes.spawn(async move {
                let result = store.update(task_id, &patch).await;
                (task_id, result)
            });
        }

        let mut report = MoveReport::default();
        while let Some(joined) = writes.join_next().await {
            match joined {
                Ok((task_id, result)) => {
                    outstanding.remove(&task_id);
                    match result {
                        Ok(()) => report.persisted.push(task_id),
                        Err(err) => {
                            tracing::warn!(
                                task_id = %task_id,
                                error = %err,
                                "placement write failed"
                            );
                            report.failed.push(task_id);
                        }
                    }
                }
                Err(err) => tracing::warn!(error = %err, "placement write aborted"),
            }
        }
        // Writes that panicked or were cancelled never reported back.
        report.failed.extend(outstanding);
        report
    }
}
