//! Change notification feed handed out by [`super::TaskStore::subscribe`].

use crate::board::domain::TaskId;
use std::fmt;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

/// Kind of remote change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A task was inserted.
    Insert,
    /// A task was updated.
    Update,
    /// A task was deleted.
    Delete,
    /// Notifications were missed or could not be decoded; state is unknown.
    Resync,
}

/// One change notification.
///
/// The payload is informational only: consumers re-fetch the whole task
/// list on every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    /// What happened.
    pub kind: ChangeKind,
    /// Affected task, when known.
    pub task_id: Option<TaskId>,
}

impl ChangeEvent {
    /// Creates an event for a known task.
    #[must_use]
    pub const fn new(kind: ChangeKind, task_id: TaskId) -> Self {
        Self {
            kind,
            task_id: Some(task_id),
        }
    }

    /// Creates an event that only signals "something changed".
    #[must_use]
    pub const fn resync() -> Self {
        Self {
            kind: ChangeKind::Resync,
            task_id: None,
        }
    }
}

type Teardown = Box<dyn FnOnce() + Send>;

/// Subscription to a table's change notifications.
///
/// Dropping the feed unsubscribes; [`ChangeFeed::unsubscribe`] does the same
/// explicitly.
pub struct ChangeFeed {
    table: String,
    receiver: broadcast::Receiver<ChangeEvent>,
    teardown: Option<Teardown>,
}

impl ChangeFeed {
    /// Wraps a broadcast receiver for `table`.
    #[must_use]
    pub fn new(table: impl Into<String>, receiver: broadcast::Receiver<ChangeEvent>) -> Self {
        Self {
            table: table.into(),
            receiver,
            teardown: None,
        }
    }

    /// Registers work to run when the subscription ends, such as stopping a
    /// listener thread.
    #[must_use]
    pub fn with_teardown(mut self, teardown: impl FnOnce() + Send + 'static) -> Self {
        self.teardown = Some(Box::new(teardown));
        self
    }

    /// Returns the subscribed table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Waits for the next change.
    ///
    /// Returns `None` once the publisher has gone away. Missed notifications
    /// collapse into a single [`ChangeKind::Resync`] event.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(RecvError::Lagged(_)) => Some(ChangeEvent::resync()),
            Err(RecvError::Closed) => None,
        }
    }

    /// Returns an already-delivered change without waiting.
    pub fn try_next(&mut self) -> Option<ChangeEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Lagged(_)) => Some(ChangeEvent::resync()),
            Err(TryRecvError::Empty | TryRecvError::Closed) => None,
        }
    }

    /// Ends the subscription.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for ChangeFeed {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("table", &self.table)
            .field("has_teardown", &self.teardown.is_some())
            .finish_non_exhaustive()
    }
}
