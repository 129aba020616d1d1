//! `PostgreSQL` task store.

use super::{
    listener::{self, ListenerSettings},
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{NewTask, Owner, PersistedTaskData, Priority, Task, TaskId, TaskPatch, TaskStatus},
    ports::{ChangeFeed, TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Table whose changes the store publishes.
const TASKS_TABLE: &str = "tasks";

/// Channel the migration's trigger notifies on.
const DEFAULT_NOTIFY_CHANNEL: &str = "tasks_changed";

/// How often the listener drains pending notifications.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: BoardPgPool,
    notify_channel: String,
    poll_interval: Duration,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: BoardPgPool) -> Self {
        Self {
            pool,
            notify_channel: DEFAULT_NOTIFY_CHANNEL.to_owned(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the `NOTIFY` channel used for change notifications.
    #[must_use]
    pub fn with_notify_channel(mut self, channel: impl Into<String>) -> Self {
        self.notify_channel = channel.into();
        self
    }

    /// Overrides how often the change listener polls for notifications.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let rows = self
            .run_blocking(|connection| {
                tasks::table
                    .order((tasks::status.asc(), tasks::position.asc()))
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(connection)
                    .map_err(TaskStoreError::persistence)
            })
            .await?;

        let mut loaded = rows
            .into_iter()
            .map(row_to_task)
            .collect::<TaskStoreResult<Vec<_>>>()?;
        // Column order is the enum order, not the alphabetical order of the
        // stored names.
        loaded.sort_by_key(|task| (task.status(), task.position()));
        Ok(loaded)
    }

    async fn insert(&self, task: NewTask) -> TaskStoreResult<Task> {
        let new_row = to_new_row(&task)?;
        let row = self
            .run_blocking(move |connection| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(connection)
                    .map_err(TaskStoreError::persistence)
            })
            .await?;
        row_to_task(row)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        let changeset = to_changeset(patch)?;
        let is_empty = patch.is_empty();
        self.run_blocking(move |connection| {
            let target = tasks::table.filter(tasks::id.eq(id.into_inner()));
            let affected = if is_empty {
                target
                    .select(tasks::id)
                    .first::<uuid::Uuid>(connection)
                    .optional()
                    .map_err(TaskStoreError::persistence)?
                    .map_or(0, |_| 1)
            } else {
                diesel::update(target)
                    .set(&changeset)
                    .execute(connection)
                    .map_err(TaskStoreError::persistence)?
            };
            if affected == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn subscribe(&self, table: &str) -> TaskStoreResult<ChangeFeed> {
        if table != TASKS_TABLE {
            return Err(TaskStoreError::UnknownTable(table.to_owned()));
        }
        let connection = {
            let pool = self.pool.clone();
            tokio::task::spawn_blocking(move || pool.get().map_err(TaskStoreError::persistence))
                .await
                .map_err(TaskStoreError::persistence)??
        };
        listener::spawn(
            connection,
            ListenerSettings {
                table: table.to_owned(),
                channel: self.notify_channel.clone(),
                poll_interval: self.poll_interval,
            },
        )
        .await
    }
}

pub(super) fn to_new_row(task: &NewTask) -> TaskStoreResult<NewTaskRow> {
    Ok(NewTaskRow {
        title: task.title.clone(),
        notes: task.notes.clone(),
        owner: task.owner.map(|owner| owner.as_str().to_owned()),
        due_date: task.due_date,
        priority: task.priority.as_str().to_owned(),
        labels: serde_json::to_value(&task.labels).map_err(TaskStoreError::persistence)?,
        checklist: serde_json::to_value(&task.checklist).map_err(TaskStoreError::persistence)?,
        status: task.status.as_str().to_owned(),
        position: to_column_position(task.position)?,
    })
}

pub(super) fn to_changeset(patch: &TaskPatch) -> TaskStoreResult<TaskChangeset> {
    Ok(TaskChangeset {
        title: patch.title.clone(),
        notes: patch.notes.clone(),
        owner: patch
            .owner
            .map(|owner| owner.map(|name| name.as_str().to_owned())),
        due_date: patch.due_date,
        priority: patch.priority.map(|priority| priority.as_str().to_owned()),
        labels: patch
            .labels
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(TaskStoreError::persistence)?,
        checklist: patch
            .checklist
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(TaskStoreError::persistence)?,
        status: patch.status.map(|status| status.as_str().to_owned()),
        position: patch.position.map(to_column_position).transpose()?,
    })
}

pub(super) fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        notes,
        owner,
        due_date,
        priority,
        labels,
        checklist,
        status,
        position,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        notes,
        owner: owner
            .as_deref()
            .map(Owner::try_from)
            .transpose()
            .map_err(TaskStoreError::persistence)?,
        due_date,
        priority: Priority::try_from(priority.as_str()).map_err(TaskStoreError::persistence)?,
        labels: serde_json::from_value(labels).map_err(TaskStoreError::persistence)?,
        checklist: serde_json::from_value(checklist).map_err(TaskStoreError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskStoreError::persistence)?,
        position: u32::try_from(position).map_err(TaskStoreError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn to_column_position(position: u32) -> TaskStoreResult<i32> {
    i32::try_from(position).map_err(TaskStoreError::persistence)
}
