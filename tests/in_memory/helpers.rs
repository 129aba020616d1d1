//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::Arc;
use trellis::{
    board::{
        adapters::memory::InMemoryTaskStore,
        domain::{NewTask, Task, TaskId, TaskStatus, group_columns},
        ports::TaskStore,
        services::BoardSession,
    },
    config::BoardConfig,
};

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Store type shared by the in-memory tests.
pub type TestStore = InMemoryTaskStore<FixedClock>;

/// Session type shared by the in-memory tests.
pub type TestSession = BoardSession<TestStore, FixedClock>;

/// Provides a clock fixed at 2024-01-01 09:00 UTC.
#[fixture]
pub fn clock() -> Arc<FixedClock> {
    let instant = Utc
        .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .expect("valid fixed instant");
    Arc::new(FixedClock(instant))
}

/// Provides an empty store stamped by the fixed clock.
#[fixture]
pub fn store(clock: Arc<FixedClock>) -> TestStore {
    InMemoryTaskStore::with_clock(clock)
}

/// Opens a session over a clone of `store`.
///
/// # Errors
///
/// Returns an error if the change subscription cannot be established.
pub async fn open_session(
    store: &TestStore,
    clock: &Arc<FixedClock>,
) -> Result<TestSession, eyre::Report> {
    let session = BoardSession::open(
        Arc::new(store.clone()),
        Arc::clone(clock),
        BoardConfig::default(),
    )
    .await?;
    Ok(session)
}

/// Inserts a titled task directly into `store`.
///
/// # Errors
///
/// Returns an error if the title is blank or the insert fails.
pub async fn seed(
    store: &TestStore,
    title: &str,
    status: TaskStatus,
    position: u32,
) -> Result<Task, eyre::Report> {
    let new_task = NewTask::new(title)?.at(status, position);
    Ok(store.insert(new_task).await?)
}

/// Returns the titles in `status`, in position order.
#[must_use]
pub fn titles_in(tasks: &[Task], status: TaskStatus) -> Vec<String> {
    group_columns(tasks)
        .into_iter()
        .filter(|column| column.status() == status)
        .flat_map(|column| {
            column
                .tasks()
                .iter()
                .map(|task| task.title().to_owned())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Returns the identifier of the task titled `title`.
///
/// # Errors
///
/// Returns an error if no such task exists.
pub fn id_of(tasks: &[Task], title: &str) -> Result<TaskId, eyre::Report> {
    tasks
        .iter()
        .find(|task| task.title() == title)
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("no task titled {title}"))
}

/// Builds a calendar date.
///
/// # Errors
///
/// Returns an error if the date does not exist.
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| eyre::eyre!("invalid date {year}-{month}-{day}"))
}
