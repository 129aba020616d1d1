//! Shared fixtures for board unit tests.

use crate::board::domain::{NewTask, Task, TaskId, TaskStatus, group_columns};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to one instant.
///
/// `local()` reports the same wall-clock reading as `utc()` in the host zone,
/// so calendar dates do not depend on where the tests run.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl FixedClock {
    pub(super) fn on(year: i32, month: u32, day: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, 9, 30, 0)
                .single()
                .expect("valid fixed timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        local_at(self.0.naive_utc())
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn local_at(wall_clock: NaiveDateTime) -> DateTime<Local> {
    Local
        .from_local_datetime(&wall_clock)
        .earliest()
        .expect("wall-clock time exists in the local zone")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn task_at(title: &str, status: TaskStatus, position: u32) -> Task {
    let new_task = NewTask::new(title)
        .expect("valid title")
        .at(status, position);
    Task::create(new_task, &FixedClock::on(2024, 1, 1))
}

/// Returns the identifiers in `status`, in position order.
pub(super) fn column_ids(tasks: &[Task], status: TaskStatus) -> Vec<TaskId> {
    group_columns(tasks)
        .into_iter()
        .find(|column| column.status() == status)
        .map(|column| column.ids())
        .unwrap_or_default()
}

pub(super) fn assert_dense(tasks: &[Task]) {
    for column in group_columns(tasks) {
        assert!(
            column.has_dense_positions(),
            "column {} is not densely numbered",
            column.status()
        );
    }
}
