//! Shared world state for drag-and-drop BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use trellis::{
    board::{
        adapters::memory::InMemoryTaskStore,
        domain::{Task, TaskId, TaskStatus},
        services::{BoardSession, MoveReport},
    },
    config::BoardConfig,
};

/// Session type used by the BDD world.
pub type TestSession = BoardSession<InMemoryTaskStore, DefaultClock>;

/// Scenario world for drag-and-drop behaviour tests.
pub struct BoardWorld {
    pub store: InMemoryTaskStore,
    pub session: Option<TestSession>,
    pub last_report: Option<MoveReport>,
}

impl BoardWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: InMemoryTaskStore::new(),
            session: None,
            last_report: None,
        }
    }

    /// Returns the open session, opening it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot subscribe to changes.
    pub fn session(&mut self) -> Result<&mut TestSession, eyre::Report> {
        if self.session.is_none() {
            let opened = run_async(BoardSession::open(
                Arc::new(self.store.clone()),
                Arc::new(DefaultClock),
                BoardConfig::default(),
            ))?;
            self.session = Some(opened);
        }
        self.session
            .as_mut()
            .ok_or_else(|| eyre::eyre!("session was not opened"))
    }

    /// Returns the identifier of the task titled `title` on the board.
    ///
    /// # Errors
    ///
    /// Returns an error if no such task is loaded.
    pub fn id_of(&mut self, title: &str) -> Result<TaskId, eyre::Report> {
        self.session()?
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("no task titled {title} on the board"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a column name used in feature files.
///
/// # Errors
///
/// Returns an error for unknown column names.
pub fn parse_status(name: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(name).map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))
}

/// Splits a comma-separated title list.
#[must_use]
pub fn split_titles(titles: &str) -> Vec<String> {
    titles
        .split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
