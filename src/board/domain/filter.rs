//! Visible-subset filtering over the board's tasks.

use super::{Owner, Task};
use chrono::{Days, NaiveDate};

/// Owner criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnerFilter {
    /// Any owner, including unassigned tasks.
    #[default]
    All,
    /// Exactly this collaborator.
    Only(Owner),
}

impl OwnerFilter {
    fn admits(self, owner: Option<Owner>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => owner == Some(wanted),
        }
    }
}

/// Inclusive calendar window used by the due-soon criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DueWindow {
    /// Creates the window `[today, today + days]`.
    #[must_use]
    pub fn starting(today: NaiveDate, days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    /// Returns `true` when `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

/// Criteria combined with logical AND; the default passes every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Owner criterion.
    pub owner: OwnerFilter,
    /// Case-sensitive substring any label must contain; empty passes.
    pub label: String,
    /// When set, only tasks due inside the window pass.
    pub due_soon: bool,
    /// Case-insensitive substring of title and notes; empty passes.
    pub search: String,
}

impl TaskFilter {
    /// Creates a filter that passes every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one owner.
    #[must_use]
    pub const fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = OwnerFilter::Only(owner);
        self
    }

    /// Restricts to tasks with a label containing `label`.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Restricts to tasks due inside the window.
    #[must_use]
    pub const fn due_soon(mut self) -> Self {
        self.due_soon = true;
        self
    }

    /// Restricts to tasks whose title or notes contain `search`.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Returns `true` when `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task, window: &DueWindow) -> bool {
        self.owner.admits(task.owner())
            && self.matches_label(task)
            && self.matches_due_date(task, window)
            && self.matches_search(task)
    }

    /// Returns the matching tasks, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task], window: &DueWindow) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task, window))
            .collect()
    }

    fn matches_label(&self, task: &Task) -> bool {
        self.label.is_empty()
            || task
                .labels()
                .iter()
                .any(|label| label.contains(self.label.as_str()))
    }

    fn matches_due_date(&self, task: &Task, window: &DueWindow) -> bool {
        !self.due_soon || task.due_date().is_some_and(|due| window.contains(due))
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let haystack = format!("{} {}", task.title(), task.notes().unwrap_or_default());
        haystack
            .to_lowercase()
            .contains(self.search.to_lowercase().as_str())
    }
}
