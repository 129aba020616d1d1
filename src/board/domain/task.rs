//! Task aggregate root and its persistence payloads.

use super::{
    BoardDomainError, ChecklistItem, ChecklistProgress, Owner, Priority, TaskId, TaskStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Title given to tasks created from the board's "new task" action.
pub const PLACEHOLDER_TITLE: &str = "New task";

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    notes: Option<String>,
    owner: Option<Owner>,
    due_date: Option<NaiveDate>,
    priority: Priority,
    labels: Vec<String>,
    checklist: Vec<ChecklistItem>,
    status: TaskStatus,
    position: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted free-text notes.
    pub notes: Option<String>,
    /// Persisted owner.
    pub owner: Option<Owner>,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted labels.
    pub labels: Vec<String>,
    /// Persisted checklist.
    pub checklist: Vec<ChecklistItem>,
    /// Persisted column.
    pub status: TaskStatus,
    /// Persisted ordinal within the column.
    pub position: u32,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materialises a freshly inserted task, assigning identity and
    /// timestamps the way the store would.
    #[must_use]
    pub fn create(new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewTask {
            title,
            notes,
            owner,
            due_date,
            priority,
            labels,
            checklist,
            status,
            position,
        } = new_task;

        Self {
            id: TaskId::new(),
            title,
            notes,
            owner,
            due_date,
            priority,
            labels,
            checklist,
            status,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            notes: data.notes,
            owner: data.owner,
            due_date: data.due_date,
            priority: data.priority,
            labels: data.labels,
            checklist: data.checklist,
            status: data.status,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-text notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the assigned collaborator, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<Owner> {
        self.owner
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the labels joined for display, e.g. `venue, catering`.
    #[must_use]
    pub fn labels_display(&self) -> String {
        self.labels.join(", ")
    }

    /// Returns the checklist.
    #[must_use]
    pub fn checklist(&self) -> &[ChecklistItem] {
        &self.checklist
    }

    /// Returns how much of the checklist is done.
    #[must_use]
    pub fn checklist_progress(&self) -> ChecklistProgress {
        ChecklistProgress::of(&self.checklist)
    }

    /// Returns the column the task belongs to.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the ordinal within the column.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update, refreshing `updated_at`.
    pub fn apply_patch(&mut self, patch: &TaskPatch, clock: &impl Clock) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(notes) = &patch.notes {
            self.notes.clone_from(notes);
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(labels) = &patch.labels {
            self.labels.clone_from(labels);
        }
        if let Some(checklist) = &patch.checklist {
            self.checklist.clone_from(checklist);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        self.updated_at = clock.utc();
    }

    /// Moves the task to a column slot without touching timestamps.
    ///
    /// Used for optimistic local placement; the store assigns the real
    /// `updated_at` once the write lands.
    pub(crate) const fn place(&mut self, status: TaskStatus, position: u32) {
        self.status = status;
        self.position = position;
    }

    /// Replaces the content fields with the values from `edited`.
    ///
    /// Placement is left alone; column changes go through move planning.
    pub(crate) fn adopt_fields(&mut self, edited: &Self) {
        self.title.clone_from(&edited.title);
        self.notes.clone_from(&edited.notes);
        self.owner = edited.owner;
        self.due_date = edited.due_date;
        self.priority = edited.priority;
        self.labels.clone_from(&edited.labels);
        self.checklist.clone_from(&edited.checklist);
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub(crate) const fn set_owner(&mut self, owner: Option<Owner>) {
        self.owner = owner;
    }

    pub(crate) const fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    pub(crate) const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(crate) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(crate) fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = labels;
    }

    pub(crate) const fn checklist_mut(&mut self) -> &mut Vec<ChecklistItem> {
        &mut self.checklist
    }
}

/// Insert payload for a task that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Display title, never blank.
    pub title: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Assigned collaborator.
    pub owner: Option<Owner>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Priority.
    pub priority: Priority,
    /// Labels.
    pub labels: Vec<String>,
    /// Checklist.
    pub checklist: Vec<ChecklistItem>,
    /// Column.
    pub status: TaskStatus,
    /// Ordinal within the column.
    pub position: u32,
}

impl NewTask {
    /// Creates a backlog task with the given title at position zero.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            notes: None,
            owner: None,
            due_date: None,
            priority: Priority::default(),
            labels: Vec::new(),
            checklist: Vec::new(),
            status: TaskStatus::Backlog,
            position: 0,
        })
    }

    /// Creates the placeholder task appended to the end of the backlog by
    /// the board's "new task" action.
    #[must_use]
    pub fn placeholder(owner: Owner, backlog_len: u32) -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_owned(),
            notes: Some(String::new()),
            owner: Some(owner),
            due_date: None,
            priority: Priority::Medium,
            labels: Vec::new(),
            checklist: Vec::new(),
            status: TaskStatus::Backlog,
            position: backlog_len,
        }
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the owner.
    #[must_use]
    pub const fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the checklist.
    #[must_use]
    pub fn with_checklist(mut self, checklist: impl IntoIterator<Item = ChecklistItem>) -> Self {
        self.checklist = checklist.into_iter().collect();
        self
    }

    /// Places the task in a column slot.
    #[must_use]
    pub const fn at(mut self, status: TaskStatus, position: u32) -> Self {
        self.status = status;
        self.position = position;
        self
    }
}

/// Partial update keyed by task identity; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[expect(
    clippy::option_option,
    reason = "outer Option marks presence, inner Option clears nullable columns"
)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New notes, or `Some(None)` to clear them.
    pub notes: Option<Option<String>>,
    /// New owner, or `Some(None)` to unassign.
    pub owner: Option<Option<Owner>>,
    /// New due date, or `Some(None)` to clear it.
    pub due_date: Option<Option<NaiveDate>>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New labels.
    pub labels: Option<Vec<String>>,
    /// New checklist.
    pub checklist: Option<Vec<ChecklistItem>>,
    /// New column.
    pub status: Option<TaskStatus>,
    /// New ordinal within the column.
    pub position: Option<u32>,
}

impl TaskPatch {
    /// Creates a patch that only moves a task to a column slot.
    #[must_use]
    pub const fn placement(status: TaskStatus, position: u32) -> Self {
        Self {
            title: None,
            notes: None,
            owner: None,
            due_date: None,
            priority: None,
            labels: None,
            checklist: None,
            status: Some(status),
            position: Some(position),
        }
    }

    /// Creates a patch that overwrites the content fields with `task`'s.
    ///
    /// Status and position are left out so a stale draft cannot undo a move
    /// made after it was opened.
    #[must_use]
    pub fn content(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            notes: Some(task.notes.clone()),
            owner: Some(task.owner),
            due_date: Some(task.due_date),
            priority: Some(task.priority),
            labels: Some(task.labels.clone()),
            checklist: Some(task.checklist.clone()),
            status: None,
            position: None,
        }
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.owner.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.labels.is_none()
            && self.checklist.is_none()
            && self.status.is_none()
            && self.position.is_none()
    }
}
