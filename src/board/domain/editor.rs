//! Working copy used while a task is open for editing.

use super::{
    BoardDomainError, ChecklistItem, ChecklistItemId, Owner, Priority, Task, TaskId, TaskStatus,
};
use chrono::NaiveDate;

/// Editable working copy of a single task.
///
/// Changes stay local to the draft until [`TaskDraft::finish`] produces the
/// updated task for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    working: Task,
}

impl TaskDraft {
    /// Opens a draft over a copy of `task`.
    #[must_use]
    pub fn open(task: &Task) -> Self {
        Self {
            working: task.clone(),
        }
    }

    /// Returns the identifier of the task being edited.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.working.id()
    }

    /// Returns the current working copy.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.working
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.working.set_title(title.into());
    }

    /// Replaces the notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.working.set_notes(Some(notes.into()));
    }

    /// Assigns or clears the owner.
    pub const fn set_owner(&mut self, owner: Option<Owner>) {
        self.working.set_owner(owner);
    }

    /// Sets or clears the due date.
    pub const fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.working.set_due_date(due_date);
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.working.set_priority(priority);
    }

    /// Sets the column the task should end up in once saved.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.working.set_status(status);
    }

    /// Returns the labels as the comma-separated text shown in the form.
    #[must_use]
    pub fn labels_input(&self) -> String {
        self.working.labels_display()
    }

    /// Replaces the labels from comma-separated input.
    ///
    /// Each label is trimmed and blank entries are dropped.
    pub fn set_labels_input(&mut self, input: &str) {
        let labels = input
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_owned)
            .collect();
        self.working.set_labels(labels);
    }

    /// Appends an empty, unticked checklist item and returns its identifier.
    pub fn add_checklist_item(&mut self) -> ChecklistItemId {
        let item = ChecklistItem::new(String::new());
        let id = item.id;
        self.working.checklist_mut().push(item);
        id
    }

    /// Appends an existing checklist item.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateChecklistItem`] when the
    /// checklist already holds an item with the same identifier.
    pub fn push_checklist_item(&mut self, item: ChecklistItem) -> Result<(), BoardDomainError> {
        let checklist = self.working.checklist_mut();
        if checklist.iter().any(|existing| existing.id == item.id) {
            return Err(BoardDomainError::DuplicateChecklistItem(item.id));
        }
        checklist.push(item);
        Ok(())
    }

    /// Replaces a checklist item's label.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ChecklistItemNotFound`] for unknown items.
    pub fn set_checklist_label(
        &mut self,
        id: ChecklistItemId,
        label: impl Into<String>,
    ) -> Result<(), BoardDomainError> {
        self.checklist_item_mut(id)?.label = label.into();
        Ok(())
    }

    /// Ticks or unticks a checklist item.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ChecklistItemNotFound`] for unknown items.
    pub fn set_checklist_completed(
        &mut self,
        id: ChecklistItemId,
        completed: bool,
    ) -> Result<(), BoardDomainError> {
        self.checklist_item_mut(id)?.completed = completed;
        Ok(())
    }

    /// Removes a checklist item.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ChecklistItemNotFound`] for unknown items.
    pub fn remove_checklist_item(&mut self, id: ChecklistItemId) -> Result<(), BoardDomainError> {
        let checklist = self.working.checklist_mut();
        let before = checklist.len();
        checklist.retain(|item| item.id != id);
        if checklist.len() == before {
            return Err(BoardDomainError::ChecklistItemNotFound(id));
        }
        Ok(())
    }

    /// Completes the edit, returning the task to persist.
    ///
    /// Checklist labels are trimmed; other fields are emitted as edited.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn finish(mut self) -> Result<Task, BoardDomainError> {
        if self.working.title().trim().is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        for item in self.working.checklist_mut().iter_mut() {
            *item = item.trimmed();
        }
        Ok(self.working)
    }

    fn checklist_item_mut(
        &mut self,
        id: ChecklistItemId,
    ) -> Result<&mut ChecklistItem, BoardDomainError> {
        self.working
            .checklist_mut()
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(BoardDomainError::ChecklistItemNotFound(id))
    }
}
