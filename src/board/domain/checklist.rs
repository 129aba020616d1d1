//! Checklist sub-items nested inside a task.

use super::ChecklistItemId;
use serde::{Deserialize, Serialize};

/// A single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Identifier, stable across edits.
    pub id: ChecklistItemId,
    /// Display label.
    pub label: String,
    /// Whether the entry has been ticked off.
    pub completed: bool,
}

impl ChecklistItem {
    /// Creates an unticked item with a fresh identifier.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: ChecklistItemId::new(),
            label: label.into(),
            completed: false,
        }
    }

    /// Returns a copy with surrounding whitespace removed from the label.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id,
            label: self.label.trim().to_owned(),
            completed: self.completed,
        }
    }
}

/// Completed-versus-total counts for a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistProgress {
    /// Number of completed items.
    pub completed: usize,
    /// Number of items overall.
    pub total: usize,
}

impl ChecklistProgress {
    /// Counts completed items.
    #[must_use]
    pub fn of(items: &[ChecklistItem]) -> Self {
        Self {
            completed: items.iter().filter(|item| item.completed).count(),
            total: items.len(),
        }
    }

    /// Returns `true` when every item is completed (vacuously for none).
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.completed == self.total
    }
}
