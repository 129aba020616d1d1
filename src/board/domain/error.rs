//! Error types for board domain validation and parsing.

use super::ChecklistItemId;
use thiserror::Error;

/// Errors returned while constructing or editing board tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The checklist already holds an item with this identifier.
    #[error("duplicate checklist item {0}")]
    DuplicateChecklistItem(ChecklistItemId),

    /// The checklist has no item with this identifier.
    #[error("checklist item {0} not found")]
    ChecklistItemNotFound(ChecklistItemId),
}

/// Error returned while parsing a stored enumeration value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseVocabularyError {
    /// Unknown column status.
    #[error("unknown task status: {0}")]
    Status(String),

    /// Unknown priority.
    #[error("unknown task priority: {0}")]
    Priority(String),

    /// Unknown collaborator.
    #[error("unknown task owner: {0}")]
    Owner(String),
}
