//! Domain model for the shared board.
//!
//! Tasks live in one of five status columns and are ordered inside each
//! column by a dense position. The domain covers task values, column
//! grouping, drag-and-drop move planning, filtering, and the editing draft,
//! with no knowledge of where tasks are stored.

mod checklist;
mod columns;
mod editor;
mod error;
mod filter;
mod ids;
mod reconcile;
mod task;
mod vocabulary;

pub use checklist::{ChecklistItem, ChecklistProgress};
pub use columns::{BoardColumn, column_len, group_columns};
pub use editor::TaskDraft;
pub use error::{BoardDomainError, ParseVocabularyError};
pub use filter::{DueWindow, OwnerFilter, TaskFilter};
pub use ids::{ChecklistItemId, TaskId};
pub use reconcile::{DropTarget, MovePlan, Placement, plan_compaction, plan_move};
pub use task::{NewTask, PLACEHOLDER_TITLE, PersistedTaskData, Task, TaskPatch};
pub use vocabulary::{Owner, Priority, TaskStatus};
