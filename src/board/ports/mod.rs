//! Port contracts for the board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod feed;
pub mod store;

pub use feed::{ChangeEvent, ChangeFeed, ChangeKind};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
