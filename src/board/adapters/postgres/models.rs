//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Display title.
    pub title: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Collaborator name.
    pub owner: Option<String>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Priority name.
    pub priority: String,
    /// Labels JSON array.
    pub labels: Value,
    /// Checklist JSON array.
    pub checklist: Value,
    /// Column name.
    pub status: String,
    /// Ordinal within the column.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records; identity and timestamps default in SQL.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Display title.
    pub title: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Collaborator name.
    pub owner: Option<String>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Priority name.
    pub priority: String,
    /// Labels JSON array.
    pub labels: Value,
    /// Checklist JSON array.
    pub checklist: Value,
    /// Column name.
    pub status: String,
    /// Ordinal within the column.
    pub position: i32,
}

/// Partial update model; `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
#[expect(
    clippy::option_option,
    reason = "Diesel writes NULL for Some(None) and skips None"
)]
pub struct TaskChangeset {
    /// Display title.
    pub title: Option<String>,
    /// Free-text notes.
    pub notes: Option<Option<String>>,
    /// Collaborator name.
    pub owner: Option<Option<String>>,
    /// Due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// Priority name.
    pub priority: Option<String>,
    /// Labels JSON array.
    pub labels: Option<Value>,
    /// Checklist JSON array.
    pub checklist: Option<Value>,
    /// Column name.
    pub status: Option<String>,
    /// Ordinal within the column.
    pub position: Option<i32>,
}
