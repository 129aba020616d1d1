//! `PostgreSQL` adapters for board persistence and change notifications.

mod listener;
mod models;
mod schema;
mod store;

pub use store::{BoardPgPool, PostgresTaskStore};
