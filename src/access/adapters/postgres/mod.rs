//! `PostgreSQL` allow-list adapter.

mod allow_list;
mod schema;

pub use allow_list::{AccessPgPool, PostgresAllowList};
