//! `PostgreSQL` implementation of the allow-list port.

use super::schema::allowed_users;
use crate::access::{
    domain::{AllowedUser, EmailAddress},
    ports::{AllowList, AllowListError, AllowListResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by access adapters.
pub type AccessPgPool = Pool<ConnectionManager<PgConnection>>;

/// Allow-list read from the `allowed_users` table.
#[derive(Debug, Clone)]
pub struct PostgresAllowList {
    pool: AccessPgPool,
}

impl PostgresAllowList {
    /// Creates an allow-list from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AccessPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AllowList for PostgresAllowList {
    async fn lookup(&self, email: &EmailAddress) -> AllowListResult<Option<AllowedUser>> {
        let pool = self.pool.clone();
        let wanted = email.as_str().to_owned();
        let found = tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AllowListError::persistence)?;
            allowed_users::table
                .filter(allowed_users::email.eq(wanted))
                .select(allowed_users::email)
                .first::<String>(&mut connection)
                .optional()
                .map_err(AllowListError::persistence)
        })
        .await
        .map_err(AllowListError::persistence)??;

        found
            .map(|stored| {
                EmailAddress::new(stored)
                    .map(|address| AllowedUser { email: address })
                    .map_err(AllowListError::persistence)
            })
            .transpose()
    }
}
