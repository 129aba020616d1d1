//! Allow-list port: the static set of emails admitted to the board.

use crate::access::domain::{AllowedUser, EmailAddress};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for allow-list lookups.
pub type AllowListResult<T> = Result<T, AllowListError>;

/// Lookup of authorised emails.
#[async_trait]
pub trait AllowList: Send + Sync {
    /// Returns the entry for `email`, or `None` when it is not authorised.
    async fn lookup(&self, email: &EmailAddress) -> AllowListResult<Option<AllowedUser>>;
}

/// Errors returned by allow-list implementations.
#[derive(Debug, Clone, Error)]
pub enum AllowListError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AllowListError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
