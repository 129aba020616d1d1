//! Identity provider port: magic-link sign-in and session lookup.

use crate::access::domain::{EmailAddress, Identity, Session};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Hosted authentication service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the current session, if signed in.
    async fn session(&self) -> IdentityResult<Option<Session>>;

    /// Returns the signed-in user, if any.
    async fn user(&self) -> IdentityResult<Option<Identity>>;

    /// Sends a one-time sign-in link to `email`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] when the provider refuses to
    /// send the link.
    async fn sign_in_with_link(&self, email: &EmailAddress) -> IdentityResult<()>;

    /// Ends the current session. Signing out while signed out succeeds.
    async fn sign_out(&self) -> IdentityResult<()>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The provider refused the request.
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    /// Transport or provider failure.
    #[error("identity provider error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a provider failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
