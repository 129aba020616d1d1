//! Session gate: decides whether the current visitor may see the board.

use crate::access::{
    domain::{AccessDomainError, EmailAddress, Identity, RouteDecision, RouteRules},
    ports::{AllowList, AllowListError, IdentityError, IdentityProvider},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for access checks.
#[derive(Debug, Error)]
pub enum AccessGateError {
    /// The supplied email is malformed.
    #[error(transparent)]
    Domain(#[from] AccessDomainError),
    /// The identity provider failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// The allow-list lookup failed.
    #[error(transparent)]
    AllowList(#[from] AllowListError),
}

/// Result type for access gate operations.
pub type AccessGateResult<T> = Result<T, AccessGateError>;

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Signed in and on the allow-list.
    Granted(Identity),
    /// No active session.
    SignedOut,
    /// Signed in but not on the allow-list; the session has been ended.
    NotAllowed,
}

impl AccessDecision {
    /// Returns `true` when the board may be shown.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// Combines the identity provider, the allow-list, and routing rules.
#[derive(Debug)]
pub struct AccessGate<I, A>
where
    I: IdentityProvider,
    A: AllowList,
{
    identity: Arc<I>,
    allow_list: Arc<A>,
    routes: RouteRules,
}

impl<I, A> AccessGate<I, A>
where
    I: IdentityProvider,
    A: AllowList,
{
    /// Creates a gate.
    #[must_use]
    pub const fn new(identity: Arc<I>, allow_list: Arc<A>, routes: RouteRules) -> Self {
        Self {
            identity,
            allow_list,
            routes,
        }
    }

    /// Checks the current session against the allow-list.
    ///
    /// A signed-in user whose email is missing or not allow-listed is signed
    /// out before [`AccessDecision::NotAllowed`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGateError::Identity`] or
    /// [`AccessGateError::AllowList`] when either service fails.
    pub async fn check(&self) -> AccessGateResult<AccessDecision> {
        let Some(session) = self.identity.session().await? else {
            return Ok(AccessDecision::SignedOut);
        };
        let identity = session.identity;

        if self.is_allowed(&identity).await? {
            tracing::debug!(user_id = %identity.user_id, "access granted");
            return Ok(AccessDecision::Granted(identity));
        }

        tracing::info!(
            user_id = %identity.user_id,
            email = identity.email.as_ref().map_or("<none>", EmailAddress::as_str),
            "user not on allow-list; signing out"
        );
        self.identity.sign_out().await?;
        Ok(AccessDecision::NotAllowed)
    }

    /// Sends a sign-in link to `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGateError::Domain`] for a malformed address or
    /// [`AccessGateError::Identity`] when the provider refuses.
    pub async fn request_link(&self, email: &str) -> AccessGateResult<EmailAddress> {
        let address = EmailAddress::new(email)?;
        self.identity.sign_in_with_link(&address).await?;
        tracing::debug!(email = %address, "sign-in link requested");
        Ok(address)
    }

    /// Ends the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGateError::Identity`] when the provider fails.
    pub async fn sign_out(&self) -> AccessGateResult<()> {
        self.identity.sign_out().await?;
        Ok(())
    }

    /// Routes `path` based on whether a session is currently active.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGateError::Identity`] when the session lookup fails.
    pub async fn route(&self, path: &str) -> AccessGateResult<RouteDecision> {
        let has_session = self.identity.session().await?.is_some();
        Ok(self.routes.decide(path, has_session))
    }

    async fn is_allowed(&self, identity: &Identity) -> AccessGateResult<bool> {
        let Some(email) = identity.email.as_ref() else {
            return Ok(false);
        };
        Ok(self.allow_list.lookup(email).await?.is_some())
    }
}
