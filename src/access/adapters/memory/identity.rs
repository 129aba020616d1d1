//! Identity provider that keeps its session in memory.

use crate::access::{
    domain::{EmailAddress, Identity, Session},
    ports::{IdentityError, IdentityProvider, IdentityResult},
};
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct ProviderState {
    session: Option<Session>,
    sent_links: Vec<EmailAddress>,
}

/// In-memory identity provider.
///
/// Sign-in links are recorded instead of emailed;
/// [`InMemoryIdentityProvider::complete_sign_in`] stands in for the user
/// following one. Clones share state.
pub struct InMemoryIdentityProvider<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<ProviderState>>,
    clock: Arc<C>,
}

impl InMemoryIdentityProvider {
    /// Creates a signed-out provider stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> std::fmt::Debug for InMemoryIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryIdentityProvider").finish_non_exhaustive()
    }
}

fn lock_error(err: impl std::fmt::Display) -> IdentityError {
    IdentityError::persistence(std::io::Error::other(err.to_string()))
}

impl<C> InMemoryIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a signed-out provider stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ProviderState::default())),
            clock,
        }
    }

    /// Signs `identity` in, as if they had followed a sign-in link.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Persistence`] when the state lock is
    /// poisoned.
    pub fn complete_sign_in(&self, identity: Identity) -> IdentityResult<Session> {
        let session = Session {
            identity,
            started_at: self.clock.utc(),
        };
        let mut state = self.state.write().map_err(lock_error)?;
        state.session = Some(session.clone());
        Ok(session)
    }

    /// Returns every address a sign-in link was sent to, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Persistence`] when the state lock is
    /// poisoned.
    pub fn sent_links(&self) -> IdentityResult<Vec<EmailAddress>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.sent_links.clone())
    }
}

#[async_trait]
impl<C> IdentityProvider for InMemoryIdentityProvider<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn session(&self) -> IdentityResult<Option<Session>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.session.clone())
    }

    async fn user(&self) -> IdentityResult<Option<Identity>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.session.as_ref().map(|session| session.identity.clone()))
    }

    async fn sign_in_with_link(&self, email: &EmailAddress) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.sent_links.push(email.clone());
        Ok(())
    }

    async fn sign_out(&self) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.session = None;
        Ok(())
    }
}
