//! Shared world state for sign-in gating BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use trellis::{
    access::{
        adapters::memory::{InMemoryIdentityProvider, StaticAllowList},
        domain::{EmailAddress, RouteRules},
        services::{AccessDecision, AccessGate},
    },
    config::BoardConfig,
};

/// Gate type used by the BDD world.
pub type TestGate = AccessGate<InMemoryIdentityProvider, StaticAllowList>;

/// Scenario world for sign-in gating behaviour tests.
pub struct AccessWorld {
    pub provider: InMemoryIdentityProvider,
    pub admitted: Vec<EmailAddress>,
    pub last_decision: Option<AccessDecision>,
}

impl AccessWorld {
    /// Creates a signed-out world with an empty allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: InMemoryIdentityProvider::new(),
            admitted: Vec::new(),
            last_decision: None,
        }
    }

    /// Builds a gate over the world's provider and allow-list.
    #[must_use]
    pub fn gate(&self) -> TestGate {
        AccessGate::new(
            Arc::new(self.provider.clone()),
            Arc::new(StaticAllowList::new(self.admitted.iter().cloned())),
            RouteRules::from_config(&BoardConfig::default()),
        )
    }
}

impl Default for AccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AccessWorld {
    AccessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
