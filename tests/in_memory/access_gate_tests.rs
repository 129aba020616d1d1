//! In-memory integration tests for sign-in gating.

use std::sync::Arc;

use rstest::{fixture, rstest};
use trellis::{
    access::{
        adapters::memory::{InMemoryIdentityProvider, StaticAllowList},
        domain::{EmailAddress, Identity, RouteDecision, RouteRules},
        services::{AccessDecision, AccessGate},
    },
    board::domain::Owner,
    config::BoardConfig,
};

type TestGate = AccessGate<InMemoryIdentityProvider, StaticAllowList>;

#[fixture]
fn provider() -> InMemoryIdentityProvider {
    InMemoryIdentityProvider::new()
}

fn gate(provider: &InMemoryIdentityProvider) -> Result<TestGate, eyre::Report> {
    let allow_list = StaticAllowList::new([
        EmailAddress::new("mickey@example.com")?,
        EmailAddress::new("shivani@example.com")?,
    ]);
    Ok(AccessGate::new(
        Arc::new(provider.clone()),
        Arc::new(allow_list),
        RouteRules::from_config(&BoardConfig::default()),
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn magic_link_sign_in_grants_access(
    provider: InMemoryIdentityProvider,
) -> Result<(), eyre::Report> {
    let gate = gate(&provider)?;
    assert_eq!(
        gate.route("/").await?,
        RouteDecision::Redirect("/login".to_owned())
    );

    let address = gate.request_link("Shivani@Example.com").await?;
    provider.complete_sign_in(Identity {
        user_id: "user-2".to_owned(),
        email: Some(address.clone()),
    })?;

    let AccessDecision::Granted(identity) = gate.check().await? else {
        eyre::bail!("expected access to be granted");
    };
    assert_eq!(
        Owner::for_email(identity.email.as_ref().map(EmailAddress::as_str)),
        Owner::Shivani
    );
    assert_eq!(gate.route("/").await?, RouteDecision::Continue);
    assert_eq!(
        gate.route("/login").await?,
        RouteDecision::Redirect("/".to_owned())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_are_bounced_back_to_login(
    provider: InMemoryIdentityProvider,
) -> Result<(), eyre::Report> {
    let gate = gate(&provider)?;
    provider.complete_sign_in(Identity {
        user_id: "user-9".to_owned(),
        email: Some(EmailAddress::new("stranger@example.com")?),
    })?;

    assert_eq!(gate.check().await?, AccessDecision::NotAllowed);
    assert_eq!(
        gate.route("/").await?,
        RouteDecision::Redirect("/login".to_owned())
    );
    Ok(())
}
