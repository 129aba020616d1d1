//! Then steps for sign-in gating BDD scenarios.

use super::world::{AccessWorld, run_async};
use rstest_bdd_macros::then;
use trellis::access::{domain::RouteDecision, services::AccessDecision};

#[then("access is granted")]
fn access_is_granted(world: &AccessWorld) -> Result<(), eyre::Report> {
    match &world.last_decision {
        Some(decision) if decision.is_granted() => Ok(()),
        other => Err(eyre::eyre!("expected access to be granted, got {other:?}")),
    }
}

#[then("access is refused as not allowed")]
fn access_is_refused(world: &AccessWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_decision == Some(AccessDecision::NotAllowed),
        "expected NotAllowed, got {:?}",
        world.last_decision
    );
    Ok(())
}

#[then(r#"visiting "{path}" redirects to "{destination}""#)]
fn visiting_redirects(
    world: &AccessWorld,
    path: String,
    destination: String,
) -> Result<(), eyre::Report> {
    let decision = run_async(world.gate().route(&path))?;
    eyre::ensure!(
        decision == RouteDecision::Redirect(destination.clone()),
        "expected {path} to redirect to {destination}, got {decision:?}"
    );
    Ok(())
}

#[then(r#"visiting "{path}" is served"#)]
fn visiting_is_served(world: &AccessWorld, path: String) -> Result<(), eyre::Report> {
    let decision = run_async(world.gate().route(&path))?;
    eyre::ensure!(
        decision == RouteDecision::Continue,
        "expected {path} to be served, got {decision:?}"
    );
    Ok(())
}
