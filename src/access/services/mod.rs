//! Orchestration services for sign-in gating.

mod gate;

pub use gate::{AccessDecision, AccessGate, AccessGateError, AccessGateResult};
