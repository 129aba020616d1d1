//! Step definitions for sign-in gating scenarios.

pub mod then;
pub mod world;
