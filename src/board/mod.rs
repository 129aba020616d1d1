//! The shared task board.
//!
//! Tasks are grouped into status columns and ordered by position. A client
//! keeps a local copy of every task in a [`services::BoardSession`], applies
//! drag-and-drop moves to it optimistically, writes the resulting placements
//! back to the store, and re-fetches everything whenever the store reports a
//! change. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
