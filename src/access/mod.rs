//! Sign-in gating for the board.
//!
//! Access takes two checks: an identity provider must report a signed-in
//! session, and that session's email must appear on a static allow-list.
//! Failing the second check signs the user out again. Routing rules decide
//! which paths need a session at all.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
