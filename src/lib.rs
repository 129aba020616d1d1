//! Trellis: a shared two-person Kanban board.
//!
//! This crate holds the client-side logic of a task board kept in a remote
//! relational store: column reconciliation after drag-and-drop, filtering,
//! task editing, realtime refresh on remote change, and sign-in gating
//! against a static allow-list.
//!
//! # Architecture
//!
//! Trellis follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`board`]: Tasks, move planning, filters, and the board session
//! - [`access`]: Session gate, allow-list, and routing rules
//! - [`config`]: Runtime settings read from the environment

pub mod access;
pub mod board;
pub mod config;
