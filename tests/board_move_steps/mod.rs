//! Step definitions for drag-and-drop scenarios.

pub mod given;
pub mod then;
pub mod world;
