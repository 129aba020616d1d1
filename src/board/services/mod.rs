//! Application services for the board.

mod session;

pub use session::{BoardSession, BoardSessionError, BoardSessionResult, MoveReport};
