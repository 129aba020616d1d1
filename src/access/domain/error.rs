//! Error types for access domain validation.

use thiserror::Error;

/// Errors returned while constructing access domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessDomainError {
    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}
