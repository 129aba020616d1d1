//! Domain model for sign-in gating.

mod email;
mod error;
mod identity;
mod route;

pub use email::EmailAddress;
pub use error::AccessDomainError;
pub use identity::{AllowedUser, Identity, Session};
pub use route::{RouteDecision, RouteRules};
