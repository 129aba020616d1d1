//! Signed-in identities and allow-list records.

use super::EmailAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned user identifier.
    pub user_id: String,
    /// Email the user signed in with; some providers omit it.
    pub email: Option<EmailAddress>,
}

/// An active sign-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in user.
    pub identity: Identity,
    /// When the session was established.
    pub started_at: DateTime<Utc>,
}

/// An allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedUser {
    /// Authorised email.
    pub email: EmailAddress,
}
