//! Allow-list backed by a fixed set of emails.

use crate::access::{
    domain::{AllowedUser, EmailAddress},
    ports::{AllowList, AllowListResult},
};
use async_trait::async_trait;
use std::collections::HashSet;

/// Allow-list fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowList {
    emails: HashSet<EmailAddress>,
}

impl StaticAllowList {
    /// Creates a list admitting exactly `emails`.
    #[must_use]
    pub fn new(emails: impl IntoIterator<Item = EmailAddress>) -> Self {
        Self {
            emails: emails.into_iter().collect(),
        }
    }

    /// Returns the number of admitted emails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Returns `true` when nobody is admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

#[async_trait]
impl AllowList for StaticAllowList {
    async fn lookup(&self, email: &EmailAddress) -> AllowListResult<Option<AllowedUser>> {
        Ok(self.emails.get(email).map(|found| AllowedUser {
            email: found.clone(),
        }))
    }
}
