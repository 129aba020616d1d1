//! Fixed enumerations shared by every task: column status, priority, and the
//! two collaborators who can own work.

use super::ParseVocabularyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board column a task lives in.
///
/// Declaration order is the left-to-right column order on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Captured but not yet scheduled.
    Backlog,
    /// Scheduled for the current month.
    #[serde(rename = "This Month")]
    ThisMonth,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Blocked on someone else.
    Waiting,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Every column, in board order.
    pub const ALL: [Self; 5] = [
        Self::Backlog,
        Self::ThisMonth,
        Self::InProgress,
        Self::Waiting,
        Self::Done,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::ThisMonth => "This Month",
            Self::InProgress => "In Progress",
            Self::Waiting => "Waiting",
            Self::Done => "Done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseVocabularyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value.trim())
            .ok_or_else(|| ParseVocabularyError::Status(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task urgency, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    /// Nice to have.
    Low,
    /// Default urgency for new tasks.
    #[default]
    Medium,
    /// Should be handled soon.
    High,
    /// Blocks other work.
    Critical,
}

impl Priority {
    /// Every priority, least urgent first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParseVocabularyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value.trim())
            .ok_or_else(|| ParseVocabularyError::Priority(value.to_owned()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two collaborators sharing the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// First collaborator.
    Mickey,
    /// Second collaborator.
    Shivani,
}

impl Owner {
    /// Both collaborators, in display order.
    pub const ALL: [Self; 2] = [Self::Mickey, Self::Shivani];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mickey => "Mickey",
            Self::Shivani => "Shivani",
        }
    }

    /// Infers the collaborator behind a sign-in email.
    ///
    /// Addresses containing `shiv` belong to Shivani; anything else, including
    /// an unknown address, is attributed to Mickey.
    #[must_use]
    pub fn for_email(email: Option<&str>) -> Self {
        match email {
            Some(address) if address.to_ascii_lowercase().contains("shiv") => Self::Shivani,
            _ => Self::Mickey,
        }
    }
}

impl TryFrom<&str> for Owner {
    type Error = ParseVocabularyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|owner| owner.as_str() == value.trim())
            .ok_or_else(|| ParseVocabularyError::Owner(value.to_owned()))
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
