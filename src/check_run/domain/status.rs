//! Check run status and the transitions allowed between statuses.

use super::DecodeError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Progress of a check run.
///
/// `Queued` is the initial status and `Completed` the only terminal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    /// Waiting for the producer to pick the check up.
    Queued,
    /// The producer is running the check.
    InProgress,
    /// The check has finished and carries a conclusion.
    Completed,
}

impl CheckRunStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 3] = [Self::Queued, Self::InProgress, Self::Completed];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns whether moving from `self` to `target` is a legal edge.
    ///
    /// Legal edges are `queued -> in_progress`, `queued -> completed` and
    /// `in_progress -> completed`. Self-loops are not transitions.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Queued, Self::InProgress | Self::Completed)
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Returns whether no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for CheckRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CheckRunStatus {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "queued" => Ok(Self::Queued),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(DecodeError::unknown("status", value)),
        }
    }
}

impl FromStr for CheckRunStatus {
    type Err = DecodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}
