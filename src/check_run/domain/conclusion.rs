//! Final classification of a completed check run.

use super::DecodeError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Conclusion reported by the producer when a check run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunConclusion {
    /// The producer needs a user to act before the check can finish.
    OperationRequired,
    /// The check did not finish in time.
    TimedOut,
    /// The check was cancelled before it finished.
    Canceled,
    /// The check found problems.
    Failed,
    /// The check passed with warnings.
    Warning,
    /// The check neither passed nor failed.
    Neutral,
    /// The check passed.
    Succeeded,
}

impl CheckRunConclusion {
    /// All conclusions in declaration order.
    pub const ALL: [Self; 7] = [
        Self::OperationRequired,
        Self::TimedOut,
        Self::Canceled,
        Self::Failed,
        Self::Warning,
        Self::Neutral,
        Self::Succeeded,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OperationRequired => "operation_required",
            Self::TimedOut => "timed_out",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
            Self::Warning => "warning",
            Self::Neutral => "neutral",
            Self::Succeeded => "succeeded",
        }
    }

    /// Returns whether this conclusion counts as a pass.
    ///
    /// `succeeded`, `neutral` and `warning` pass; every other conclusion
    /// blocks.
    #[must_use]
    pub const fn passed(self) -> bool {
        match self {
            Self::Succeeded | Self::Neutral | Self::Warning => true,
            Self::OperationRequired | Self::TimedOut | Self::Canceled | Self::Failed => false,
        }
    }
}

impl fmt::Display for CheckRunConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CheckRunConclusion {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "operation_required" => Ok(Self::OperationRequired),
            "timed_out" => Ok(Self::TimedOut),
            "canceled" => Ok(Self::Canceled),
            "failed" => Ok(Self::Failed),
            "warning" => Ok(Self::Warning),
            "neutral" => Ok(Self::Neutral),
            "succeeded" => Ok(Self::Succeeded),
            _ => Err(DecodeError::unknown("conclusion", value)),
        }
    }
}

impl FromStr for CheckRunConclusion {
    type Err = DecodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}
