//! Presentation hints: display mode and annotation severity.

use super::DecodeError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How a check run is shown to users. Has no effect on status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Shown normally.
    #[default]
    Default,
    /// Hidden from the default listing.
    Hidden,
    /// Pinned and emphasised.
    Highlighted,
}

impl DisplayMode {
    /// All display modes in declaration order.
    pub const ALL: [Self; 3] = [Self::Default, Self::Hidden, Self::Highlighted];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hidden => "hidden",
            Self::Highlighted => "highlighted",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DisplayMode {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "default" => Ok(Self::Default),
            "hidden" => Ok(Self::Hidden),
            "highlighted" => Ok(Self::Highlighted),
            _ => Err(DecodeError::unknown("display_mode", value)),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = DecodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

/// Severity of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationLevel {
    /// Informational note.
    Info,
    /// Something worth a look.
    Warning,
    /// A problem with the code.
    Error,
    /// A problem that must be fixed before anything else.
    Critical,
}

impl AnnotationLevel {
    /// All levels in declaration order, from least to most severe.
    pub const ALL: [Self; 4] = [Self::Info, Self::Warning, Self::Error, Self::Critical];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for AnnotationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AnnotationLevel {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, DecodeError> {
        match value {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(AnnotationLevel::Error),
            "critical" => Ok(Self::Critical),
            _ => Err(DecodeError::unknown("level", value)),
        }
    }
}

impl FromStr for AnnotationLevel {
    type Err = DecodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}
