//! Error types for check run validation and decoding.

use super::CheckRunStatus;
use thiserror::Error;

/// Broad category of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A record invariant does not hold.
    InvariantViolation,
    /// A status change follows an edge the state machine forbids.
    IllegalTransition,
}

/// Errors reported while validating or mutating a check run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A record invariant does not hold for the named field.
    #[error("invariant violated on '{field}': {reason}")]
    InvariantViolation {
        /// Path of the offending field, e.g. `annotations[1].id`.
        field: String,
        /// Description of the violated rule.
        reason: String,
    },

    /// The status would move along a disallowed edge.
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition {
        /// Current status.
        from: CheckRunStatus,
        /// Requested status.
        to: CheckRunStatus,
    },

    /// Several validation failures occurred.
    #[error("multiple validation errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Creates an invariant violation for `field`.
    #[must_use]
    pub fn invariant(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Combines several errors into one.
    ///
    /// A single error is returned unwrapped.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `errors` is empty, which indicates a logic
    /// error in the caller. Release builds return an internal invariant
    /// violation instead.
    #[must_use]
    pub fn multiple(mut errors: Vec<Self>) -> Self {
        match errors.len() {
            0 => {
                debug_assert!(false, "multiple() called with empty errors vector");
                Self::invariant("record", "internal error: no validation errors")
            }
            1 => errors
                .pop()
                .unwrap_or_else(|| Self::invariant("record", "internal error: no validation errors")),
            _ => Self::Multiple(errors),
        }
    }

    /// Returns the category of this error, or `None` for [`Self::Multiple`].
    #[must_use]
    pub const fn kind(&self) -> Option<ValidationErrorKind> {
        match self {
            Self::InvariantViolation { .. } => Some(ValidationErrorKind::InvariantViolation),
            Self::IllegalTransition { .. } => Some(ValidationErrorKind::IllegalTransition),
            Self::Multiple(_) => None,
        }
    }

    /// Returns the offending field for invariant violations.
    ///
    /// Illegal transitions always concern `status`.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvariantViolation { field, .. } => Some(field),
            Self::IllegalTransition { .. } => Some("status"),
            Self::Multiple(_) => None,
        }
    }

    /// Returns every individual failure, flattening nested groups.
    #[must_use]
    pub fn violations(&self) -> Vec<&Self> {
        match self {
            Self::Multiple(errors) => errors.iter().flat_map(Self::violations).collect(),
            single => vec![single],
        }
    }

    /// Returns `true` when any individual failure matches `kind` on `field`.
    #[must_use]
    pub fn has_violation(&self, kind: ValidationErrorKind, field: &str) -> bool {
        self.violations()
            .into_iter()
            .any(|error| error.kind() == Some(kind) && error.field() == Some(field))
    }
}

/// Errors returned while decoding check run values from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// An enum token is outside its closed set.
    #[error("unknown {field} value: '{raw}'")]
    UnknownEnumValue {
        /// Name of the field being decoded.
        field: &'static str,
        /// The rejected token.
        raw: String,
    },
}

impl DecodeError {
    pub(crate) fn unknown(field: &'static str, raw: &str) -> Self {
        Self::UnknownEnumValue {
            field,
            raw: raw.to_owned(),
        }
    }
}
