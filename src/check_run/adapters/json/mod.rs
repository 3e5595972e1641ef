//! JSON encoding of the check run data contract.
//!
//! Optional fields are omitted when absent rather than written as `null`,
//! with one exception: an annotation's `details_url` is always present.
//! Decoding is faithful: it neither truncates nor validates, so callers
//! apply [`CheckRun::apply_truncation`] and [`CheckRun::validate`] before
//! accepting a write.

mod models;

pub use models::{AnnotationDocument, CheckRunDocument, OperationDocument};

use crate::check_run::domain::{CheckRun, DecodeError};
use thiserror::Error;

/// Errors returned while encoding or decoding check run documents.
#[derive(Debug, Error)]
pub enum CheckRunCodecError {
    /// The text is not a well-formed check run document.
    #[error("malformed check run document: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A field holds a value outside its closed set.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Decodes a check run from JSON text.
///
/// # Errors
///
/// Returns [`CheckRunCodecError::Malformed`] for invalid JSON or missing
/// required fields and [`CheckRunCodecError::Decode`] for unknown enum
/// tokens.
pub fn decode_check_run(input: &str) -> Result<CheckRun, CheckRunCodecError> {
    let document: CheckRunDocument = serde_json::from_str(input)?;
    Ok(CheckRun::try_from(document)?)
}

/// Encodes a check run as JSON text.
///
/// # Errors
///
/// Returns [`CheckRunCodecError::Malformed`] if serialization fails.
pub fn encode_check_run(run: &CheckRun) -> Result<String, CheckRunCodecError> {
    Ok(serde_json::to_string(&CheckRunDocument::from(run))?)
}
