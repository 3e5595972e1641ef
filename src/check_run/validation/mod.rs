//! Check run validation.
//!
//! [`validate_check_run`] runs every rule in [`rules`] and reports all
//! violations together rather than stopping at the first.

pub mod rules;

use crate::check_run::domain::{CheckRun, ValidationError};

/// Validates a check run against every record invariant.
///
/// # Errors
///
/// Returns a single [`ValidationError`] when one rule fails, or
/// [`ValidationError::Multiple`] holding every individual failure.
pub fn validate_check_run(run: &CheckRun) -> Result<(), ValidationError> {
    let checks = [
        rules::validate_conclusion(run),
        rules::validate_completion_time(run),
        rules::validate_timestamps(run),
        rules::validate_required_fields(run),
        rules::validate_bounded_fields(run),
        rules::validate_annotations(run),
        rules::validate_operations(run),
    ];

    let errors: Vec<ValidationError> = checks
        .into_iter()
        .filter_map(Result::err)
        .flat_map(|error| match error {
            ValidationError::Multiple(inner) => inner,
            single => vec![single],
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::multiple(errors))
    }
}
