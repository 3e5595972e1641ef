//! Individual check run validation rules.
//!
//! Each rule is a pure function over a [`CheckRun`] that reports every
//! violation it finds. Rules never mutate the record.

use crate::check_run::domain::{
    Annotation, CheckRun, CheckRunStatus, Operation, ValidationError,
    limits::{
        MAX_ANNOTATION_MESSAGE_CHARS, MAX_ANNOTATION_OPERATIONS, MAX_DESCRIPTION_CHARS,
        MAX_IDENTIFIER_CHARS, MAX_OPERATION_LABEL_CHARS, MAX_TEXT_CHARS, MAX_URL_CHARS,
        exceeds_chars,
    },
};

/// Validates that a conclusion is present exactly when the run is completed.
///
/// # Errors
///
/// Returns an invariant violation on `conclusion` when the two disagree.
pub fn validate_conclusion(run: &CheckRun) -> Result<(), ValidationError> {
    match (run.status(), run.conclusion()) {
        (CheckRunStatus::Completed, None) => Err(ValidationError::invariant(
            "conclusion",
            "a conclusion is required when status is completed",
        )),
        (status @ (CheckRunStatus::Queued | CheckRunStatus::InProgress), Some(conclusion)) => {
            Err(ValidationError::invariant(
                "conclusion",
                format!("conclusion '{conclusion}' is set while status is {status}"),
            ))
        }
        _ => Ok(()),
    }
}

/// Validates that a completion time is present exactly when the run is
/// completed.
///
/// # Errors
///
/// Returns an invariant violation on `completed_at` when the two disagree.
pub fn validate_completion_time(run: &CheckRun) -> Result<(), ValidationError> {
    match (run.status(), run.completed_at()) {
        (CheckRunStatus::Completed, None) => Err(ValidationError::invariant(
            "completed_at",
            "a completion time is required when status is completed",
        )),
        (status @ (CheckRunStatus::Queued | CheckRunStatus::InProgress), Some(_)) => Err(
            ValidationError::invariant("completed_at", format!("set while status is {status}")),
        ),
        _ => Ok(()),
    }
}

/// Validates timestamp ordering: start before completion, creation before
/// the latest update.
///
/// # Errors
///
/// Returns invariant violations on `started_at` and `updated_at`.
pub fn validate_timestamps(run: &CheckRun) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    if let (Some(started_at), Some(completed_at)) = (run.started_at(), run.completed_at())
        && started_at > completed_at
    {
        errors.push(ValidationError::invariant(
            "started_at",
            format!("start time {started_at} is later than completion time {completed_at}"),
        ));
    }
    if run.updated_at() < run.created_at() {
        errors.push(ValidationError::invariant(
            "updated_at",
            "update time precedes creation time",
        ));
    }
    finish(errors)
}

/// Validates that the required text fields are not blank.
///
/// # Errors
///
/// Returns invariant violations on `commit_id` and `name`.
pub fn validate_required_fields(run: &CheckRun) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    require_non_blank(&mut errors, "commit_id", run.commit_id());
    require_non_blank(&mut errors, "name", run.name());
    finish(errors)
}

/// Validates that the record-level bounded strings are within their
/// ceilings.
///
/// # Errors
///
/// Returns an invariant violation for each over-long field.
pub fn validate_bounded_fields(run: &CheckRun) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    check_ceiling(&mut errors, "description", run.description(), MAX_DESCRIPTION_CHARS);
    check_ceiling(&mut errors, "text", run.text(), MAX_TEXT_CHARS);
    check_ceiling(&mut errors, "text_html", run.text_html(), MAX_TEXT_CHARS);
    if let Some(details_url) = run.details_url() {
        check_ceiling(&mut errors, "details_url", details_url, MAX_URL_CHARS);
    }
    finish(errors)
}

/// Validates every annotation and its operations.
///
/// # Errors
///
/// Returns an invariant violation for each malformed annotation field.
pub fn validate_annotations(run: &CheckRun) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    for (index, annotation) in run.annotations().iter().enumerate() {
        collect_annotation_errors(&mut errors, &format!("annotations[{index}]"), annotation);
    }
    finish(errors)
}

/// Validates the record-level operations.
///
/// # Errors
///
/// Returns an invariant violation for each malformed operation field.
pub fn validate_operations(run: &CheckRun) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    for (index, operation) in run.operations().iter().enumerate() {
        collect_operation_errors(&mut errors, &format!("operations[{index}]"), operation);
    }
    finish(errors)
}

fn collect_annotation_errors(
    errors: &mut Vec<ValidationError>,
    prefix: &str,
    annotation: &Annotation,
) {
    require_non_blank(errors, &format!("{prefix}.path"), &annotation.path);

    if annotation.start_line > annotation.end_line {
        errors.push(ValidationError::invariant(
            format!("{prefix}.start_line"),
            format!(
                "start line {} is after end line {}",
                annotation.start_line, annotation.end_line
            ),
        ));
    }
    collect_column_errors(errors, prefix, annotation);

    match annotation.id.as_deref() {
        Some(id) => check_ceiling(errors, &format!("{prefix}.id"), id, MAX_IDENTIFIER_CHARS),
        None if annotation.has_operations() => errors.push(ValidationError::invariant(
            format!("{prefix}.id"),
            "an identifier is required when operations are present",
        )),
        None => {}
    }

    check_ceiling(
        errors,
        &format!("{prefix}.message"),
        &annotation.message,
        MAX_ANNOTATION_MESSAGE_CHARS,
    );
    if let Some(details_url) = annotation.details_url.as_deref() {
        check_ceiling(errors, &format!("{prefix}.details_url"), details_url, MAX_URL_CHARS);
    }

    if annotation.operations.len() > MAX_ANNOTATION_OPERATIONS {
        errors.push(ValidationError::invariant(
            format!("{prefix}.operations"),
            format!(
                "{} operations exceed the limit of {MAX_ANNOTATION_OPERATIONS}",
                annotation.operations.len()
            ),
        ));
    }
    for (index, operation) in annotation.operations.iter().enumerate() {
        collect_operation_errors(errors, &format!("{prefix}.operations[{index}]"), operation);
    }
}

fn collect_column_errors(errors: &mut Vec<ValidationError>, prefix: &str, annotation: &Annotation) {
    if annotation.start_line != annotation.end_line {
        return;
    }
    if let (Some(start_column), Some(end_column)) = (annotation.start_column, annotation.end_column)
        && start_column > end_column
    {
        errors.push(ValidationError::invariant(
            format!("{prefix}.start_column"),
            format!("start column {start_column} is after end column {end_column} on one line"),
        ));
    }
}

fn collect_operation_errors(
    errors: &mut Vec<ValidationError>,
    prefix: &str,
    operation: &Operation,
) {
    let id_field = format!("{prefix}.id");
    let label_field = format!("{prefix}.label");
    require_non_blank(errors, &id_field, &operation.id);
    require_non_blank(errors, &label_field, &operation.label);
    check_ceiling(errors, &id_field, &operation.id, MAX_IDENTIFIER_CHARS);
    check_ceiling(errors, &label_field, &operation.label, MAX_OPERATION_LABEL_CHARS);
    check_ceiling(
        errors,
        &format!("{prefix}.description"),
        &operation.description,
        MAX_DESCRIPTION_CHARS,
    );
    if let Some(target_url) = operation.target_url.as_deref() {
        check_ceiling(errors, &format!("{prefix}.target_url"), target_url, MAX_URL_CHARS);
    }
}

fn require_non_blank(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::invariant(field, "must not be empty"));
    }
}

fn check_ceiling(errors: &mut Vec<ValidationError>, field: &str, value: &str, max_chars: usize) {
    if exceeds_chars(value, max_chars) {
        errors.push(ValidationError::invariant(
            field,
            format!("exceeds {max_chars} characters"),
        ));
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::multiple(errors))
    }
}
