//! Then steps for check run lifecycle BDD scenarios.

use super::world::{CheckRunWorld, run_async};
use checkrun::check_run::{
    domain::{CheckRun, CheckRunStatus, DecodeError, ValidationError, ValidationErrorKind},
    services::CheckRunLifecycleError,
};
use rstest_bdd_macros::then;

fn stored_check_run(world: &CheckRunWorld) -> Result<CheckRun, eyre::Report> {
    let id = world.check_run()?.id();
    run_async(world.service.find_by_id(id))?
        .ok_or_else(|| eyre::eyre!("check run {id} is not stored"))
}

fn failed_change(world: &CheckRunWorld) -> Result<&CheckRunLifecycleError, eyre::Report> {
    match world.last_change_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(run)) => Err(eyre::eyre!("expected the change to fail, got {run:?}")),
        None => Err(eyre::eyre!("missing change result")),
    }
}

#[then(r#"the check run status is "{status}""#)]
fn status_is(world: &CheckRunWorld, status: String) -> Result<(), eyre::Report> {
    let expected = CheckRunStatus::try_from(status.as_str())?;
    let stored = stored_check_run(world)?;

    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("the check run has passed")]
fn has_passed(world: &CheckRunWorld) -> Result<(), eyre::Report> {
    let stored = stored_check_run(world)?;
    eyre::ensure!(stored.passed(), "conclusion {:?} did not pass", stored.conclusion());
    Ok(())
}

#[then("the check run is valid")]
fn is_valid(world: &CheckRunWorld) -> Result<(), eyre::Report> {
    stored_check_run(world)?.validate()?;
    Ok(())
}

#[then("the check run has no start time")]
fn has_no_start_time(world: &CheckRunWorld) -> Result<(), eyre::Report> {
    let stored = stored_check_run(world)?;
    eyre::ensure!(stored.started_at().is_none(), "start time was stamped");
    Ok(())
}

#[then("the check run has {count:usize} annotations")]
fn annotation_count(world: &CheckRunWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = stored_check_run(world)?;
    eyre::ensure!(
        stored.annotations().len() == count,
        "expected {count} annotations, found {}",
        stored.annotations().len()
    );
    Ok(())
}

#[then("the check run description is {length:usize} characters long")]
fn description_length_is(world: &CheckRunWorld, length: usize) -> Result<(), eyre::Report> {
    let stored = stored_check_run(world)?;
    let actual = stored.description().chars().count();
    eyre::ensure!(actual == length, "expected {length} characters, found {actual}");
    Ok(())
}

#[then("the change fails with an illegal transition error")]
fn fails_with_illegal_transition(world: &CheckRunWorld) -> Result<(), eyre::Report> {
    let err = failed_change(world)?;
    if !matches!(
        err,
        CheckRunLifecycleError::Validation(ValidationError::IllegalTransition { .. })
    ) {
        return Err(eyre::eyre!("expected IllegalTransition error, got {err:?}"));
    }
    Ok(())
}

#[then(r#"the change fails with an unknown "{field}" value error"#)]
fn fails_with_unknown_value(world: &CheckRunWorld, field: String) -> Result<(), eyre::Report> {
    let err = failed_change(world)?;
    match err {
        CheckRunLifecycleError::Decode(DecodeError::UnknownEnumValue { field: rejected, .. })
            if *rejected == field => Ok(()),
        other => Err(eyre::eyre!("expected unknown {field} value error, got {other:?}")),
    }
}

#[then(r#"the change fails with an invariant violation on "{field}""#)]
fn fails_with_invariant_violation(world: &CheckRunWorld, field: String) -> Result<(), eyre::Report> {
    let err = failed_change(world)?;
    match err {
        CheckRunLifecycleError::Validation(error)
            if error.has_violation(ValidationErrorKind::InvariantViolation, &field) =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!("expected invariant violation on {field}, got {other:?}")),
    }
}
