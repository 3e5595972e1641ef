//! In-memory integration tests for check run lifecycle operations.

use super::helpers::{COMMIT, REPO, TestService, request, service};
use checkrun::check_run::{
    domain::{
        Annotation, AnnotationLevel, AppId, CheckRunConclusion, CheckRunOutput, CheckRunStatus,
        DisplayMode, NewCheckRun, Operation, RepoId,
    },
    services::{CheckRunLifecycleError, TransitionCheckRunRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_is_visible_through_commit_lookup(
    service: TestService,
) -> Result<(), eyre::Report> {
    let run = service
        .create(request("clippy").with_branch("feature/checks"))
        .await?;
    service.start(run.id()).await?;
    service
        .add_annotations(
            run.id(),
            vec![
                Annotation::new("src/lib.rs", 14, 14, AnnotationLevel::Warning)
                    .with_id("needless-borrow")
                    .with_columns(9, 21)
                    .with_message("this expression borrows a value the compiler would borrow")
                    .with_operations([Operation::new("apply", "Apply suggestion")]),
            ],
        )
        .await?;
    service
        .update_output(
            run.id(),
            CheckRunOutput::new()
                .with_description("1 warning")
                .with_text("clippy finished with 1 warning"),
        )
        .await?;
    let completed = service
        .complete(run.id(), CheckRunConclusion::Warning)
        .await?;

    let found = service.find_by_commit(REPO, COMMIT).await?;
    eyre::ensure!(found.len() == 1, "expected one check run, found {}", found.len());
    let stored = found
        .first()
        .ok_or_else(|| eyre::eyre!("expected at least one check run"))?;
    eyre::ensure!(*stored == completed, "stored record differs from returned one");
    eyre::ensure!(stored.passed());
    eyre::ensure!(stored.annotations().len() == 1);
    eyre::ensure!(stored.description() == "1 warning");
    eyre::ensure!(stored.branch() == Some("feature/checks"));
    stored.validate()?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timestamps_are_monotonic_across_changes(
    service: TestService,
) -> Result<(), eyre::Report> {
    let created = service.create(request("fmt")).await?;
    let started = service.start(created.id()).await?;
    let hidden = service
        .set_display_mode(created.id(), DisplayMode::Hidden)
        .await?;
    let completed = service
        .complete(created.id(), CheckRunConclusion::Succeeded)
        .await?;

    eyre::ensure!(created.created_at() == created.updated_at());
    eyre::ensure!(started.updated_at() >= created.updated_at());
    eyre::ensure!(hidden.updated_at() >= started.updated_at());
    eyre::ensure!(completed.updated_at() >= hidden.updated_at());
    eyre::ensure!(completed.created_at() == created.created_at());
    eyre::ensure!(completed.display_mode() == DisplayMode::Hidden);
    eyre::ensure!(completed.started_at() <= completed.completed_at());
    Ok(())
}

#[rstest]
#[case("failed", false)]
#[case("canceled", false)]
#[case("timed_out", false)]
#[case("operation_required", false)]
#[case("succeeded", true)]
#[case("neutral", true)]
#[case("warning", true)]
#[tokio::test(flavor = "multi_thread")]
async fn completing_by_token_sets_pass_state(
    service: TestService,
    #[case] conclusion: &str,
    #[case] expected_pass: bool,
) -> Result<(), eyre::Report> {
    let run = service.create(request("unit")).await?;
    service
        .transition(TransitionCheckRunRequest::new(run.id(), "in_progress"))
        .await?;

    let completed = service
        .transition(
            TransitionCheckRunRequest::new(run.id(), "completed").with_conclusion(conclusion),
        )
        .await?;

    eyre::ensure!(completed.status() == CheckRunStatus::Completed);
    eyre::ensure!(
        completed.passed() == expected_pass,
        "{conclusion} should give passed() == {expected_pass}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commit_lookup_is_scoped_by_repository(service: TestService) -> Result<(), eyre::Report> {
    let first = service.create(request("build")).await?;
    let second = service.create(request("test")).await?;
    service
        .create(NewCheckRun::new(
            RepoId::new(43),
            AppId::new(5),
            COMMIT,
            "build",
        ))
        .await?;

    let found = service.find_by_commit(REPO, COMMIT).await?;
    let ids: Vec<_> = found.iter().map(|run| run.id()).collect();

    eyre::ensure!(ids == vec![first.id(), second.id()], "unexpected ids {ids:?}");
    eyre::ensure!(service.find_by_commit(REPO, "0000000").await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn queued_run_cannot_return_to_queued(service: TestService) -> Result<(), eyre::Report> {
    let run = service.create(request("audit")).await?;

    let result = service
        .transition(TransitionCheckRunRequest::new(run.id(), "queued"))
        .await;

    eyre::ensure!(
        matches!(result, Err(CheckRunLifecycleError::Validation(_))),
        "expected a validation error, got {result:?}"
    );
    Ok(())
}
