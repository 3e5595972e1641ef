//! Given steps for check run lifecycle BDD scenarios.

use super::world::{CheckRunWorld, run_async};
use checkrun::check_run::domain::{AppId, CheckRunConclusion, CheckRunOutput, NewCheckRun, RepoId};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a check run "{name}" for commit "{commit_id}" in repository {repo_id:i64}"#)]
fn check_run_request(world: &mut CheckRunWorld, name: String, commit_id: String, repo_id: i64) {
    world.pending_request = Some(NewCheckRun::new(
        RepoId::new(repo_id),
        AppId::new(1),
        commit_id,
        name,
    ));
}

#[given("the check run description has {length:usize} characters")]
fn description_length(world: &mut CheckRunWorld, length: usize) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    world.pending_request =
        Some(request.with_output(CheckRunOutput::new().with_description("d".repeat(length))));
    Ok(())
}

#[given("the check run has been created")]
fn check_run_created(world: &mut CheckRunWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    let created = run_async(world.service.create(request)).wrap_err("create check run")?;
    world.last_check_run = Some(created);
    Ok(())
}

#[given(r#"the check run has been completed with conclusion "{conclusion}""#)]
fn check_run_completed(
    world: &mut CheckRunWorld,
    conclusion: String,
) -> Result<(), eyre::Report> {
    let parsed = CheckRunConclusion::try_from(conclusion.as_str())?;
    let id = world.check_run()?.id();
    let completed = run_async(world.service.complete(id, parsed))
        .wrap_err("complete check run in scenario setup")?;
    world.last_check_run = Some(completed);
    Ok(())
}
