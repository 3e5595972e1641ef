//! When steps for check run lifecycle BDD scenarios.

use super::world::{CheckRunWorld, run_async};
use checkrun::check_run::{
    domain::{Annotation, AnnotationLevel, CheckRunConclusion, Operation},
    services::TransitionCheckRunRequest,
};
use rstest_bdd_macros::when;

#[when("the check run is started")]
fn start_check_run(world: &mut CheckRunWorld) -> Result<(), eyre::Report> {
    let id = world.check_run()?.id();
    let result = run_async(world.service.start(id));
    world.record(result);
    Ok(())
}

#[when(r#"the check run is completed with conclusion "{conclusion}""#)]
fn complete_check_run(world: &mut CheckRunWorld, conclusion: String) -> Result<(), eyre::Report> {
    let parsed = CheckRunConclusion::try_from(conclusion.as_str())?;
    let id = world.check_run()?.id();
    let result = run_async(world.service.complete(id, parsed));
    world.record(result);
    Ok(())
}

#[when(r#"the check run is transitioned to "{status}" with conclusion "{conclusion}""#)]
fn transition_with_conclusion(
    world: &mut CheckRunWorld,
    status: String,
    conclusion: String,
) -> Result<(), eyre::Report> {
    let id = world.check_run()?.id();
    let request = TransitionCheckRunRequest::new(id, status).with_conclusion(conclusion);
    let result = run_async(world.service.transition(request));
    world.record(result);
    Ok(())
}

#[when(r#"the check run is transitioned to "{status}" without a conclusion"#)]
fn transition_without_conclusion(
    world: &mut CheckRunWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.check_run()?.id();
    let result = run_async(
        world
            .service
            .transition(TransitionCheckRunRequest::new(id, status)),
    );
    world.record(result);
    Ok(())
}

#[when(r#"an annotation on "{path}" with an operation but no identifier is added"#)]
fn add_unidentified_annotation(world: &mut CheckRunWorld, path: String) -> Result<(), eyre::Report> {
    let id = world.check_run()?.id();
    let annotation = Annotation::new(path, 4, 4, AnnotationLevel::Warning)
        .with_message("formatting differs")
        .with_operations([Operation::new("format", "Format file")]);
    let result = run_async(world.service.add_annotations(id, vec![annotation]));
    world.record(result);
    Ok(())
}
