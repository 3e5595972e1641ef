//! Shared fixtures for check run unit tests.

use crate::check_run::domain::{
    AppId, CheckRun, CheckRunId, CheckRunStatus, DisplayMode, NewCheckRun, PersistedCheckRunData,
    RepoId,
};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that moves forward one second on every reading.
#[derive(Debug, Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl StepClock {
    /// First instant the clock reports.
    pub fn base() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_458)
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Self::base() + TimeDelta::seconds(tick)
    }
}

/// Clock that always reports [`StepClock::base`].
#[derive(Debug, Default)]
pub struct FrozenClock;

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        StepClock::base()
    }
}

#[fixture]
pub fn clock() -> StepClock {
    StepClock::default()
}

pub fn new_request() -> NewCheckRun {
    NewCheckRun::new(RepoId::new(11), AppId::new(3), "4b825dc6", "unit-tests")
}

pub fn queued_run(clock: &StepClock) -> Result<CheckRun, eyre::Report> {
    Ok(CheckRun::new(CheckRunId::new(1), new_request(), clock)?)
}

/// A valid queued record in persisted form, for tests that need to build
/// states the domain API refuses to produce.
pub fn persisted_queued() -> PersistedCheckRunData {
    let timestamp = StepClock::base();
    PersistedCheckRunData {
        id: CheckRunId::new(1),
        repo_id: RepoId::new(11),
        app_id: AppId::new(3),
        commit_id: "4b825dc6".to_owned(),
        merge_request_id: None,
        branch: None,
        external_id: None,
        name: "unit-tests".to_owned(),
        description: String::new(),
        text: String::new(),
        text_html: String::new(),
        status: CheckRunStatus::Queued,
        conclusion: None,
        started_at: None,
        completed_at: None,
        details_url: None,
        annotations: Vec::new(),
        operations: Vec::new(),
        display_mode: DisplayMode::Default,
        created_at: timestamp,
        updated_at: timestamp,
        required: None,
    }
}
