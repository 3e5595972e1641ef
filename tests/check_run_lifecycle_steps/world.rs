//! Shared world state for check run lifecycle BDD scenarios.

use std::sync::Arc;

use checkrun::check_run::{
    adapters::memory::InMemoryCheckRunRepository,
    domain::{CheckRun, NewCheckRun},
    services::{CheckRunLifecycleError, CheckRunLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestCheckRunService = CheckRunLifecycleService<InMemoryCheckRunRepository, DefaultClock>;

/// Scenario world for check run behaviour tests.
pub struct CheckRunWorld {
    pub service: TestCheckRunService,
    pub pending_request: Option<NewCheckRun>,
    pub last_check_run: Option<CheckRun>,
    pub last_change_result: Option<Result<CheckRun, CheckRunLifecycleError>>,
}

impl CheckRunWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let service = CheckRunLifecycleService::new(
            Arc::new(InMemoryCheckRunRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            pending_request: None,
            last_check_run: None,
            last_change_result: None,
        }
    }

    /// Returns the most recently stored check run.
    ///
    /// # Errors
    ///
    /// Returns an error when no check run has been created yet.
    pub fn check_run(&self) -> Result<&CheckRun, eyre::Report> {
        self.last_check_run
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing check run in scenario world"))
    }

    /// Records the outcome of a service call, keeping the record on success.
    pub fn record(&mut self, result: Result<CheckRun, CheckRunLifecycleError>) {
        if let Ok(ref updated) = result {
            self.last_check_run = Some(updated.clone());
        }
        self.last_change_result = Some(result);
    }
}

impl Default for CheckRunWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CheckRunWorld {
    CheckRunWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
