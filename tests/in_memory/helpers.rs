//! Shared test helpers for in-memory repository integration tests.

use std::sync::Arc;

use checkrun::check_run::{
    adapters::memory::InMemoryCheckRunRepository,
    domain::{AppId, NewCheckRun, RepoId},
    services::CheckRunLifecycleService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service wired to the in-memory repository and the system clock.
pub type TestService = CheckRunLifecycleService<InMemoryCheckRunRepository, DefaultClock>;

/// Repository this suite reports against.
pub const REPO: RepoId = RepoId::new(42);

/// Commit this suite reports against.
pub const COMMIT: &str = "d670460b4b4aece5915caf5c68d12f560a9fe3e4";

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> Arc<InMemoryCheckRunRepository> {
    Arc::new(InMemoryCheckRunRepository::new())
}

/// Provides a service backed by a fresh repository.
#[fixture]
pub fn service() -> TestService {
    service_over(Arc::new(InMemoryCheckRunRepository::new()))
}

/// Builds a service over an existing repository.
pub fn service_over(repository: Arc<InMemoryCheckRunRepository>) -> TestService {
    CheckRunLifecycleService::new(repository, Arc::new(DefaultClock))
}

/// Builds a creation request named `name` for the suite commit.
pub fn request(name: &str) -> NewCheckRun {
    NewCheckRun::new(REPO, AppId::new(5), COMMIT, name)
}
