//! Repository port for the external check run store.

use crate::check_run::domain::{CheckRun, CheckRunId, RepoId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for check run repository operations.
pub type CheckRunRepositoryResult<T> = Result<T, CheckRunRepositoryError>;

/// Check run persistence contract.
///
/// Implementations serialize writes to the same record. [`Self::update`]
/// takes the `updated_at` value the caller read so that two producers
/// racing from the same read cannot both succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckRunRepository: Send + Sync {
    /// Reserves the identifier for a new check run.
    async fn next_id(&self) -> CheckRunRepositoryResult<CheckRunId>;

    /// Stores a new check run.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunRepositoryError::DuplicateCheckRun`] when the
    /// identifier already exists.
    async fn store(&self, run: &CheckRun) -> CheckRunRepositoryResult<()>;

    /// Replaces an existing check run.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunRepositoryError::NotFound`] when the record does
    /// not exist, or [`CheckRunRepositoryError::Conflict`] when the stored
    /// `updated_at` differs from `expected_updated_at`.
    async fn update(
        &self,
        run: &CheckRun,
        expected_updated_at: DateTime<Utc>,
    ) -> CheckRunRepositoryResult<()>;

    /// Finds a check run by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(&self, id: CheckRunId) -> CheckRunRepositoryResult<Option<CheckRun>>;

    /// Returns every check run reported against `commit_id` in a
    /// repository, in creation order.
    async fn find_by_commit(
        &self,
        repo_id: RepoId,
        commit_id: &str,
    ) -> CheckRunRepositoryResult<Vec<CheckRun>>;
}

/// Errors returned by check run repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CheckRunRepositoryError {
    /// A check run with the same identifier already exists.
    #[error("duplicate check run identifier: {0}")]
    DuplicateCheckRun(CheckRunId),

    /// The check run was not found.
    #[error("check run not found: {0}")]
    NotFound(CheckRunId),

    /// The stored record changed since the caller read it.
    #[error("check run {id} was modified concurrently (expected {expected}, found {actual})")]
    Conflict {
        /// Check run identifier.
        id: CheckRunId,
        /// `updated_at` the caller read.
        expected: DateTime<Utc>,
        /// `updated_at` currently stored.
        actual: DateTime<Utc>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CheckRunRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
