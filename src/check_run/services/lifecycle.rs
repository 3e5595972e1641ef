//! Service layer for check run creation, transitions and updates.

use crate::check_run::{
    domain::{
        Annotation, CheckRun, CheckRunConclusion, CheckRunId, CheckRunOutput, CheckRunStatus,
        DecodeError, DisplayMode, NewCheckRun, Operation, RepoId, ValidationError,
    },
    ports::{CheckRunRepository, CheckRunRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::CheckRunPolicy;

/// Request payload for moving a check run by raw status tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCheckRunRequest {
    id: CheckRunId,
    status: String,
    conclusion: Option<String>,
}

impl TransitionCheckRunRequest {
    /// Creates a request to move `id` to `status`.
    #[must_use]
    pub fn new(id: CheckRunId, status: impl Into<String>) -> Self {
        Self {
            id,
            status: status.into(),
            conclusion: None,
        }
    }

    /// Sets the conclusion token.
    #[must_use]
    pub fn with_conclusion(mut self, conclusion: impl Into<String>) -> Self {
        self.conclusion = Some(conclusion.into());
        self
    }
}

/// Service-level errors for check run operations.
#[derive(Debug, Error)]
pub enum CheckRunLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A raw enum token could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CheckRunRepositoryError),
    /// No check run exists with the given identifier.
    #[error("check run {0} not found")]
    NotFound(CheckRunId),
    /// The check run is completed and the policy forbids further changes.
    #[error("check run {0} is completed and locked against further changes")]
    CompletedRecordLocked(CheckRunId),
}

/// Result type for check run service operations.
pub type CheckRunLifecycleResult<T> = Result<T, CheckRunLifecycleError>;

/// Check run orchestration service.
///
/// Every write truncates, optionally validates, and is stored with
/// optimistic concurrency on `updated_at`.
#[derive(Clone)]
pub struct CheckRunLifecycleService<R, C>
where
    R: CheckRunRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: CheckRunPolicy,
}

impl<R, C> CheckRunLifecycleService<R, C>
where
    R: CheckRunRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default policy.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            policy: CheckRunPolicy::default(),
        }
    }

    /// Replaces the write policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: CheckRunPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active write policy.
    #[must_use]
    pub const fn policy(&self) -> CheckRunPolicy {
        self.policy
    }

    /// Creates and stores a queued check run.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::Validation`] when the request breaks
    /// an invariant, or a repository error when storage fails.
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: NewCheckRun) -> CheckRunLifecycleResult<CheckRun> {
        let id = self.repository.next_id().await?;
        let run = CheckRun::new(id, request, &*self.clock).inspect_err(|err| {
            warn!(check_run_id = %id, error = %err, "rejected check run creation");
        })?;
        self.check_before_write(&run)?;
        self.repository.store(&run).await?;
        debug!(
            check_run_id = %run.id(),
            repo_id = %run.repo_id(),
            commit_id = run.commit_id(),
            name = run.name(),
            "created check run"
        );
        Ok(run)
    }

    /// Moves a queued check run to `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::NotFound`], an illegal transition,
    /// or a repository error.
    #[instrument(skip(self))]
    pub async fn start(&self, id: CheckRunId) -> CheckRunLifecycleResult<CheckRun> {
        self.apply_transition(id, CheckRunStatus::InProgress, None)
            .await
    }

    /// Completes a check run with `conclusion`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::NotFound`], an illegal transition,
    /// or a repository error.
    #[instrument(skip(self))]
    pub async fn complete(
        &self,
        id: CheckRunId,
        conclusion: CheckRunConclusion,
    ) -> CheckRunLifecycleResult<CheckRun> {
        self.apply_transition(id, CheckRunStatus::Completed, Some(conclusion))
            .await
    }

    /// Moves a check run using raw status and conclusion tokens.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::Decode`] for unknown tokens, plus
    /// every error [`Self::complete`] can return.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        request: TransitionCheckRunRequest,
    ) -> CheckRunLifecycleResult<CheckRun> {
        let status = CheckRunStatus::try_from(request.status.as_str())?;
        let conclusion = request
            .conclusion
            .as_deref()
            .map(CheckRunConclusion::try_from)
            .transpose()?;
        self.apply_transition(request.id, status, conclusion).await
    }

    /// Appends annotations, all or none.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::CompletedRecordLocked`] under a
    /// strict policy, a validation error when an annotation carries
    /// operations without an identifier, or a repository error.
    #[instrument(skip(self, annotations), fields(count = annotations.len()))]
    pub async fn add_annotations(
        &self,
        id: CheckRunId,
        annotations: Vec<Annotation>,
    ) -> CheckRunLifecycleResult<CheckRun> {
        self.mutate(id, true, |run, clock| run.add_annotations(annotations, clock))
            .await
    }

    /// Appends a record-level operation.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::CompletedRecordLocked`] under a
    /// strict policy, or a repository error.
    #[instrument(skip(self, operation))]
    pub async fn add_operation(
        &self,
        id: CheckRunId,
        operation: Operation,
    ) -> CheckRunLifecycleResult<CheckRun> {
        self.mutate(id, true, |run, clock| {
            run.add_operation(operation, clock);
            Ok(())
        })
        .await
    }

    /// Replaces the output fields that are set in `output`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::CompletedRecordLocked`] under a
    /// strict policy, or a repository error.
    #[instrument(skip(self, output))]
    pub async fn update_output(
        &self,
        id: CheckRunId,
        output: CheckRunOutput,
    ) -> CheckRunLifecycleResult<CheckRun> {
        self.mutate(id, true, |run, clock| {
            run.update_output(output, clock);
            Ok(())
        })
        .await
    }

    /// Sets the presentation hint.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::CompletedRecordLocked`] under a
    /// strict policy, or a repository error.
    #[instrument(skip(self))]
    pub async fn set_display_mode(
        &self,
        id: CheckRunId,
        display_mode: DisplayMode,
    ) -> CheckRunLifecycleResult<CheckRun> {
        self.mutate(id, true, |run, clock| {
            run.set_display_mode(display_mode, clock);
            Ok(())
        })
        .await
    }

    /// Finds a check run by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::Repository`] when lookup fails.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: CheckRunId) -> CheckRunLifecycleResult<Option<CheckRun>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every check run for a commit, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckRunLifecycleError::Repository`] when lookup fails.
    #[instrument(skip(self))]
    pub async fn find_by_commit(
        &self,
        repo_id: RepoId,
        commit_id: &str,
    ) -> CheckRunLifecycleResult<Vec<CheckRun>> {
        let runs = self.repository.find_by_commit(repo_id, commit_id).await?;
        debug!(found = runs.len(), "looked up check runs for commit");
        Ok(runs)
    }

    async fn apply_transition(
        &self,
        id: CheckRunId,
        target: CheckRunStatus,
        conclusion: Option<CheckRunConclusion>,
    ) -> CheckRunLifecycleResult<CheckRun> {
        let mut from = None;
        let run = self
            .mutate(id, false, |run, clock| {
                from = Some(run.status());
                run.transition_to(target, conclusion, clock)
            })
            .await?;
        info!(
            check_run_id = %id,
            from = from.map(CheckRunStatus::as_str),
            to = %target,
            conclusion = conclusion.map(CheckRunConclusion::as_str),
            "check run status changed"
        );
        Ok(run)
    }

    /// Reads, mutates and writes back a check run under optimistic
    /// concurrency.
    async fn mutate<F>(
        &self,
        id: CheckRunId,
        locked_when_completed: bool,
        change: F,
    ) -> CheckRunLifecycleResult<CheckRun>
    where
        F: FnOnce(&mut CheckRun, &C) -> Result<(), ValidationError>,
    {
        let mut run = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CheckRunLifecycleError::NotFound(id))?;
        let expected_updated_at = run.updated_at();

        if locked_when_completed && run.completed() && !self.policy.allow_mutation_after_completion
        {
            warn!(check_run_id = %id, "rejected change to completed check run");
            return Err(CheckRunLifecycleError::CompletedRecordLocked(id));
        }

        change(&mut run, &*self.clock).inspect_err(|err| {
            warn!(check_run_id = %id, error = %err, "rejected check run change");
        })?;
        run.apply_truncation();
        self.check_before_write(&run)?;

        self.repository
            .update(&run, expected_updated_at)
            .await
            .inspect_err(|err| {
                if matches!(err, CheckRunRepositoryError::Conflict { .. }) {
                    warn!(check_run_id = %id, error = %err, "concurrent check run update");
                }
            })?;
        Ok(run)
    }

    fn check_before_write(&self, run: &CheckRun) -> Result<(), ValidationError> {
        if !self.policy.validate_before_write {
            return Ok(());
        }
        run.validate().inspect_err(|err| {
            warn!(check_run_id = %run.id(), error = %err, "check run failed validation");
        })
    }
}
