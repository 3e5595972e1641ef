//! In-memory repository for check run tests and embedders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::check_run::{
    domain::{CheckRun, CheckRunId, RepoId},
    ports::{CheckRunRepository, CheckRunRepositoryError, CheckRunRepositoryResult},
};

/// Thread-safe in-memory check run repository.
///
/// Identifiers are handed out from a counter starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCheckRunRepository {
    state: Arc<RwLock<InMemoryCheckRunState>>,
}

#[derive(Debug, Default)]
struct InMemoryCheckRunState {
    last_id: i64,
    runs: HashMap<CheckRunId, CheckRun>,
    commit_index: HashMap<(RepoId, String), Vec<CheckRunId>>,
}

impl InMemoryCheckRunRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CheckRunRepositoryError {
    CheckRunRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Removes a check run ID from the commit index, dropping the entry if empty.
fn remove_from_index(
    index: &mut HashMap<(RepoId, String), Vec<CheckRunId>>,
    id: CheckRunId,
    key: &(RepoId, String),
) {
    if let Some(ids) = index.get_mut(key) {
        ids.retain(|existing| *existing != id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

#[async_trait]
impl CheckRunRepository for InMemoryCheckRunRepository {
    async fn next_id(&self) -> CheckRunRepositoryResult<CheckRunId> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.last_id = state.last_id.saturating_add(1);
        Ok(CheckRunId::new(state.last_id))
    }

    async fn store(&self, run: &CheckRun) -> CheckRunRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.runs.contains_key(&run.id()) {
            return Err(CheckRunRepositoryError::DuplicateCheckRun(run.id()));
        }

        state
            .commit_index
            .entry((run.repo_id(), run.commit_id().to_owned()))
            .or_default()
            .push(run.id());
        state.last_id = state.last_id.max(run.id().value());
        state.runs.insert(run.id(), run.clone());
        Ok(())
    }

    async fn update(
        &self,
        run: &CheckRun,
        expected_updated_at: DateTime<Utc>,
    ) -> CheckRunRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .runs
            .get(&run.id())
            .ok_or(CheckRunRepositoryError::NotFound(run.id()))?;

        if stored.updated_at() != expected_updated_at {
            return Err(CheckRunRepositoryError::Conflict {
                id: run.id(),
                expected: expected_updated_at,
                actual: stored.updated_at(),
            });
        }

        let old_key = (stored.repo_id(), stored.commit_id().to_owned());
        let new_key = (run.repo_id(), run.commit_id().to_owned());
        if old_key != new_key {
            remove_from_index(&mut state.commit_index, run.id(), &old_key);
            state.commit_index.entry(new_key).or_default().push(run.id());
        }
        state.runs.insert(run.id(), run.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CheckRunId) -> CheckRunRepositoryResult<Option<CheckRun>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.runs.get(&id).cloned())
    }

    async fn find_by_commit(
        &self,
        repo_id: RepoId,
        commit_id: &str,
    ) -> CheckRunRepositoryResult<Vec<CheckRun>> {
        let state = self.state.read().map_err(lock_error)?;
        let runs = state
            .commit_index
            .get(&(repo_id, commit_id.to_owned()))
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.runs.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(runs)
    }
}
