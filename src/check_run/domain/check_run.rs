//! Check run aggregate root and its lifecycle operations.

use super::{
    Annotation, AppId, CheckRunConclusion, CheckRunId, CheckRunStatus, DisplayMode,
    MergeRequestId, Operation, RepoId, ValidationError,
    limits::{
        MAX_DESCRIPTION_CHARS, MAX_TEXT_CHARS, MAX_URL_CHARS, truncate_chars,
        truncate_optional_chars, truncated,
    },
};
use crate::check_run::validation::validate_check_run;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// Human-readable output of a check run.
///
/// Unset fields are left untouched by [`CheckRun::update_output`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckRunOutput {
    /// One-line summary.
    pub description: Option<String>,
    /// Plain-text or Markdown report.
    pub text: Option<String>,
    /// Pre-rendered HTML report.
    pub text_html: Option<String>,
}

impl CheckRunOutput {
    /// Creates an empty output update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the text report.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the HTML report.
    #[must_use]
    pub fn with_text_html(mut self, text_html: impl Into<String>) -> Self {
        self.text_html = Some(text_html.into());
        self
    }
}

/// Parameter object for creating a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckRun {
    repo_id: RepoId,
    app_id: AppId,
    commit_id: String,
    name: String,
    merge_request_id: Option<MergeRequestId>,
    branch: Option<String>,
    external_id: Option<String>,
    output: CheckRunOutput,
    details_url: Option<String>,
    display_mode: DisplayMode,
    annotations: Vec<Annotation>,
    operations: Vec<Operation>,
}

impl NewCheckRun {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        repo_id: RepoId,
        app_id: AppId,
        commit_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            repo_id,
            app_id,
            commit_id: commit_id.into(),
            name: name.into(),
            merge_request_id: None,
            branch: None,
            external_id: None,
            output: CheckRunOutput::default(),
            details_url: None,
            display_mode: DisplayMode::default(),
            annotations: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Scopes the check run to a merge request.
    #[must_use]
    pub const fn with_merge_request_id(mut self, merge_request_id: MergeRequestId) -> Self {
        self.merge_request_id = Some(merge_request_id);
        self
    }

    /// Records the branch the commit was pushed to.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Sets the producer's correlation key.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Sets the initial output.
    #[must_use]
    pub fn with_output(mut self, output: CheckRunOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets the details link.
    #[must_use]
    pub fn with_details_url(mut self, details_url: impl Into<String>) -> Self {
        self.details_url = Some(details_url.into());
        self
    }

    /// Sets the display mode.
    #[must_use]
    pub const fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    /// Sets the initial annotations.
    #[must_use]
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations = annotations.into_iter().collect();
        self
    }

    /// Sets the initial record-level operations.
    #[must_use]
    pub fn with_operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations = operations.into_iter().collect();
        self
    }
}

/// Parameter object for reconstructing a check run from outside data.
///
/// No checks run on reconstruction; call [`CheckRun::validate`] on the
/// result before trusting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCheckRunData {
    /// Store-assigned identifier.
    pub id: CheckRunId,
    /// Repository identifier.
    pub repo_id: RepoId,
    /// Producing application identifier.
    pub app_id: AppId,
    /// Checked commit.
    pub commit_id: String,
    /// Merge request scope, if any.
    pub merge_request_id: Option<MergeRequestId>,
    /// Branch name, if known.
    pub branch: Option<String>,
    /// Producer correlation key.
    pub external_id: Option<String>,
    /// Short label.
    pub name: String,
    /// One-line summary.
    pub description: String,
    /// Text report.
    pub text: String,
    /// HTML report.
    pub text_html: String,
    /// Current status.
    pub status: CheckRunStatus,
    /// Conclusion, present only once completed.
    pub conclusion: Option<CheckRunConclusion>,
    /// When the producer started the check.
    pub started_at: Option<DateTime<Utc>>,
    /// When the check completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Details link.
    pub details_url: Option<String>,
    /// Annotations in display order.
    pub annotations: Vec<Annotation>,
    /// Record-level operations in display order.
    pub operations: Vec<Operation>,
    /// Presentation hint.
    pub display_mode: DisplayMode,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Externally assembled requirement flag.
    pub required: Option<bool>,
}

/// Check run aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRun {
    id: CheckRunId,
    repo_id: RepoId,
    app_id: AppId,
    commit_id: String,
    merge_request_id: Option<MergeRequestId>,
    branch: Option<String>,
    external_id: Option<String>,
    name: String,
    description: String,
    text: String,
    text_html: String,
    status: CheckRunStatus,
    conclusion: Option<CheckRunConclusion>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    details_url: Option<String>,
    annotations: Vec<Annotation>,
    operations: Vec<Operation>,
    display_mode: DisplayMode,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    required: Option<bool>,
}

impl CheckRun {
    /// Creates a queued check run.
    ///
    /// Bounded fields are truncated on assignment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvariantViolation`] when an annotation
    /// carries operations without an identifier.
    pub fn new(
        id: CheckRunId,
        request: NewCheckRun,
        clock: &impl Clock,
    ) -> Result<Self, ValidationError> {
        let annotations = prepare_annotations(request.annotations, 0)?;
        let timestamp = clock.utc();
        let output = request.output;
        let mut run = Self {
            id,
            repo_id: request.repo_id,
            app_id: request.app_id,
            commit_id: request.commit_id,
            merge_request_id: request.merge_request_id,
            branch: request.branch,
            external_id: request.external_id,
            name: request.name,
            description: output.description.unwrap_or_default(),
            text: output.text.unwrap_or_default(),
            text_html: output.text_html.unwrap_or_default(),
            status: CheckRunStatus::Queued,
            conclusion: None,
            started_at: None,
            completed_at: None,
            details_url: request.details_url,
            annotations,
            operations: request.operations,
            display_mode: request.display_mode,
            created_at: timestamp,
            updated_at: timestamp,
            required: None,
        };
        run.apply_truncation();
        Ok(run)
    }

    /// Reconstructs a check run without checking it.
    #[must_use]
    pub fn from_persisted(data: PersistedCheckRunData) -> Self {
        Self {
            id: data.id,
            repo_id: data.repo_id,
            app_id: data.app_id,
            commit_id: data.commit_id,
            merge_request_id: data.merge_request_id,
            branch: data.branch,
            external_id: data.external_id,
            name: data.name,
            description: data.description,
            text: data.text,
            text_html: data.text_html,
            status: data.status,
            conclusion: data.conclusion,
            started_at: data.started_at,
            completed_at: data.completed_at,
            details_url: data.details_url,
            annotations: data.annotations,
            operations: data.operations,
            display_mode: data.display_mode,
            created_at: data.created_at,
            updated_at: data.updated_at,
            required: data.required,
        }
    }

    /// Decomposes the check run into its persisted form.
    #[must_use]
    pub fn into_persisted(self) -> PersistedCheckRunData {
        PersistedCheckRunData {
            id: self.id,
            repo_id: self.repo_id,
            app_id: self.app_id,
            commit_id: self.commit_id,
            merge_request_id: self.merge_request_id,
            branch: self.branch,
            external_id: self.external_id,
            name: self.name,
            description: self.description,
            text: self.text,
            text_html: self.text_html,
            status: self.status,
            conclusion: self.conclusion,
            started_at: self.started_at,
            completed_at: self.completed_at,
            details_url: self.details_url,
            annotations: self.annotations,
            operations: self.operations,
            display_mode: self.display_mode,
            created_at: self.created_at,
            updated_at: self.updated_at,
            required: self.required,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> CheckRunId {
        self.id
    }

    /// Returns the repository identifier.
    #[must_use]
    pub const fn repo_id(&self) -> RepoId {
        self.repo_id
    }

    /// Returns the producing application identifier.
    #[must_use]
    pub const fn app_id(&self) -> AppId {
        self.app_id
    }

    /// Returns the checked commit.
    #[must_use]
    pub fn commit_id(&self) -> &str {
        &self.commit_id
    }

    /// Returns the merge request scope, if any.
    #[must_use]
    pub const fn merge_request_id(&self) -> Option<MergeRequestId> {
        self.merge_request_id
    }

    /// Returns the branch name, if known.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Returns the producer correlation key, if any.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Returns the short label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the one-line summary.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the text report.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the HTML report.
    #[must_use]
    pub fn text_html(&self) -> &str {
        &self.text_html
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> CheckRunStatus {
        self.status
    }

    /// Returns the conclusion, present only once completed.
    #[must_use]
    pub const fn conclusion(&self) -> Option<CheckRunConclusion> {
        self.conclusion
    }

    /// Returns when the producer started the check.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the check completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the details link.
    #[must_use]
    pub fn details_url(&self) -> Option<&str> {
        self.details_url.as_deref()
    }

    /// Returns the annotations in display order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns the record-level operations in display order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the presentation hint.
    #[must_use]
    pub const fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the externally assembled requirement flag.
    ///
    /// `None` means the assembly step has not run; it is never inferred.
    #[must_use]
    pub const fn required(&self) -> Option<bool> {
        self.required
    }

    /// Attaches the requirement flag computed by an external query step.
    #[must_use]
    pub const fn with_required(mut self, required: Option<bool>) -> Self {
        self.required = required;
        self
    }

    /// Returns `true` when the status is `completed`.
    #[must_use]
    pub const fn completed(&self) -> bool {
        matches!(self.status, CheckRunStatus::Completed)
    }

    /// Returns `true` when the check run completed with a passing conclusion.
    #[must_use]
    pub const fn passed(&self) -> bool {
        match self.conclusion {
            Some(conclusion) => self.completed() && conclusion.passed(),
            None => false,
        }
    }

    /// Checks every record invariant without mutating.
    ///
    /// All violations are collected; several are reported as
    /// [`ValidationError::Multiple`].
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationError`] when any invariant fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_check_run(self)
    }

    /// Cuts every bounded string and per-annotation operation list down to
    /// its ceiling. Idempotent.
    pub fn apply_truncation(&mut self) {
        truncate_chars(&mut self.description, MAX_DESCRIPTION_CHARS);
        truncate_chars(&mut self.text, MAX_TEXT_CHARS);
        truncate_chars(&mut self.text_html, MAX_TEXT_CHARS);
        truncate_optional_chars(&mut self.details_url, MAX_URL_CHARS);
        for annotation in &mut self.annotations {
            annotation.apply_truncation();
        }
        for operation in &mut self.operations {
            operation.apply_truncation();
        }
    }

    /// Moves a queued check run to `in_progress`, starting now.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IllegalTransition`] unless the status is
    /// `queued`.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), ValidationError> {
        self.start_at(clock.utc(), clock)
    }

    /// Moves a queued check run to `in_progress` with a producer-supplied
    /// start time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IllegalTransition`] unless the status is
    /// `queued`.
    pub fn start_at(
        &mut self,
        started_at: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        self.ensure_transition(CheckRunStatus::InProgress)?;
        self.status = CheckRunStatus::InProgress;
        self.started_at = Some(started_at);
        self.touch(clock);
        Ok(())
    }

    /// Completes the check run now with `conclusion`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IllegalTransition`] when already completed,
    /// or [`ValidationError::InvariantViolation`] when the recorded start
    /// time is later than now.
    pub fn complete(
        &mut self,
        conclusion: CheckRunConclusion,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        self.complete_at(conclusion, clock.utc(), clock)
    }

    /// Completes the check run with a producer-supplied completion time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IllegalTransition`] when already completed,
    /// or [`ValidationError::InvariantViolation`] when `completed_at`
    /// precedes the recorded start time.
    pub fn complete_at(
        &mut self,
        conclusion: CheckRunConclusion,
        completed_at: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        self.ensure_transition(CheckRunStatus::Completed)?;
        if let Some(started_at) = self.started_at
            && started_at > completed_at
        {
            return Err(ValidationError::invariant(
                "completed_at",
                format!("completion time {completed_at} precedes start time {started_at}"),
            ));
        }
        self.status = CheckRunStatus::Completed;
        self.conclusion = Some(conclusion);
        self.completed_at = Some(completed_at);
        self.touch(clock);
        Ok(())
    }

    /// Moves the check run to `target`, stamping the relevant timestamp now.
    ///
    /// A conclusion must accompany `completed` and must not accompany any
    /// other status.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IllegalTransition`] for a disallowed edge
    /// and [`ValidationError::InvariantViolation`] on field `conclusion`
    /// when the conclusion does not fit the target status.
    pub fn transition_to(
        &mut self,
        target: CheckRunStatus,
        conclusion: Option<CheckRunConclusion>,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        self.ensure_transition(target)?;
        match (target, conclusion) {
            (CheckRunStatus::Completed, Some(value)) => self.complete(value, clock),
            (CheckRunStatus::Completed, None) => Err(ValidationError::invariant(
                "conclusion",
                "a conclusion is required when status is completed",
            )),
            (CheckRunStatus::InProgress | CheckRunStatus::Queued, Some(value)) => {
                Err(ValidationError::invariant(
                    "conclusion",
                    format!("conclusion '{value}' is only allowed when status is completed"),
                ))
            }
            (CheckRunStatus::InProgress, None) => self.start(clock),
            (CheckRunStatus::Queued, None) => Err(self.illegal_transition(target)),
        }
    }

    /// Appends an annotation after truncating it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvariantViolation`] when the annotation
    /// carries operations without an identifier.
    pub fn add_annotation(
        &mut self,
        annotation: Annotation,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        self.add_annotations([annotation], clock)
    }

    /// Appends several annotations, all or none.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvariantViolation`] when any annotation
    /// carries operations without an identifier; nothing is appended then.
    pub fn add_annotations(
        &mut self,
        annotations: impl IntoIterator<Item = Annotation>,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        let prepared = prepare_annotations(annotations, self.annotations.len())?;
        self.annotations.extend(prepared);
        self.touch(clock);
        Ok(())
    }

    /// Appends a record-level operation after truncating it.
    pub fn add_operation(&mut self, mut operation: Operation, clock: &impl Clock) {
        operation.apply_truncation();
        self.operations.push(operation);
        self.touch(clock);
    }

    /// Replaces the output fields that are set in `output`.
    pub fn update_output(&mut self, output: CheckRunOutput, clock: &impl Clock) {
        if let Some(description) = output.description {
            self.description = truncated(description, MAX_DESCRIPTION_CHARS);
        }
        if let Some(text) = output.text {
            self.text = truncated(text, MAX_TEXT_CHARS);
        }
        if let Some(text_html) = output.text_html {
            self.text_html = truncated(text_html, MAX_TEXT_CHARS);
        }
        self.touch(clock);
    }

    /// Sets or clears the details link.
    pub fn set_details_url(&mut self, details_url: Option<String>, clock: &impl Clock) {
        self.details_url = details_url.map(|url| truncated(url, MAX_URL_CHARS));
        self.touch(clock);
    }

    /// Sets the presentation hint.
    pub fn set_display_mode(&mut self, display_mode: DisplayMode, clock: &impl Clock) {
        self.display_mode = display_mode;
        self.touch(clock);
    }

    fn ensure_transition(&self, target: CheckRunStatus) -> Result<(), ValidationError> {
        if self.status.can_transition_to(target) {
            return Ok(());
        }
        Err(self.illegal_transition(target))
    }

    const fn illegal_transition(&self, target: CheckRunStatus) -> ValidationError {
        ValidationError::IllegalTransition {
            from: self.status,
            to: target,
        }
    }

    /// Moves `updated_at` strictly forward, to now or one nanosecond past
    /// the previous value when the clock has not moved on.
    fn touch(&mut self, clock: &impl Clock) {
        let next = self
            .updated_at
            .checked_add_signed(TimeDelta::nanoseconds(1))
            .unwrap_or(self.updated_at);
        self.updated_at = clock.utc().max(next);
    }
}

/// Truncates incoming annotations and rejects any that carry operations
/// without an identifier. `offset` is the index of the first one in the
/// record, used for field paths.
fn prepare_annotations(
    annotations: impl IntoIterator<Item = Annotation>,
    offset: usize,
) -> Result<Vec<Annotation>, ValidationError> {
    let mut prepared = Vec::new();
    let mut errors = Vec::new();
    for (index, mut annotation) in annotations.into_iter().enumerate() {
        annotation.apply_truncation();
        if annotation.has_operations() && annotation.id.is_none() {
            errors.push(ValidationError::invariant(
                format!("annotations[{}].id", offset + index),
                "an identifier is required when operations are present",
            ));
        }
        prepared.push(annotation);
    }
    if errors.is_empty() {
        Ok(prepared)
    } else {
        Err(ValidationError::multiple(errors))
    }
}
