//! Wire documents for the check run data contract.
//!
//! Enum fields are carried as raw tokens and parsed during conversion so an
//! unknown token surfaces as a typed [`DecodeError`] instead of an opaque
//! parser message.

use crate::check_run::domain::{
    Annotation, AnnotationLevel, AppId, CheckRun, CheckRunConclusion, CheckRunId,
    CheckRunStatus, DecodeError, DisplayMode, MergeRequestId, Operation, PersistedCheckRunData,
    RepoId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialized form of a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunDocument {
    /// Store-assigned identifier.
    pub id: CheckRunId,
    /// Repository identifier.
    pub repo_id: RepoId,
    /// Producing application identifier.
    pub app_id: AppId,
    /// Checked commit.
    pub commit_id: String,
    /// Merge request scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_request_id: Option<MergeRequestId>,
    /// Branch name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Producer correlation key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Short label.
    pub name: String,
    /// One-line summary.
    #[serde(default)]
    pub description: String,
    /// Text report.
    #[serde(default)]
    pub text: String,
    /// HTML report.
    #[serde(default)]
    pub text_html: String,
    /// Status token.
    pub status: String,
    /// Conclusion token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    /// Start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Completion time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Details link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,
    /// Annotations in display order.
    #[serde(default)]
    pub annotations: Vec<AnnotationDocument>,
    /// Record-level operations in display order.
    #[serde(default)]
    pub operations: Vec<OperationDocument>,
    /// Display mode token.
    #[serde(default = "default_display_mode")]
    pub display_mode: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Externally assembled requirement flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

fn default_display_mode() -> String {
    DisplayMode::default().as_str().to_owned()
}

/// Serialized form of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    /// Identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// File path.
    pub path: String,
    /// First line.
    pub start_line: u32,
    /// First column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u32>,
    /// Last line.
    pub end_line: u32,
    /// Last column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    /// Level token.
    pub level: String,
    /// Message body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Details link; emitted as `null` when absent.
    #[serde(default)]
    pub details_url: Option<String>,
    /// Buttons in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<OperationDocument>,
    /// Fold hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folded: Option<bool>,
}

/// Serialized form of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDocument {
    /// Identifier.
    pub id: String,
    /// Button text.
    pub label: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Target link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
}

impl From<&Operation> for OperationDocument {
    fn from(operation: &Operation) -> Self {
        Self {
            id: operation.id.clone(),
            label: operation.label.clone(),
            description: operation.description.clone(),
            target_url: operation.target_url.clone(),
        }
    }
}

impl From<OperationDocument> for Operation {
    fn from(document: OperationDocument) -> Self {
        Self {
            id: document.id,
            label: document.label,
            description: document.description,
            target_url: document.target_url,
        }
    }
}

impl From<&Annotation> for AnnotationDocument {
    fn from(annotation: &Annotation) -> Self {
        Self {
            id: annotation.id.clone(),
            path: annotation.path.clone(),
            start_line: annotation.start_line,
            start_column: annotation.start_column,
            end_line: annotation.end_line,
            end_column: annotation.end_column,
            level: annotation.level.as_str().to_owned(),
            message: annotation.message.clone(),
            details_url: annotation.details_url.clone(),
            operations: annotation.operations.iter().map(Into::into).collect(),
            folded: annotation.folded,
        }
    }
}

impl TryFrom<AnnotationDocument> for Annotation {
    type Error = DecodeError;

    fn try_from(document: AnnotationDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document.id,
            path: document.path,
            start_line: document.start_line,
            start_column: document.start_column,
            end_line: document.end_line,
            end_column: document.end_column,
            level: AnnotationLevel::try_from(document.level.as_str())?,
            message: document.message,
            details_url: document.details_url,
            operations: document.operations.into_iter().map(Into::into).collect(),
            folded: document.folded,
        })
    }
}

impl From<&CheckRun> for CheckRunDocument {
    fn from(run: &CheckRun) -> Self {
        Self {
            id: run.id(),
            repo_id: run.repo_id(),
            app_id: run.app_id(),
            commit_id: run.commit_id().to_owned(),
            merge_request_id: run.merge_request_id(),
            branch: run.branch().map(ToOwned::to_owned),
            external_id: run.external_id().map(ToOwned::to_owned),
            name: run.name().to_owned(),
            description: run.description().to_owned(),
            text: run.text().to_owned(),
            text_html: run.text_html().to_owned(),
            status: run.status().as_str().to_owned(),
            conclusion: run.conclusion().map(|value| value.as_str().to_owned()),
            started_at: run.started_at(),
            completed_at: run.completed_at(),
            details_url: run.details_url().map(ToOwned::to_owned),
            annotations: run.annotations().iter().map(Into::into).collect(),
            operations: run.operations().iter().map(Into::into).collect(),
            display_mode: run.display_mode().as_str().to_owned(),
            created_at: run.created_at(),
            updated_at: run.updated_at(),
            required: run.required(),
        }
    }
}

impl TryFrom<CheckRunDocument> for CheckRun {
    type Error = DecodeError;

    fn try_from(document: CheckRunDocument) -> Result<Self, Self::Error> {
        let status = CheckRunStatus::try_from(document.status.as_str())?;
        let conclusion = document
            .conclusion
            .as_deref()
            .map(CheckRunConclusion::try_from)
            .transpose()?;
        let display_mode = DisplayMode::try_from(document.display_mode.as_str())?;
        let annotations = document
            .annotations
            .into_iter()
            .map(Annotation::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_persisted(PersistedCheckRunData {
            id: document.id,
            repo_id: document.repo_id,
            app_id: document.app_id,
            commit_id: document.commit_id,
            merge_request_id: document.merge_request_id,
            branch: document.branch,
            external_id: document.external_id,
            name: document.name,
            description: document.description,
            text: document.text,
            text_html: document.text_html,
            status,
            conclusion,
            started_at: document.started_at,
            completed_at: document.completed_at,
            details_url: document.details_url,
            annotations,
            operations: document.operations.into_iter().map(Into::into).collect(),
            display_mode,
            created_at: document.created_at,
            updated_at: document.updated_at,
            required: document.required,
        }))
    }
}
