//! Domain model for check runs.
//!
//! A check run reports the outcome of one automated check against a commit,
//! optionally scoped to a merge request. The domain owns the status state
//! machine, the truncate-on-assign rules for bounded fields and the record
//! invariants. It performs no I/O.

mod annotation;
mod check_run;
mod conclusion;
mod error;
mod ids;
pub mod limits;
mod operation;
mod presentation;
mod status;

pub use annotation::Annotation;
pub use check_run::{CheckRun, CheckRunOutput, NewCheckRun, PersistedCheckRunData};
pub use conclusion::CheckRunConclusion;
pub use error::{DecodeError, ValidationError, ValidationErrorKind};
pub use ids::{AppId, CheckRunId, MergeRequestId, RepoId};
pub use operation::Operation;
pub use presentation::{AnnotationLevel, DisplayMode};
pub use status::CheckRunStatus;
