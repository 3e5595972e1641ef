//! Application services for check run orchestration.

mod lifecycle;
mod policy;

pub use lifecycle::{
    CheckRunLifecycleError, CheckRunLifecycleResult, CheckRunLifecycleService,
    TransitionCheckRunRequest,
};
pub use policy::CheckRunPolicy;
