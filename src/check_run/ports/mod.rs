//! Port contracts for check run storage.
//!
//! Ports define infrastructure-agnostic interfaces used by check run
//! services.

pub mod repository;

#[cfg(test)]
pub use repository::MockCheckRunRepository;
pub use repository::{CheckRunRepository, CheckRunRepositoryError, CheckRunRepositoryResult};
