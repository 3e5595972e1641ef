//! Check run records and their lifecycle.
//!
//! A check run reports the status of an automated check against a commit:
//! whether it is queued, running or completed, how it concluded, and the
//! annotations and operations it carries. The module follows hexagonal
//! architecture:
//!
//! - Domain types, the status state machine and truncation rules in
//!   [`domain`]
//! - The invariant rule set in [`validation`]
//! - Port contracts for the external store in [`ports`]
//! - Adapter implementations and the JSON data contract in [`adapters`]
//! - Orchestration services and write policy in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
