//! Checkrun: the check run record used by code review and CI systems.
//!
//! This crate provides the entity an automated check uses to report its
//! progress and outcome against a commit or merge request, together with the
//! rules that keep the record consistent: the status state machine, the
//! conclusion classification, truncate-on-assign ceilings for bounded fields
//! and invariant validation.
//!
//! # Architecture
//!
//! Checkrun follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports and the wire contract
//!
//! # Modules
//!
//! - [`check_run`]: Check run records, validation and lifecycle services
//! - [`telemetry`]: Tracing subscriber set-up for embedding binaries

pub mod check_run;
pub mod telemetry;
