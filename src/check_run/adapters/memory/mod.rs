//! In-memory adapters for check run storage.

mod check_run;

pub use check_run::InMemoryCheckRunRepository;
