//! Step definitions for check run lifecycle scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
