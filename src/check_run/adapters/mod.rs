//! Adapter implementations for check run ports and the wire contract.

pub mod json;
pub mod memory;
