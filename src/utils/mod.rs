//! Utility helpers for workflow definitions.
pub mod script;

pub use script::lines;
