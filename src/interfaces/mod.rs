//! File-format adapters for the CLI harness.

pub mod csv;
pub mod json;
