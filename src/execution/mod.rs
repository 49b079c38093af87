//! Execution engine for rill
//!
//! This module provides the pull-based execution pipeline: row sources,
//! the per-stage execution context, the derived-table and projection
//! stages, and the terminal pipeline consumer.

pub mod context;
pub mod operators;
pub mod pipeline;
pub mod source;

pub use context::*;
pub use operators::*;
pub use pipeline::*;
pub use source::*;
