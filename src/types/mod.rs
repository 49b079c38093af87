//! Type system module for rill
//!
//! This module contains the core type system components:
//! - LogicalType: SQL-level type abstractions
//! - Value: Single value containers with type information
//! - Schema/Row: ordered, named tuples flowing through the pipeline

pub mod logical_type;
pub mod row;
pub mod value;

// Re-export main types for convenience
pub use logical_type::LogicalType;
pub use row::{Column, Row, Schema};
pub use value::Value;
