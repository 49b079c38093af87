//! rill - A minimal pull-based relational evaluation engine
//!
//! rill evaluates a linear chain of relational stages over an abstract
//! row source: derived tables that compute and rename columns, and a
//! terminal projection that fixes the output shape. Non-deterministic
//! scalar functions are materialized once per logical occurrence per
//! row, so repeated calls in one row are independent draws.

pub mod common;
pub mod execution;
pub mod expression;
pub mod types;

// Re-export common types for convenience
pub use common::{RillError, RillResult};

// Re-export type system for convenience
pub use types::{Column, LogicalType, Row, Schema, Value};

// Re-export expression system for convenience
pub use expression::{
    ComparisonType, Expression, ExpressionEvaluator, ScalarFunction, ScalarFunctionLibrary,
};

// Re-export execution system for convenience
pub use execution::{
    DerivedTableStage, ExecutionContext, MemoryRowSource, Pipeline, ProjectionStage, RowSource,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn smoke_single_stage_pipeline() -> RillResult<()> {
        let functions = Arc::new(ScalarFunctionLibrary::new());
        let source = MemoryRowSource::from_values(
            "x",
            LogicalType::Integer,
            vec![Value::integer(5)],
        )?;
        let rows = Pipeline::scan(source)
            .project(
                vec![("x".to_string(), Expression::column("x"))],
                ExecutionContext::new(functions),
            )?
            .collect()?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }
}
