//! Pipeline assembly and draining
//!
//! A `Pipeline` wraps the terminal row source of a stage chain and acts
//! as the consumer boundary: stages advance only when the pipeline is
//! pulled, and dropping the pipeline drops the whole chain.

use crate::common::error::RillResult;
use crate::execution::context::ExecutionContext;
use crate::execution::operators::{DerivedTableStage, ProjectionStage};
use crate::execution::source::RowSource;
use crate::expression::Expression;
use crate::types::{Row, Schema};
use std::sync::Arc;

/// A linear chain of stages with a single terminal producer
pub struct Pipeline {
    root: Box<dyn RowSource>,
}

impl Pipeline {
    /// Start a pipeline from a base row source
    pub fn scan(source: impl RowSource + 'static) -> Self {
        Self {
            root: Box::new(source),
        }
    }

    /// Append a derived-table stage computing the given outputs
    pub fn derive(
        self,
        outputs: Vec<(String, Expression)>,
        context: ExecutionContext,
    ) -> RillResult<Self> {
        let stage = DerivedTableStage::new(self.root, outputs, context)?;
        Ok(Self {
            root: Box::new(stage),
        })
    }

    /// Append a projection stage; its schema is the output shape
    pub fn project(
        self,
        outputs: Vec<(String, Expression)>,
        context: ExecutionContext,
    ) -> RillResult<Self> {
        let stage = ProjectionStage::new(self.root, outputs, context)?;
        Ok(Self {
            root: Box::new(stage),
        })
    }

    /// Schema of the rows this pipeline emits
    pub fn schema(&self) -> &Arc<Schema> {
        self.root.schema()
    }

    /// Pull the next output row
    pub fn next_row(&mut self) -> RillResult<Option<Row>> {
        self.root.next_row()
    }

    /// Drain the pipeline into a vector of rows
    pub fn collect(mut self) -> RillResult<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row()? {
            rows.push(row);
        }
        Ok(rows)
    }
}

impl Iterator for Pipeline {
    type Item = RillResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::source::MemoryRowSource;
    use crate::expression::ScalarFunctionLibrary;
    use crate::types::{LogicalType, Value};

    #[test]
    fn test_builder_and_iterator() -> RillResult<()> {
        let functions = Arc::new(ScalarFunctionLibrary::new());
        let source = MemoryRowSource::from_values(
            "x",
            LogicalType::Integer,
            vec![Value::integer(1), Value::integer(2)],
        )?;

        let pipeline = Pipeline::scan(source).project(
            vec![("x".to_string(), Expression::column("x"))],
            ExecutionContext::with_seed(functions, 3),
        )?;

        let values: Vec<i64> = pipeline
            .map(|row| row.and_then(|r| r.get("x")?.try_as_i64()))
            .collect::<RillResult<_>>()?;
        assert_eq!(values, vec![1, 2]);
        Ok(())
    }
}
