//! Execution operators
//!
//! Implements the pipeline stages. Each stage owns its input source
//! exclusively, resolves its output schema at construction, and computes
//! its output expressions once per pulled row, strictly left-to-right.

use crate::common::error::RillResult;
use crate::execution::context::ExecutionContext;
use crate::execution::source::RowSource;
use crate::expression::{Expression, ExpressionEvaluator, ScalarFunctionLibrary};
use crate::types::{Column, Row, Schema};
use std::sync::Arc;

/// Resolve the output schema of an ordered `(name, expression)` list
/// against an input schema. Unresolvable column references, unregistered
/// functions and duplicate output names fail here, before any row flows.
fn resolve_output_schema(
    input: &Schema,
    outputs: &[(String, Expression)],
    functions: &ScalarFunctionLibrary,
) -> RillResult<Schema> {
    let mut columns = Vec::with_capacity(outputs.len());
    for (name, expr) in outputs {
        let logical_type = expr.return_type(input, functions)?;
        columns.push(Column::new(name.clone(), logical_type));
    }
    Schema::new(columns)
}

/// Wraps a row source, evaluates a fixed output-expression list once per
/// input row, and exposes the result as a new row source with renamed
/// columns. Column references inside the expressions resolve against the
/// input schema only.
pub struct DerivedTableStage {
    input: Box<dyn RowSource>,
    outputs: Vec<(String, Expression)>,
    schema: Arc<Schema>,
    context: ExecutionContext,
}

impl DerivedTableStage {
    pub fn new(
        input: Box<dyn RowSource>,
        outputs: Vec<(String, Expression)>,
        context: ExecutionContext,
    ) -> RillResult<Self> {
        let schema = resolve_output_schema(input.schema(), &outputs, context.functions())?;
        log::debug!(
            "derived table stage: {:?} -> {:?}",
            input.schema().names(),
            schema.names()
        );
        Ok(Self {
            input,
            outputs,
            schema: Arc::new(schema),
            context,
        })
    }
}

impl RowSource for DerivedTableStage {
    fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    fn next_row(&mut self) -> RillResult<Option<Row>> {
        let input_row = match self.input.next_row()? {
            Some(row) => row,
            None => return Ok(None),
        };
        let values = ExpressionEvaluator::evaluate_all(&self.outputs, &input_row, &mut self.context)?;
        Ok(Some(Row::new(self.schema.clone(), values)?))
    }
}

/// Terminal projection stage: selects, reorders and computes columns from
/// its input into the externally visible output shape. Same per-row
/// evaluation contract as `DerivedTableStage`.
pub struct ProjectionStage {
    input: Box<dyn RowSource>,
    outputs: Vec<(String, Expression)>,
    schema: Arc<Schema>,
    context: ExecutionContext,
}

impl ProjectionStage {
    pub fn new(
        input: Box<dyn RowSource>,
        outputs: Vec<(String, Expression)>,
        context: ExecutionContext,
    ) -> RillResult<Self> {
        let schema = resolve_output_schema(input.schema(), &outputs, context.functions())?;
        log::debug!(
            "projection stage: {:?} -> {:?}",
            input.schema().names(),
            schema.names()
        );
        Ok(Self {
            input,
            outputs,
            schema: Arc::new(schema),
            context,
        })
    }
}

impl RowSource for ProjectionStage {
    fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    fn next_row(&mut self) -> RillResult<Option<Row>> {
        let input_row = match self.input.next_row()? {
            Some(row) => row,
            None => return Ok(None),
        };
        let values = ExpressionEvaluator::evaluate_all(&self.outputs, &input_row, &mut self.context)?;
        Ok(Some(Row::new(self.schema.clone(), values)?))
    }
}
