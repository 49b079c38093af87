//! Expression evaluation
//!
//! Evaluates scalar expressions against one materialized row. Evaluation
//! of an output-expression list is strictly left-to-right, once per row;
//! the order is observable whenever non-deterministic functions are
//! involved, so it must be preserved.

use crate::common::error::{RillError, RillResult};
use crate::execution::context::ExecutionContext;
use crate::expression::expression::Expression;
use crate::types::{Row, Value};

/// Row-wise expression evaluator
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    /// Evaluate a single expression against a row
    pub fn evaluate(
        expr: &Expression,
        row: &Row,
        context: &mut ExecutionContext,
    ) -> RillResult<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::ColumnRef(name) => Ok(row.get(name)?.clone()),
            Expression::FunctionCall { name, args } => {
                // Arguments evaluate left-to-right before the call
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(Self::evaluate(arg, row, context)?);
                }
                context.call_function(name, &arg_values)
            }
            Expression::Comparison { op, left, right } => {
                let left_value = Self::evaluate(left, row, context)?;
                let right_value = Self::evaluate(right, row, context)?;
                let ordering = left_value.compare(&right_value)?;
                Ok(Value::Boolean(op.matches(ordering)))
            }
            Expression::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                // Only the taken branch is evaluated; the untaken branch
                // may contain effectful calls that must not fire.
                let condition_value = Self::evaluate(condition, row, context)?;
                let taken = match condition_value {
                    Value::Boolean(b) => b,
                    other => {
                        return Err(RillError::TypeMismatch(format!(
                            "Conditional condition must be boolean, got {}",
                            other.get_type()
                        )))
                    }
                };
                if taken {
                    Self::evaluate(then_expr, row, context)
                } else {
                    Self::evaluate(else_expr, row, context)
                }
            }
        }
    }

    /// Evaluate an ordered output-expression list against a row,
    /// preserving declaration order
    pub fn evaluate_all(
        outputs: &[(String, Expression)],
        row: &Row,
        context: &mut ExecutionContext,
    ) -> RillResult<Vec<Value>> {
        let mut values = Vec::with_capacity(outputs.len());
        for (_, expr) in outputs {
            values.push(Self::evaluate(expr, row, context)?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::function::{ScalarFunction, ScalarFunctionLibrary};
    use crate::types::{Column, LogicalType, Schema};
    use std::sync::Arc;

    fn x_row(x: i32) -> Row {
        let schema =
            Arc::new(Schema::new(vec![Column::new("x", LogicalType::Integer)]).unwrap());
        Row::new(schema, vec![Value::integer(x)]).unwrap()
    }

    fn seeded_context() -> ExecutionContext {
        ExecutionContext::with_seed(Arc::new(ScalarFunctionLibrary::new()), 42)
    }

    #[test]
    fn test_literal_and_column() -> RillResult<()> {
        let row = x_row(5);
        let mut context = seeded_context();
        assert_eq!(
            ExpressionEvaluator::evaluate(&Expression::literal(Value::integer(7)), &row, &mut context)?,
            Value::integer(7)
        );
        assert_eq!(
            ExpressionEvaluator::evaluate(&Expression::column("x"), &row, &mut context)?,
            Value::integer(5)
        );
        Ok(())
    }

    #[test]
    fn test_missing_column() {
        let row = x_row(5);
        let mut context = seeded_context();
        let result = ExpressionEvaluator::evaluate(&Expression::column("w"), &row, &mut context);
        assert!(matches!(result, Err(RillError::ColumnNotFound(_))));
    }

    #[test]
    fn test_repeated_calls_draw_independently() -> RillResult<()> {
        let row = x_row(1);
        let mut context = seeded_context();
        let outputs = vec![
            ("y".to_string(), Expression::call("randCanonical", vec![])),
            ("z".to_string(), Expression::call("randCanonical", vec![])),
        ];
        let values = ExpressionEvaluator::evaluate_all(&outputs, &row, &mut context)?;
        // Two textually identical calls are two draws
        assert_ne!(values[0], values[1]);
        Ok(())
    }

    #[test]
    fn test_comparison() -> RillResult<()> {
        let row = x_row(5);
        let mut context = seeded_context();
        let expr = Expression::equal(Expression::column("x"), Expression::literal(Value::integer(5)));
        assert_eq!(
            ExpressionEvaluator::evaluate(&expr, &row, &mut context)?,
            Value::boolean(true)
        );
        Ok(())
    }

    #[test]
    fn test_conditional_takes_branch() -> RillResult<()> {
        let row = x_row(5);
        let mut context = seeded_context();
        let expr = Expression::conditional(
            Expression::equal(Expression::column("x"), Expression::literal(Value::integer(5))),
            Expression::literal(Value::varchar("big")),
            Expression::literal(Value::varchar("small")),
        );
        assert_eq!(
            ExpressionEvaluator::evaluate(&expr, &row, &mut context)?,
            Value::varchar("big")
        );
        Ok(())
    }

    #[test]
    fn test_conditional_short_circuits() -> RillResult<()> {
        fn always_fails(_args: &[Value], _rng: &mut dyn rand::RngCore) -> RillResult<Value> {
            Err(RillError::Execution("branch must not be evaluated".to_string()))
        }

        let mut library = ScalarFunctionLibrary::new();
        library.register(ScalarFunction::new(
            "always_fails",
            LogicalType::Varchar,
            vec![],
            always_fails,
        ));
        let mut context = ExecutionContext::with_seed(Arc::new(library), 42);

        let row = x_row(5);
        let expr = Expression::conditional(
            Expression::literal(Value::boolean(true)),
            Expression::literal(Value::varchar("taken")),
            Expression::call("always_fails", vec![]),
        );
        assert_eq!(
            ExpressionEvaluator::evaluate(&expr, &row, &mut context)?,
            Value::varchar("taken")
        );
        Ok(())
    }

    #[test]
    fn test_conditional_requires_boolean() {
        let row = x_row(5);
        let mut context = seeded_context();
        let expr = Expression::conditional(
            Expression::literal(Value::integer(1)),
            Expression::literal(Value::varchar("big")),
            Expression::literal(Value::varchar("small")),
        );
        let result = ExpressionEvaluator::evaluate(&expr, &row, &mut context);
        assert!(matches!(result, Err(RillError::TypeMismatch(_))));
    }
}
