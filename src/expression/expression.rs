//! Core expression types for rill

use crate::common::error::{RillError, RillResult};
use crate::expression::function::ScalarFunctionLibrary;
use crate::types::{LogicalType, Schema, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonType {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonType {
    /// Apply the operator to an ordering obtained from `Value::compare`
    pub fn matches(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            ComparisonType::Equal => ordering == Equal,
            ComparisonType::NotEqual => ordering != Equal,
            ComparisonType::LessThan => ordering == Less,
            ComparisonType::LessThanOrEqual => ordering != Greater,
            ComparisonType::GreaterThan => ordering == Greater,
            ComparisonType::GreaterThanOrEqual => ordering != Less,
        }
    }
}

impl fmt::Display for ComparisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonType::Equal => write!(f, "="),
            ComparisonType::NotEqual => write!(f, "!="),
            ComparisonType::LessThan => write!(f, "<"),
            ComparisonType::LessThanOrEqual => write!(f, "<="),
            ComparisonType::GreaterThan => write!(f, ">"),
            ComparisonType::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// Scalar expression tree evaluated against one row at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expression {
    /// A constant value
    Literal(Value),
    /// Reference to a column of the input row by name
    ColumnRef(String),
    /// Call of a registered scalar function; arguments evaluate
    /// left-to-right before the call
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
    /// Binary comparison of two operands using exact value comparison
    Comparison {
        op: ComparisonType,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// Searched conditional: only the taken branch is evaluated
    Conditional {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
    },
}

impl Expression {
    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    pub fn column(name: impl Into<String>) -> Self {
        Expression::ColumnRef(name.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn comparison(op: ComparisonType, left: Expression, right: Expression) -> Self {
        Expression::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn equal(left: Expression, right: Expression) -> Self {
        Expression::comparison(ComparisonType::Equal, left, right)
    }

    pub fn conditional(condition: Expression, then_expr: Expression, else_expr: Expression) -> Self {
        Expression::Conditional {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }

    /// Resolve the return type of this expression against an input schema.
    ///
    /// Fails with `ColumnNotFound` / `UnknownFunction` for names that do
    /// not bind, so stages can reject mis-bound expressions before any
    /// row is produced.
    pub fn return_type(
        &self,
        input: &Schema,
        functions: &ScalarFunctionLibrary,
    ) -> RillResult<LogicalType> {
        match self {
            Expression::Literal(value) => Ok(value.get_type()),
            Expression::ColumnRef(name) => Ok(input.column_type(name)?.clone()),
            Expression::FunctionCall { name, args } => {
                for arg in args {
                    arg.return_type(input, functions)?;
                }
                Ok(functions.get(name)?.return_type.clone())
            }
            Expression::Comparison { left, right, .. } => {
                left.return_type(input, functions)?;
                right.return_type(input, functions)?;
                Ok(LogicalType::Boolean)
            }
            Expression::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                condition.return_type(input, functions)?;
                let then_type = then_expr.return_type(input, functions)?;
                let else_type = else_expr.return_type(input, functions)?;
                if then_type != else_type
                    && then_type != LogicalType::Invalid
                    && else_type != LogicalType::Invalid
                {
                    return Err(RillError::TypeMismatch(format!(
                        "Conditional branches have incompatible types {} and {}",
                        then_type, else_type
                    )));
                }
                Ok(then_type)
            }
        }
    }

    /// Whether this expression always yields the same value for the same
    /// row. A single non-deterministic function call anywhere in the
    /// tree makes the whole expression non-deterministic.
    pub fn is_deterministic(&self, functions: &ScalarFunctionLibrary) -> bool {
        match self {
            Expression::Literal(_) | Expression::ColumnRef(_) => true,
            Expression::FunctionCall { name, args } => {
                functions
                    .lookup(name)
                    .map_or(true, |f| f.is_deterministic)
                    && args.iter().all(|a| a.is_deterministic(functions))
            }
            Expression::Comparison { left, right, .. } => {
                left.is_deterministic(functions) && right.is_deterministic(functions)
            }
            Expression::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                condition.is_deterministic(functions)
                    && then_expr.is_deterministic(functions)
                    && else_expr.is_deterministic(functions)
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::ColumnRef(name) => write!(f, "{}", name),
            Expression::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expression::Comparison { op, left, right } => {
                write!(f, "{} {} {}", left, op, right)
            }
            Expression::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                write!(
                    f,
                    "CASE WHEN {} THEN {} ELSE {} END",
                    condition, then_expr, else_expr
                )
            }
        }
    }
}
