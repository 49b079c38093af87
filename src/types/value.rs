use crate::common::error::{RillError, RillResult};
use crate::types::logical_type::LogicalType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Represents a single scalar value with type information.
/// Values are the fundamental unit of data in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value (type is stored separately)
    Null,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Integer(i32),
    /// 64-bit signed integer
    BigInt(i64),
    /// 64-bit double precision
    Double(f64),
    /// String value
    Varchar(String),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the logical type of this value
    pub fn get_type(&self) -> LogicalType {
        match self {
            Value::Null => LogicalType::Invalid, // Null needs external type info
            Value::Boolean(_) => LogicalType::Boolean,
            Value::Integer(_) => LogicalType::Integer,
            Value::BigInt(_) => LogicalType::BigInt,
            Value::Double(_) => LogicalType::Double,
            Value::Varchar(_) => LogicalType::Varchar,
        }
    }

    /// Try to extract a boolean value
    pub fn try_as_boolean(&self) -> RillResult<bool> {
        match self {
            Value::Boolean(value) => Ok(*value),
            Value::Null => Err(RillError::TypeMismatch(
                "Cannot extract boolean from NULL".to_string(),
            )),
            _ => Err(RillError::TypeMismatch(format!(
                "Cannot extract boolean from {}",
                self.get_type()
            ))),
        }
    }

    /// Try to extract an i64 value
    pub fn try_as_i64(&self) -> RillResult<i64> {
        match self {
            Value::BigInt(value) => Ok(*value),
            Value::Integer(value) => Ok(*value as i64),
            Value::Null => Err(RillError::TypeMismatch(
                "Cannot extract i64 from NULL".to_string(),
            )),
            _ => Err(RillError::TypeMismatch(format!(
                "Cannot extract i64 from {}",
                self.get_type()
            ))),
        }
    }

    /// Try to extract an f64 value
    pub fn try_as_f64(&self) -> RillResult<f64> {
        match self {
            Value::Double(value) => Ok(*value),
            Value::BigInt(value) => Ok(*value as f64),
            Value::Integer(value) => Ok(*value as f64),
            Value::Null => Err(RillError::TypeMismatch(
                "Cannot extract f64 from NULL".to_string(),
            )),
            _ => Err(RillError::TypeMismatch(format!(
                "Cannot extract f64 from {}",
                self.get_type()
            ))),
        }
    }

    /// Try to extract a string value
    pub fn try_as_string(&self) -> RillResult<String> {
        match self {
            Value::Varchar(value) => Ok(value.clone()),
            Value::Null => Err(RillError::TypeMismatch(
                "Cannot extract string from NULL".to_string(),
            )),
            _ => Err(RillError::TypeMismatch(format!(
                "Cannot extract string from {}",
                self.get_type()
            ))),
        }
    }

    /// Create a boolean value
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Create an integer value
    pub fn integer(value: i32) -> Self {
        Value::Integer(value)
    }

    /// Create a big integer value
    pub fn bigint(value: i64) -> Self {
        Value::BigInt(value)
    }

    /// Create a double value
    pub fn double(value: f64) -> Self {
        Value::Double(value)
    }

    /// Create a string value
    pub fn varchar(value: impl Into<String>) -> Self {
        Value::Varchar(value.into())
    }

    /// Compare two values for ordering.
    ///
    /// Floating point operands compare by exact value, never by tolerance:
    /// two doubles are equal only when they hold the same number.
    pub fn compare(&self, other: &Value) -> RillResult<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            // NULL sorts below any value
            (Value::Null, _) => Ok(Ordering::Less),
            (_, Value::Null) => Ok(Ordering::Greater),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::BigInt(a), Value::BigInt(b)) => Ok(a.cmp(b)),
            (Value::Double(a), Value::Double(b)) => a
                .partial_cmp(b)
                .ok_or_else(|| RillError::TypeMismatch("Cannot compare NaN values".to_string())),
            (Value::Varchar(a), Value::Varchar(b)) => Ok(a.cmp(b)),

            // Numeric type coercion - compare different numeric widths
            (Value::Integer(a), Value::BigInt(b)) => Ok((*a as i64).cmp(b)),
            (Value::BigInt(a), Value::Integer(b)) => Ok(a.cmp(&(*b as i64))),
            (Value::Integer(a), Value::Double(b)) => (*a as f64)
                .partial_cmp(b)
                .ok_or_else(|| RillError::TypeMismatch("Cannot compare NaN values".to_string())),
            (Value::BigInt(a), Value::Double(b)) => (*a as f64)
                .partial_cmp(b)
                .ok_or_else(|| RillError::TypeMismatch("Cannot compare NaN values".to_string())),
            (Value::Double(a), Value::Integer(b)) => a
                .partial_cmp(&(*b as f64))
                .ok_or_else(|| RillError::TypeMismatch("Cannot compare NaN values".to_string())),
            (Value::Double(a), Value::BigInt(b)) => a
                .partial_cmp(&(*b as f64))
                .ok_or_else(|| RillError::TypeMismatch("Cannot compare NaN values".to_string())),

            _ => Err(RillError::TypeMismatch(format!(
                "Cannot compare {} and {}",
                self.get_type(),
                other.get_type()
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::BigInt(value) => write!(f, "{}", value),
            Value::Double(value) => write!(f, "{}", value),
            Value::Varchar(value) => write!(f, "'{}'", value),
        }
    }
}
