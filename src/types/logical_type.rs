//! SQL-level type abstractions used by schemas and function signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical (SQL-level) type of a value or column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    /// Placeholder for values whose type cannot be derived (e.g. bare NULL)
    Invalid,
    Boolean,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    BigInt,
    /// 64-bit double precision float
    Double,
    /// Variable-length string
    Varchar,
}

impl LogicalType {
    /// Whether this type participates in numeric comparison coercion
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LogicalType::Integer | LogicalType::BigInt | LogicalType::Double
        )
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Invalid => write!(f, "INVALID"),
            LogicalType::Boolean => write!(f, "BOOLEAN"),
            LogicalType::Integer => write!(f, "INTEGER"),
            LogicalType::BigInt => write!(f, "BIGINT"),
            LogicalType::Double => write!(f, "DOUBLE"),
            LogicalType::Varchar => write!(f, "VARCHAR"),
        }
    }
}
