//! Row-oriented data containers.
//!
//! A `Schema` is an ordered list of named, typed columns; a `Row` is one
//! tuple conforming to a schema. All rows of one stream share the same
//! schema behind an `Arc`, so a row is a schema handle plus its values.

use crate::common::error::{RillError, RillResult};
use crate::types::logical_type::LogicalType;
use crate::types::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A single named, typed column in a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub logical_type: LogicalType,
}

impl Column {
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
        }
    }
}

/// An ordered sequence of columns. Column names are unique within a
/// schema; order is significant for positional output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Create a schema, rejecting duplicate column names
    pub fn new(columns: Vec<Column>) -> RillResult<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(RillError::Schema(format!(
                    "Duplicate column name '{}'",
                    column.name
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Ordered column names
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Positional index of a column by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Type of a named column, or `ColumnNotFound`
    pub fn column_type(&self, name: &str) -> RillResult<&LogicalType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.logical_type)
            .ok_or_else(|| RillError::ColumnNotFound(name.to_string()))
    }
}

/// One tuple of values conforming to a shared schema
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row, checking that the value count matches the schema width
    pub fn new(schema: Arc<Schema>, values: Vec<Value>) -> RillResult<Self> {
        if values.len() != schema.column_count() {
            return Err(RillError::Schema(format!(
                "Row has {} values but schema has {} columns",
                values.len(),
                schema.column_count()
            )));
        }
        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Look up a value by column name
    pub fn get(&self, name: &str) -> RillResult<&Value> {
        let index = self
            .schema
            .index_of(name)
            .ok_or_else(|| RillError::ColumnNotFound(name.to_string()))?;
        Ok(&self.values[index])
    }

    /// Value at a positional index
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (column, value)) in self.schema.columns().iter().zip(&self.values).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", column.name, value)?;
        }
        write!(f, "}}")
    }
}
