//! Row sources
//!
//! A `RowSource` is a lazy, finite, single-pass producer of rows sharing
//! one schema. Pipeline stages consume a source and are sources
//! themselves, so stages compose into a strict linear chain.

use crate::common::error::{RillError, RillResult};
use crate::types::{Column, LogicalType, Row, Schema, Value};
use std::collections::VecDeque;
use std::sync::Arc;

/// Abstract producer of rows conforming to a schema.
///
/// `next_row` advances an internal cursor; sources are not restartable.
pub trait RowSource {
    /// Schema shared by every row this source produces
    fn schema(&self) -> &Arc<Schema>;

    /// Pull the next row, or `None` at end of stream
    fn next_row(&mut self) -> RillResult<Option<Row>>;
}

/// In-memory row source backed by a queue of pre-built rows
pub struct MemoryRowSource {
    schema: Arc<Schema>,
    rows: VecDeque<Row>,
}

impl MemoryRowSource {
    /// Create a source from rows that must all carry the given schema
    pub fn new(schema: Arc<Schema>, rows: Vec<Row>) -> RillResult<Self> {
        for row in &rows {
            if row.schema().as_ref() != schema.as_ref() {
                return Err(RillError::Schema(
                    "Row schema does not match source schema".to_string(),
                ));
            }
        }
        Ok(Self {
            schema,
            rows: rows.into(),
        })
    }

    /// Convenience: a single-column source from a list of values
    pub fn from_values(
        name: impl Into<String>,
        logical_type: LogicalType,
        values: Vec<Value>,
    ) -> RillResult<Self> {
        let schema = Arc::new(Schema::new(vec![Column::new(name, logical_type)])?);
        let rows = values
            .into_iter()
            .map(|value| Row::new(schema.clone(), vec![value]))
            .collect::<RillResult<Vec<_>>>()?;
        Self::new(schema, rows)
    }
}

impl RowSource for MemoryRowSource {
    fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    fn next_row(&mut self) -> RillResult<Option<Row>> {
        Ok(self.rows.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pass_in_order() -> RillResult<()> {
        let mut source = MemoryRowSource::from_values(
            "x",
            LogicalType::Integer,
            vec![Value::integer(1), Value::integer(2), Value::integer(3)],
        )?;
        assert_eq!(source.schema().names(), vec!["x"]);

        let mut seen = Vec::new();
        while let Some(row) = source.next_row()? {
            seen.push(row.get("x")?.try_as_i64()?);
        }
        assert_eq!(seen, vec![1, 2, 3]);
        // Exhausted sources stay exhausted
        assert!(source.next_row()?.is_none());
        Ok(())
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let schema_a =
            Arc::new(Schema::new(vec![Column::new("a", LogicalType::Integer)]).unwrap());
        let schema_b =
            Arc::new(Schema::new(vec![Column::new("b", LogicalType::Integer)]).unwrap());
        let row = Row::new(schema_b, vec![Value::integer(1)]).unwrap();
        assert!(matches!(
            MemoryRowSource::new(schema_a, vec![row]),
            Err(RillError::Schema(_))
        ));
    }
}
