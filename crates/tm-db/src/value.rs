//! Typed values passed to and read back from a [`Database`](crate::Database)

use crate::error::{DbError, DbResult};
use chrono::{DateTime, Utc};

/// A single SQL parameter or column value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// Any integer column that fits in i64
    Int(i64),
    /// Text
    Text(String),
    /// Timestamp, normalized to UTC
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Bool(_) => "BOOLEAN",
            SqlValue::Int(_) => "INTEGER",
            SqlValue::Text(_) => "TEXT",
            SqlValue::Timestamp(_) => "TIMESTAMP",
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Int(n)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

/// One result row with typed column accessors
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    /// Build a row from its column values
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the row has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at `index`
    pub fn get(&self, index: usize) -> DbResult<&SqlValue> {
        self.values.get(index).ok_or(DbError::ColumnOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    pub fn get_i64(&self, index: usize) -> DbResult<i64> {
        match self.get(index)? {
            SqlValue::Int(n) => Ok(*n),
            other => Err(mismatch(index, "INTEGER", other)),
        }
    }

    pub fn get_bool(&self, index: usize) -> DbResult<bool> {
        match self.get(index)? {
            SqlValue::Bool(b) => Ok(*b),
            other => Err(mismatch(index, "BOOLEAN", other)),
        }
    }

    pub fn get_str(&self, index: usize) -> DbResult<&str> {
        match self.get(index)? {
            SqlValue::Text(s) => Ok(s),
            other => Err(mismatch(index, "TEXT", other)),
        }
    }

    pub fn get_timestamp(&self, index: usize) -> DbResult<DateTime<Utc>> {
        match self.get(index)? {
            SqlValue::Timestamp(ts) => Ok(*ts),
            other => Err(mismatch(index, "TIMESTAMP", other)),
        }
    }
}

fn mismatch(index: usize, expected: &'static str, found: &SqlValue) -> DbError {
    DbError::TypeMismatch {
        index,
        expected,
        found: found.type_name(),
    }
}
