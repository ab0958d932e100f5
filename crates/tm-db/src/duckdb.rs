//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use crate::value::{Row, SqlValue};
use chrono::{DateTime, Utc};
use duckdb::types::{TimeUnit, ToSql, ToSqlOutput, Value, ValueRef};
use duckdb::{params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        log::debug!("Opened in-memory DuckDB database");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        log::debug!("Opened DuckDB database at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Run `sql` and collect every row as owned DuckDB values
    fn collect_rows(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<Vec<Value>>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::QueryError(format!("{e}: {sql}")))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let col_count = row.as_ref().column_count();
                (0..col_count)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<duckdb::Result<Vec<_>>>()
            })
            .map_err(|e| DbError::QueryError(format!("{e}: {sql}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::QueryError(format!("row error: {e}")))?;
        Ok(rows)
    }
}

impl Database for DuckDbBackend {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, params_from_iter(params.iter()))
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn query_row(&self, sql: &str, params: &[SqlValue]) -> DbResult<Option<Row>> {
        let first = self.collect_rows(sql, params)?.into_iter().next();
        first.map(to_row).transpose()
    }

    fn query(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<Row>> {
        self.collect_rows(sql, params)?
            .into_iter()
            .map(to_row)
            .collect()
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Bool(b) => ToSqlOutput::Owned(Value::Boolean(*b)),
            SqlValue::Int(n) => ToSqlOutput::Owned(Value::BigInt(*n)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Timestamp(ts) => ToSqlOutput::Owned(Value::Timestamp(
                TimeUnit::Microsecond,
                ts.timestamp_micros(),
            )),
        })
    }
}

fn to_row(values: Vec<Value>) -> DbResult<Row> {
    values
        .into_iter()
        .map(from_duckdb_value)
        .collect::<DbResult<Vec<_>>>()
        .map(Row::new)
}

fn from_duckdb_value(value: Value) -> DbResult<SqlValue> {
    let out_of_range = |v: &dyn std::fmt::Display| {
        DbError::UnsupportedType(format!("integer {v} does not fit in i64"))
    };
    Ok(match value {
        Value::Null => SqlValue::Null,
        Value::Boolean(b) => SqlValue::Bool(b),
        Value::TinyInt(n) => SqlValue::Int(n.into()),
        Value::SmallInt(n) => SqlValue::Int(n.into()),
        Value::Int(n) => SqlValue::Int(n.into()),
        Value::BigInt(n) => SqlValue::Int(n),
        Value::UTinyInt(n) => SqlValue::Int(n.into()),
        Value::USmallInt(n) => SqlValue::Int(n.into()),
        Value::UInt(n) => SqlValue::Int(n.into()),
        Value::UBigInt(n) => SqlValue::Int(i64::try_from(n).map_err(|_| out_of_range(&n))?),
        Value::HugeInt(n) => SqlValue::Int(i64::try_from(n).map_err(|_| out_of_range(&n))?),
        Value::Text(s) => SqlValue::Text(s),
        Value::Timestamp(unit, raw) => SqlValue::Timestamp(timestamp_from_unit(unit, raw)?),
        other => return Err(DbError::UnsupportedType(format!("{other:?}"))),
    })
}

fn timestamp_from_unit(unit: TimeUnit, raw: i64) -> DbResult<DateTime<Utc>> {
    let (per_second, nanos_per_tick) = match unit {
        TimeUnit::Second => (1, 1_000_000_000),
        TimeUnit::Millisecond => (1_000, 1_000_000),
        TimeUnit::Microsecond => (1_000_000, 1_000),
        TimeUnit::Nanosecond => (1_000_000_000, 1),
    };
    let secs = raw.div_euclid(per_second);
    let nanos = raw.rem_euclid(per_second) * nanos_per_tick;
    // nanos < 1e9 after rem_euclid, so the cast cannot truncate
    DateTime::from_timestamp(secs, nanos as u32)
        .ok_or_else(|| DbError::UnsupportedType(format!("timestamp {raw} out of range")))
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
