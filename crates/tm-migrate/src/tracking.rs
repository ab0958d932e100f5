//! Tracking table access.
//!
//! The tracking table holds one row per migration ever applied, keyed by
//! filename. Rows are only ever inserted, right after the migration body
//! executed successfully.

use crate::error::{MigrateError, MigrateResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tm_core::config::is_plain_identifier;
use tm_db::{Database, SqlValue};

/// Tracking table used when none is configured.
pub const DEFAULT_TRACKING_TABLE: &str = "schema_migrations";

/// A migration recorded as applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRecord {
    /// Filename of the applied migration
    pub filename: String,
    /// Set by the database when the row was inserted
    pub applied_at: DateTime<Utc>,
}

/// Reads and writes the tracking table through a [`Database`].
pub struct TrackingStore<'a> {
    db: &'a dyn Database,
    table: String,
}

impl<'a> TrackingStore<'a> {
    /// Store using [`DEFAULT_TRACKING_TABLE`].
    pub fn new(db: &'a dyn Database) -> Self {
        Self {
            db,
            table: DEFAULT_TRACKING_TABLE.to_string(),
        }
    }

    /// Store using a custom table name, which must be a plain identifier.
    ///
    /// The name is quoted in every statement, so reserved words such as
    /// `order` are usable.
    pub fn with_table(db: &'a dyn Database, table: impl Into<String>) -> MigrateResult<Self> {
        let table = table.into();
        if !is_plain_identifier(&table) {
            return Err(MigrateError::InvalidTableName { table });
        }
        Ok(Self { db, table })
    }

    /// Name of the tracking table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Underlying database capability.
    pub fn db(&self) -> &'a dyn Database {
        self.db
    }

    /// Create the tracking table if it does not exist.
    pub fn ensure_table(&self) -> MigrateResult<()> {
        let table = &self.table;
        let ddl = format!(
            "CREATE SEQUENCE IF NOT EXISTS \"{table}_id_seq\";
             CREATE TABLE IF NOT EXISTS \"{table}\" (
                 id         BIGINT PRIMARY KEY DEFAULT nextval('{table}_id_seq'),
                 filename   VARCHAR NOT NULL UNIQUE,
                 applied_at TIMESTAMPTZ NOT NULL DEFAULT current_timestamp
             );"
        );
        self.db
            .execute_batch(&ddl)
            .map_err(|source| MigrateError::TableCreation {
                table: table.clone(),
                source,
            })
    }

    /// Whether `filename` has a tracking row.
    pub fn is_applied(&self, filename: &str) -> MigrateResult<bool> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\" WHERE filename = ?", self.table);
        let check_err = |source| MigrateError::Check {
            filename: filename.to_string(),
            source,
        };
        let row = self
            .db
            .query_row(&sql, &[SqlValue::from(filename)])
            .map_err(check_err)?;
        match row {
            Some(row) => Ok(row.get_i64(0).map_err(check_err)? > 0),
            None => Ok(false),
        }
    }

    /// Insert a tracking row for `filename`.
    ///
    /// Fails on the unique constraint if the filename is already recorded.
    pub fn record_applied(&self, filename: &str) -> MigrateResult<()> {
        let sql = format!("INSERT INTO \"{}\" (filename) VALUES (?)", self.table);
        self.db
            .execute(&sql, &[SqlValue::from(filename)])
            .map(|_| ())
            .map_err(|source| MigrateError::Record {
                filename: filename.to_string(),
                source,
            })
    }

    /// Every tracking row, in insertion order.
    pub fn applied_records(&self) -> MigrateResult<Vec<AppliedRecord>> {
        let sql = format!(
            "SELECT filename, applied_at FROM \"{}\" ORDER BY id",
            self.table
        );
        let query_err = |source| MigrateError::Query {
            table: self.table.clone(),
            source,
        };
        self.db
            .query(&sql, &[])
            .map_err(query_err)?
            .into_iter()
            .map(|row| -> MigrateResult<AppliedRecord> {
                Ok(AppliedRecord {
                    filename: row.get_str(0).map_err(query_err)?.to_string(),
                    applied_at: row.get_timestamp(1).map_err(query_err)?,
                })
            })
            .collect()
    }

    /// Applied filenames mapped to their applied-at timestamps, in one read.
    pub fn list_applied(&self) -> MigrateResult<HashMap<String, DateTime<Utc>>> {
        Ok(self
            .applied_records()?
            .into_iter()
            .map(|r| (r.filename, r.applied_at))
            .collect())
    }
}

#[cfg(test)]
#[path = "tracking_test.rs"]
mod tests;
