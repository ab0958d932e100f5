//! Database trait definition

use crate::error::DbResult;
use crate::value::{Row, SqlValue};

/// Database capability consumed by the migration engine.
///
/// Calls block until the database answers. Timeouts and cancellation, if
/// any, belong to the implementation.
pub trait Database: Send + Sync {
    /// Execute one statement with positional parameters, returns affected rows
    fn execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize>;

    /// Execute one or more statements verbatim
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and return its first row, if any
    fn query_row(&self, sql: &str, params: &[SqlValue]) -> DbResult<Option<Row>>;

    /// Run a query and return every row.
    ///
    /// Errors raised while stepping through the result set surface here
    /// rather than per row.
    fn query(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<Row>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
