//! Error types for tm-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Query or row stepping error (D003)
    #[error("[D003] SQL query failed: {0}")]
    QueryError(String),

    /// Column index past the end of the row (D004)
    #[error("[D004] Column index {index} out of range for row with {len} column(s)")]
    ColumnOutOfRange { index: usize, len: usize },

    /// Column holds a different type than requested (D005)
    #[error("[D005] Column {index} is {found}, expected {expected}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Column type the value model cannot represent (D006)
    #[error("[D006] Unsupported column type in result: {0}")]
    UnsupportedType(String),

    /// Mutex poisoned (D007)
    #[error("[D007] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
