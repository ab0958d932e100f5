//! Error types for the migration engine.

use thiserror::Error;
use tm_core::CoreError;
use tm_db::DbError;

/// Migration engine errors.
///
/// Nothing is retried. A failure inside the apply loop stops the run and
/// leaves migrations recorded earlier in the same run in place.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Migrations directory path is empty (M001).
    #[error("[M001] Invalid argument: migrations directory path is empty")]
    EmptyPath,

    /// Target version must be positive (M002).
    #[error("[M002] Invalid argument: target version must be positive, got {version}")]
    InvalidVersion { version: u64 },

    /// Discovery failed: unreadable directory or malformed filename (M003).
    #[error("[M003] Migration discovery failed: {0}")]
    Discovery(#[from] CoreError),

    /// Tracking table could not be created (M004).
    #[error("[M004] Failed to create tracking table '{table}'")]
    TableCreation {
        table: String,
        #[source]
        source: DbError,
    },

    /// Existence check for a migration failed (M005).
    #[error("[M005] Failed to check whether '{filename}' is applied")]
    Check {
        filename: String,
        #[source]
        source: DbError,
    },

    /// Migration body could not be read (M006).
    #[error("[M006] Failed to read migration '{filename}'")]
    Read {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// Database rejected the migration body (M007).
    #[error("[M007] Migration '{filename}' failed")]
    Execution {
        filename: String,
        #[source]
        source: DbError,
    },

    /// Migration ran but could not be recorded (M008).
    ///
    /// The body's effects are in place; the next run will execute it again.
    #[error("[M008] Migration '{filename}' was executed but could not be recorded as applied")]
    Record {
        filename: String,
        #[source]
        source: DbError,
    },

    /// Bulk read of applied migrations failed (M009).
    #[error("[M009] Failed to read applied migrations from '{table}'")]
    Query {
        table: String,
        #[source]
        source: DbError,
    },

    /// Requested target version has no migration file (M010).
    #[error("[M010] Target version {version} not found among discovered migrations")]
    VersionNotFound { version: u64 },

    /// Tracking table name is not a plain identifier (M011).
    #[error("[M011] Invalid tracking table name '{table}'")]
    InvalidTableName { table: String },
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
