//! Error types for tm-core

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a migration filename is rejected by the parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    /// F001: Filename does not carry the migration extension
    #[error("[F001] Invalid migration extension: '{filename}' (expected .sql)")]
    InvalidExtension { filename: String },

    /// F002: No separator between the version and the description
    #[error("[F002] Malformed migration name: '{filename}' (expected <version>_<description>.sql)")]
    MalformedName { filename: String },

    /// F003: Version token is not a non-negative base-10 integer
    #[error("[F003] Non-numeric version '{token}' in migration '{filename}'")]
    NonNumericVersion { filename: String, token: String },
}

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Migrations directory path is empty
    #[error("[E004] Migrations directory path is empty")]
    EmptyPath,

    /// E005: Migrations directory could not be listed
    #[error("[E005] Failed to read migrations directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// E006: A migration filename failed to parse
    #[error(transparent)]
    InvalidFilename(#[from] FilenameError),

    /// E007: Two migration files share a version number
    #[error("[E007] Duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: u64,
        first: String,
        second: String,
    },

    /// E008: IO error
    #[error("[E008] IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
