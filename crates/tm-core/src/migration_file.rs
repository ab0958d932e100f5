//! Migration filename parsing
//!
//! Migration files are named `{version}_{description}.sql`, for example
//! `001_initial.sql` or `42_add_user_email_column.sql`. The version is a
//! base-10 integer with no required zero-padding.

use crate::error::FilenameError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extension every migration file must carry.
pub const MIGRATION_EXTENSION: &str = "sql";

/// Character separating the version token from the description.
pub const VERSION_SEPARATOR: char = '_';

/// A migration file found on disk. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredMigration {
    /// Ordinal position of the migration
    pub version: u64,

    /// Slug between the version prefix and the extension
    pub description: String,

    /// Exact on-disk filename, used to correlate with tracking records
    pub filename: String,
}

impl DiscoveredMigration {
    /// Build a migration from its on-disk filename.
    pub fn from_filename(filename: impl Into<String>) -> Result<Self, FilenameError> {
        let filename = filename.into();
        let (version, description) = parse_filename(&filename)?;
        Ok(Self {
            version,
            description,
            filename,
        })
    }
}

/// Returns true if `filename` carries the migration extension.
pub fn has_migration_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|e| e == MIGRATION_EXTENSION)
}

/// Parse a migration filename into `(version, description)`.
///
/// The description keeps any further separators, so
/// `42_add_user_email_column.sql` yields `(42, "add_user_email_column")`.
pub fn parse_filename(filename: &str) -> Result<(u64, String), FilenameError> {
    let stem = filename
        .strip_suffix(MIGRATION_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .ok_or_else(|| FilenameError::InvalidExtension {
            filename: filename.to_string(),
        })?;

    let (token, description) =
        stem.split_once(VERSION_SEPARATOR)
            .ok_or_else(|| FilenameError::MalformedName {
                filename: filename.to_string(),
            })?;

    // u64::from_str accepts a leading '+', so check the digits first
    let version = if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse::<u64>().ok()
    } else {
        None
    };

    match version {
        Some(version) => Ok((version, description.to_string())),
        None => Err(FilenameError::NonNumericVersion {
            filename: filename.to_string(),
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "migration_file_test.rs"]
mod tests;
