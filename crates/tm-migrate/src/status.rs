//! Migration status reporting.
//!
//! Joins the migrations on disk with the tracking table by filename. The
//! tracking table is read once per report.

use crate::error::{MigrateError, MigrateResult};
use crate::tracking::TrackingStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tm_core::{discover_migrations, FileSystem};

/// Status of one discovered migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub version: u64,
    pub description: String,
    pub filename: String,
    pub applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
}

/// Status of every discovered migration, ascending by version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusReport {
    pub migrations: Vec<MigrationStatus>,
}

impl StatusReport {
    /// Migrations not yet applied, in the order `run` would apply them.
    pub fn pending(&self) -> impl Iterator<Item = &MigrationStatus> {
        self.migrations.iter().filter(|m| !m.applied)
    }

    pub fn applied_count(&self) -> usize {
        self.migrations.iter().filter(|m| m.applied).count()
    }

    pub fn pending_count(&self) -> usize {
        self.migrations.len() - self.applied_count()
    }

    /// True when nothing is pending.
    pub fn is_up_to_date(&self) -> bool {
        self.pending_count() == 0
    }

    /// Highest applied version, if any migration is applied.
    pub fn latest_applied_version(&self) -> Option<u64> {
        self.migrations
            .iter()
            .filter(|m| m.applied)
            .map(|m| m.version)
            .max()
    }
}

/// Report applied/pending status for every migration in `dir`.
///
/// Creates the tracking table if needed so status works before the first
/// run, and otherwise never writes.
pub fn list(
    store: &TrackingStore<'_>,
    fs: &dyn FileSystem,
    dir: &Path,
) -> MigrateResult<StatusReport> {
    if dir.as_os_str().is_empty() {
        return Err(MigrateError::EmptyPath);
    }

    store.ensure_table()?;
    let migrations = discover_migrations(fs, dir)?;
    let applied = store.list_applied()?;

    let migrations = migrations
        .into_iter()
        .map(|m| {
            let applied_at = applied.get(&m.filename).copied();
            MigrationStatus {
                version: m.version,
                description: m.description,
                filename: m.filename,
                applied: applied_at.is_some(),
                applied_at,
            }
        })
        .collect();

    Ok(StatusReport { migrations })
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
