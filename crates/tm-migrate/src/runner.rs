//! Migration runner.
//!
//! Applies unapplied migrations in ascending version order. Each migration
//! is checked, executed, and recorded on its own, so a run that fails part
//! way can simply be invoked again: completed migrations are skipped.
//!
//! Execution and recording are two separate steps. If recording fails the
//! body has already run and will run again on the next invocation.

use crate::error::{MigrateError, MigrateResult};
use crate::tracking::TrackingStore;
use std::path::Path;
use tm_core::{discover_migrations, DiscoveredMigration, FileSystem};

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Filenames executed and recorded by this run, in order
    pub applied: Vec<String>,
    /// Migrations skipped because they were already recorded
    pub skipped: usize,
    /// Target version the run was bounded by, if one was given
    pub stopped_at: Option<u64>,
}

/// Apply pending migrations from `dir`, optionally stopping after `to_version`.
///
/// `to_version` must name a discovered migration; this is checked before
/// anything executes.
pub fn run(
    store: &TrackingStore<'_>,
    fs: &dyn FileSystem,
    dir: &Path,
    to_version: Option<u64>,
) -> MigrateResult<RunSummary> {
    if dir.as_os_str().is_empty() {
        return Err(MigrateError::EmptyPath);
    }
    if to_version == Some(0) {
        return Err(MigrateError::InvalidVersion { version: 0 });
    }

    store.ensure_table()?;
    let migrations = discover_migrations(fs, dir)?;

    if let Some(target) = to_version {
        if !migrations.iter().any(|m| m.version == target) {
            return Err(MigrateError::VersionNotFound { version: target });
        }
    }

    let mut summary = RunSummary {
        stopped_at: to_version,
        ..RunSummary::default()
    };
    for migration in &migrations {
        if let Some(target) = to_version {
            if migration.version > target {
                log::debug!("Stopping at target version {target}");
                break;
            }
        }

        if store.is_applied(&migration.filename)? {
            log::debug!("Skipping already applied migration {}", migration.filename);
            summary.skipped += 1;
            continue;
        }

        apply_one(store, fs, dir, migration)?;
        summary.applied.push(migration.filename.clone());
    }

    log::info!(
        "Applied {} migration(s), {} already applied ({})",
        summary.applied.len(),
        summary.skipped,
        store.db().db_type()
    );
    Ok(summary)
}

/// Execute one migration body and record it.
fn apply_one(
    store: &TrackingStore<'_>,
    fs: &dyn FileSystem,
    dir: &Path,
    migration: &DiscoveredMigration,
) -> MigrateResult<()> {
    let body = read_body(fs, dir, &migration.filename)?;
    log::info!(
        "Applying migration v{} {}",
        migration.version,
        migration.filename
    );

    store
        .db()
        .execute_batch(&body)
        .map_err(|source| MigrateError::Execution {
            filename: migration.filename.clone(),
            source,
        })?;

    store.record_applied(&migration.filename)
}

fn read_body(fs: &dyn FileSystem, dir: &Path, filename: &str) -> MigrateResult<String> {
    let read_err = |source| MigrateError::Read {
        filename: filename.to_string(),
        source,
    };
    let bytes = fs.read_file(&dir.join(filename)).map_err(read_err)?;
    String::from_utf8(bytes)
        .map_err(|e| read_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
