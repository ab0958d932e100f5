//! Migration engine for Tidemark.
//!
//! Discovers versioned `.sql` files, applies the ones missing from the
//! tracking table in version order, and reports combined status. The engine
//! holds no state between calls and takes no locks; callers that need
//! several concurrent writers must serialize `run` themselves.

pub mod error;
pub mod runner;
pub mod status;
pub mod tracking;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use error::{MigrateError, MigrateResult};
pub use runner::RunSummary;
pub use status::{MigrationStatus, StatusReport};
pub use tracking::{AppliedRecord, TrackingStore, DEFAULT_TRACKING_TABLE};

use std::path::Path;
use tm_core::{Config, FileSystem};
use tm_db::Database;

/// Bundles a database, a filesystem, and a tracking table for `run` / `list`.
pub struct Migrator<'a> {
    store: TrackingStore<'a>,
    fs: &'a dyn FileSystem,
}

impl<'a> Migrator<'a> {
    /// Migrator using the default tracking table.
    pub fn new(db: &'a dyn Database, fs: &'a dyn FileSystem) -> Self {
        Self {
            store: TrackingStore::new(db),
            fs,
        }
    }

    /// Migrator using the tracking table named in `config`.
    pub fn from_config(
        db: &'a dyn Database,
        fs: &'a dyn FileSystem,
        config: &Config,
    ) -> MigrateResult<Self> {
        Self::new(db, fs).with_tracking_table(&config.tracking_table)
    }

    /// Use a different tracking table.
    pub fn with_tracking_table(self, table: &str) -> MigrateResult<Self> {
        Ok(Self {
            store: TrackingStore::with_table(self.store.db(), table)?,
            fs: self.fs,
        })
    }

    /// Tracking store in use.
    pub fn store(&self) -> &TrackingStore<'a> {
        &self.store
    }

    /// Apply pending migrations in `dir`; see [`runner::run`].
    pub fn run(&self, dir: &Path, to_version: Option<u64>) -> MigrateResult<RunSummary> {
        runner::run(&self.store, self.fs, dir, to_version)
    }

    /// Report status for `dir`; see [`status::list`].
    pub fn list(&self, dir: &Path) -> MigrateResult<StatusReport> {
        status::list(&self.store, self.fs, dir)
    }
}
