//! Migration discovery
//!
//! Lists a directory, keeps the `.sql` files, parses each name, and returns
//! the migrations ordered by numeric version.

use crate::error::{CoreError, CoreResult};
use crate::fs::FileSystem;
use crate::migration_file::{has_migration_extension, DiscoveredMigration};
use std::path::Path;

/// Discover every migration in `dir`, sorted ascending by version.
///
/// A directory that exists but holds no migration files yields an empty
/// vector. A directory that cannot be listed is an error. The first
/// malformed filename aborts discovery.
pub fn discover_migrations(fs: &dyn FileSystem, dir: &Path) -> CoreResult<Vec<DiscoveredMigration>> {
    if dir.as_os_str().is_empty() {
        return Err(CoreError::EmptyPath);
    }

    let entries = fs.list_dir(dir).map_err(|source| CoreError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut migrations = Vec::new();
    for entry in entries {
        if !entry.is_file || !has_migration_extension(&entry.name) {
            log::trace!("Ignoring non-migration entry {}", entry.name);
            continue;
        }
        migrations.push(DiscoveredMigration::from_filename(entry.name)?);
    }

    // Numeric order, not lexical: 9_x.sql runs before 10_y.sql
    migrations.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    reject_duplicate_versions(&migrations)?;

    log::debug!(
        "Discovered {} migration(s) in {}",
        migrations.len(),
        dir.display()
    );
    Ok(migrations)
}

/// Fail on the first pair of migrations sharing a version. Expects sorted input.
fn reject_duplicate_versions(migrations: &[DiscoveredMigration]) -> CoreResult<()> {
    for pair in migrations.windows(2) {
        if pair[0].version == pair[1].version {
            return Err(CoreError::DuplicateVersion {
                version: pair[0].version,
                first: pair[0].filename.clone(),
                second: pair[1].filename.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "discover_test.rs"]
mod tests;
