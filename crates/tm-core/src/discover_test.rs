use super::*;
use crate::error::FilenameError;
use crate::fs::LocalFileSystem;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str) {
    std::fs::write(dir.path().join(name), "SELECT 1;").unwrap();
}

fn versions(migrations: &[DiscoveredMigration]) -> Vec<u64> {
    migrations.iter().map(|m| m.version).collect()
}

#[test]
fn test_discover_orders_numerically_not_lexically() {
    let dir = TempDir::new().unwrap();
    write(&dir, "10_y.sql");
    write(&dir, "9_x.sql");
    write(&dir, "002_second.sql");

    let migrations = discover_migrations(&LocalFileSystem, dir.path()).unwrap();
    assert_eq!(versions(&migrations), vec![2, 9, 10]);
    assert_eq!(migrations[1].filename, "9_x.sql");
    assert_eq!(migrations[2].description, "y");
}

#[test]
fn test_discover_ignores_other_files_and_subdirectories() {
    let dir = TempDir::new().unwrap();
    write(&dir, "001_initial.sql");
    write(&dir, "README.md");
    write(&dir, "notes.txt");
    std::fs::create_dir(dir.path().join("002_archive.sql")).unwrap();

    let migrations = discover_migrations(&LocalFileSystem, dir.path()).unwrap();
    assert_eq!(migrations.len(), 1);
    assert_eq!(migrations[0].filename, "001_initial.sql");
}

#[test]
fn test_discover_empty_directory_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let migrations = discover_migrations(&LocalFileSystem, dir.path()).unwrap();
    assert!(migrations.is_empty());
}

#[test]
fn test_discover_empty_path() {
    let err = discover_migrations(&LocalFileSystem, Path::new("")).unwrap_err();
    assert!(matches!(err, CoreError::EmptyPath));
}

#[test]
fn test_discover_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does_not_exist");
    let err = discover_migrations(&LocalFileSystem, &missing).unwrap_err();
    match err {
        CoreError::DirectoryRead { path, .. } => assert_eq!(path, missing),
        other => panic!("expected DirectoryRead, got {other:?}"),
    }
}

#[test]
fn test_discover_fails_fast_on_missing_separator() {
    let dir = TempDir::new().unwrap();
    write(&dir, "001initial.sql");
    write(&dir, "002_fine.sql");

    let err = discover_migrations(&LocalFileSystem, dir.path()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidFilename(FilenameError::MalformedName { .. })
    ));
}

#[test]
fn test_discover_fails_fast_on_non_numeric_version() {
    let dir = TempDir::new().unwrap();
    write(&dir, "abc_initial.sql");

    let err = discover_migrations(&LocalFileSystem, dir.path()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidFilename(FilenameError::NonNumericVersion { .. })
    ));
}

#[test]
fn test_discover_rejects_duplicate_versions() {
    let dir = TempDir::new().unwrap();
    write(&dir, "1_a.sql");
    write(&dir, "001_b.sql");
    write(&dir, "2_c.sql");

    let err = discover_migrations(&LocalFileSystem, dir.path()).unwrap_err();
    match err {
        CoreError::DuplicateVersion {
            version,
            first,
            second,
        } => {
            assert_eq!(version, 1);
            assert_eq!(first, "001_b.sql");
            assert_eq!(second, "1_a.sql");
        }
        other => panic!("expected DuplicateVersion, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_discover_skips_non_utf8_filenames() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    write(&dir, "002_fine.sql");
    let raw = OsStr::from_bytes(b"001_caf\xe9.sql");
    std::fs::write(dir.path().join(raw), "SELECT 1;").unwrap();

    let migrations = discover_migrations(&LocalFileSystem, dir.path()).unwrap();
    assert_eq!(versions(&migrations), vec![2]);
    assert_eq!(migrations[0].filename, "002_fine.sql");
}
