//! Filesystem capability used by discovery and the runner
//!
//! The engine only needs to list a directory and read whole files, so callers
//! can supply something other than the local disk.

use std::io;
use std::path::Path;

/// A single directory entry as seen by discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (no directory component)
    pub name: String,

    /// True for regular files
    pub is_file: bool,
}

/// Minimal read-only filesystem access
pub trait FileSystem: Send + Sync {
    /// List the entries of `dir`.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read the full contents of `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            // file_type() does not follow symlinks; metadata() does.
            // A dangling link is listed as a non-file rather than failing the listing.
            let is_file = std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file());
            // The name is the migration's identity, so it must round-trip exactly
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    log::warn!("Skipping non-UTF-8 entry {raw:?} in {}", dir.display());
                    continue;
                }
            };
            entries.push(DirEntry { name, is_file });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
