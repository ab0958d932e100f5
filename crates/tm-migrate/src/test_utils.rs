//! Shared test utilities for tm-migrate

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tm_core::{DirEntry, FileSystem};
use tm_db::{Database, DbError, DbResult, DuckDbBackend, Row, SqlValue};

/// Which capability method a recorded call went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Execute,
    ExecuteBatch,
    QueryRow,
    Query,
}

/// A single call seen by [`RecordingDatabase`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub kind: CallKind,
    pub sql: String,
}

/// In-memory DuckDB wrapper that logs every call and can inject failures.
///
/// A failure rule matches when the call kind is equal and the SQL contains
/// the given fragment; a matching call returns an error instead of reaching
/// DuckDB.
pub struct RecordingDatabase {
    inner: DuckDbBackend,
    calls: Mutex<Vec<Call>>,
    fail_on: Mutex<Vec<(CallKind, String)>>,
}

impl RecordingDatabase {
    pub fn new() -> Self {
        Self {
            inner: DuckDbBackend::in_memory().expect("in-memory duckdb"),
            calls: Mutex::new(Vec::new()),
            fail_on: Mutex::new(Vec::new()),
        }
    }

    /// Fail the next and every later call of `kind` whose SQL contains `fragment`.
    pub fn fail_when(&self, kind: CallKind, fragment: &str) {
        self.fail_on
            .lock()
            .unwrap()
            .push((kind, fragment.to_string()));
    }

    /// Remove all failure rules.
    pub fn clear_failures(&self) {
        self.fail_on.lock().unwrap().clear();
    }

    /// Every call so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls.
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Calls of one kind.
    pub fn calls_of(&self, kind: CallKind) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.sql)
            .collect()
    }

    /// Batch executions that were not tracking-table DDL, i.e. migration bodies.
    pub fn body_executions(&self) -> Vec<String> {
        self.calls_of(CallKind::ExecuteBatch)
            .into_iter()
            .filter(|sql| {
                !sql.contains("CREATE TABLE IF NOT EXISTS \"schema_migrations\"")
            })
            .collect()
    }

    /// Existence checks against the default tracking table.
    pub fn existence_checks(&self) -> usize {
        self.calls_of(CallKind::QueryRow)
            .iter()
            .filter(|sql| sql.starts_with("SELECT COUNT(*) FROM \"schema_migrations\""))
            .count()
    }

    /// Direct access to the wrapped backend, bypassing the call log.
    pub fn inner(&self) -> &DuckDbBackend {
        &self.inner
    }

    fn enter(&self, kind: CallKind, sql: &str) -> DbResult<()> {
        self.calls.lock().unwrap().push(Call {
            kind,
            sql: sql.to_string(),
        });
        let rules = self.fail_on.lock().unwrap();
        if rules.iter().any(|(k, frag)| *k == kind && sql.contains(frag.as_str())) {
            return Err(DbError::ExecutionError(format!("injected failure: {sql}")));
        }
        Ok(())
    }
}

impl Default for RecordingDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Database for RecordingDatabase {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize> {
        self.enter(CallKind::Execute, sql)?;
        self.inner.execute(sql, params)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.enter(CallKind::ExecuteBatch, sql)?;
        self.inner.execute_batch(sql)
    }

    fn query_row(&self, sql: &str, params: &[SqlValue]) -> DbResult<Option<Row>> {
        self.enter(CallKind::QueryRow, sql)?;
        self.inner.query_row(sql, params)
    }

    fn query(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<Row>> {
        self.enter(CallKind::Query, sql)?;
        self.inner.query(sql, params)
    }

    fn db_type(&self) -> &'static str {
        "recording-duckdb"
    }
}

/// In-memory [`FileSystem`] with a flat set of directories.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty directory.
    pub fn add_dir(&self, dir: impl Into<PathBuf>) {
        self.dirs.lock().unwrap().insert(dir.into());
    }

    /// Add a file, creating its parent directory.
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: &str) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files
            .lock()
            .unwrap()
            .insert(path, contents.as_bytes().to_vec());
    }

    /// Add a file with raw bytes.
    pub fn add_bytes(&self, path: impl Into<PathBuf>, contents: Vec<u8>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.lock().unwrap().insert(path, contents);
    }
}

impl FileSystem for MemoryFileSystem {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        if !self.dirs.lock().unwrap().contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            ));
        }
        let mut entries: Vec<DirEntry> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name())
            .map(|name| DirEntry {
                name: name.to_string_lossy().into_owned(),
                is_file: true,
            })
            .collect();
        entries.extend(
            self.dirs
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.parent() == Some(dir))
                .filter_map(|p| p.file_name())
                .map(|name| DirEntry {
                    name: name.to_string_lossy().into_owned(),
                    is_file: false,
                }),
        );
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}
