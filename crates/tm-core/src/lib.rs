//! tm-core - Core library for Tidemark
//!
//! This crate provides migration filename parsing, migration discovery over a
//! pluggable filesystem, and project configuration shared by the other
//! Tidemark components.

pub mod config;
pub mod discover;
pub mod error;
pub mod fs;
pub mod migration_file;

pub use config::{Config, DatabaseConfig};
pub use discover::discover_migrations;
pub use error::{CoreError, CoreResult, FilenameError};
pub use fs::{DirEntry, FileSystem, LocalFileSystem};
pub use migration_file::{parse_filename, DiscoveredMigration, MIGRATION_EXTENSION};
