//! tm-db - Database abstraction layer for Tidemark
//!
//! This crate provides the `Database` capability consumed by the migration
//! engine, a small typed value model for parameters and result rows, and a
//! DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod value;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
pub use value::{Row, SqlValue};
