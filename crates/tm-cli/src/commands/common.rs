//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tm_core::Config;
use tm_db::DuckDbBackend;

use crate::cli::GlobalArgs;

/// In-memory DuckDB sentinel accepted wherever a database path is.
pub(crate) const MEMORY_DATABASE: &str = ":memory:";

/// Everything a command needs once flags and config are merged.
#[derive(Debug)]
pub(crate) struct CommandContext {
    pub config: Config,
    pub db_path: String,
    pub migrations_dir: PathBuf,
}

/// Load config and apply flag overrides.
///
/// Paths from the config file are relative to the project directory; paths
/// passed on the command line are used as given.
pub(crate) fn load_context(global: &GlobalArgs) -> Result<CommandContext> {
    let root = Path::new(&global.project_dir);
    let config = load_config(root, global.config.as_deref())?;
    let db_path = resolve_db_path(root, &config, global)?;
    let migrations_dir = match &global.dir {
        Some(dir) => PathBuf::from(dir),
        None => config.migrations_dir_absolute(root),
    };

    log::debug!(
        "database={} migrations_dir={} tracking_table={}",
        db_path,
        migrations_dir.display(),
        config.tracking_table
    );

    Ok(CommandContext {
        config,
        db_path,
        migrations_dir,
    })
}

fn load_config(root: &Path, explicit: Option<&str>) -> Result<Config> {
    match explicit {
        Some(path) => {
            Config::load(Path::new(path)).with_context(|| format!("Failed to load config {path}"))
        }
        None => Config::load_from_dir(root)
            .with_context(|| format!("Failed to load config from {}", root.display())),
    }
}

/// Database path: `--database` / `TIDEMARK_DATABASE`, else the selected
/// target, else the config default.
pub(crate) fn resolve_db_path(root: &Path, config: &Config, global: &GlobalArgs) -> Result<String> {
    if let Some(path) = &global.database {
        return Ok(path.clone());
    }

    let db = config.database_for(global.target.as_deref())?;
    if db.path == MEMORY_DATABASE || Path::new(&db.path).is_absolute() {
        return Ok(db.path.clone());
    }
    Ok(root.join(&db.path).display().to_string())
}

/// Open the DuckDB database at `path`.
pub(crate) fn open_database(path: &str) -> Result<DuckDbBackend> {
    if path == MEMORY_DATABASE {
        log::warn!("Using an in-memory database; applied migrations are lost on exit");
    }
    DuckDbBackend::new(path).with_context(|| format!("Failed to open database {path}"))
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
