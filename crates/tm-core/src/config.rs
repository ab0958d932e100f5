//! Configuration types and parsing for tidemark.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file names searched by [`Config::load_from_dir`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["tidemark.yml", "tidemark.yaml"];

/// Project configuration from tidemark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the migration files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Name of the table recording applied migrations
    #[serde(default = "default_tracking_table")]
    pub tracking_table: String,

    /// Default database connection
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Named database overrides (e.g., dev, staging, prod)
    #[serde(default)]
    pub targets: HashMap<String, DatabaseConfig>,
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_tracking_table() -> String {
    "schema_migrations".to_string()
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            tracking_table: default_tracking_table(),
            database: DatabaseConfig::default(),
            targets: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {e}", path.display()),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Looks for tidemark.yml or tidemark.yaml and falls back to defaults
    /// when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!("No config file in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        if !is_plain_identifier(&self.tracking_table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "tracking_table '{}' must be a plain SQL identifier ([A-Za-z_][A-Za-z0-9_]*)",
                    self.tracking_table
                ),
            });
        }

        for (name, target) in &self.targets {
            if target.path.is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("target '{name}' has an empty database path"),
                });
            }
        }
        Ok(())
    }

    /// Database configuration for `target`, or the default when `None`
    pub fn database_for(&self, target: Option<&str>) -> CoreResult<&DatabaseConfig> {
        match target {
            None => Ok(&self.database),
            Some(name) => self.targets.get(name).ok_or_else(|| {
                let mut known: Vec<&str> = self.targets.keys().map(String::as_str).collect();
                known.sort_unstable();
                CoreError::ConfigInvalid {
                    message: format!(
                        "unknown target '{name}' (available: {})",
                        if known.is_empty() {
                            "none".to_string()
                        } else {
                            known.join(", ")
                        }
                    ),
                }
            }),
        }
    }

    /// Migrations directory resolved against the project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }
}

/// Returns true for `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
