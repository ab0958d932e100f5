//! Run command implementation

use anyhow::{Context, Result};
use tm_core::LocalFileSystem;
use tm_migrate::{Migrator, RunSummary};

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{load_context, open_database};

/// Execute the run command
pub fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = load_context(global)?;
    let db = open_database(&ctx.db_path)?;
    let migrator = Migrator::from_config(&db, &LocalFileSystem, &ctx.config)?;

    let summary = migrator
        .run(&ctx.migrations_dir, args.to_version)
        .with_context(|| format!("Migration run failed in {}", ctx.migrations_dir.display()))?;

    print!("{}", format_summary(&summary));
    Ok(())
}

pub(crate) fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    for filename in &summary.applied {
        out.push_str(&format!("  Applied: {filename}\n"));
    }
    let mut line = format!(
        "{} applied, {} already applied",
        summary.applied.len(),
        summary.skipped
    );
    if let Some(version) = summary.stopped_at {
        line.push_str(&format!(" (stopped at version {version})"));
    }
    if summary.applied.is_empty() {
        line.push_str(", nothing to do");
    }
    out.push_str(&line);
    out.push('\n');
    out
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
