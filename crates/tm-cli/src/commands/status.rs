//! Status command implementation

use anyhow::{Context, Result};
use tm_core::LocalFileSystem;
use tm_migrate::{Migrator, StatusReport};

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{load_context, open_database};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Execute the status command
pub fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = load_context(global)?;
    let db = open_database(&ctx.db_path)?;
    let migrator = Migrator::from_config(&db, &LocalFileSystem, &ctx.config)?;

    let report = migrator
        .list(&ctx.migrations_dir)
        .with_context(|| format!("Failed to read status of {}", ctx.migrations_dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_table(&report));
    }
    Ok(())
}

/// Render the report as an aligned text table followed by a summary line.
pub(crate) fn format_table(report: &StatusReport) -> String {
    if report.migrations.is_empty() {
        return "No migrations found\n".to_string();
    }

    let rows: Vec<[String; 4]> = report
        .migrations
        .iter()
        .map(|m| {
            [
                m.version.to_string(),
                if m.applied { "yes" } else { "no" }.to_string(),
                m.applied_at
                    .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_string()),
                m.filename.clone(),
            ]
        })
        .collect();

    let headers = ["VERSION", "APPLIED", "APPLIED AT", "FILENAME"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&format!(
        "\n{} applied, {} pending\n",
        report.applied_count(),
        report.pending_count()
    ));
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
