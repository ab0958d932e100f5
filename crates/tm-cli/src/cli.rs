//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Tidemark - versioned SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "tidemark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (database connection)
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Database path, overriding the config file (":memory:" for in-memory)
    #[arg(long, global = true, env = "TIDEMARK_DATABASE")]
    pub database: Option<String>,

    /// Migrations directory, overriding the config file
    #[arg(long, global = true)]
    pub dir: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations in version order
    Run(RunArgs),

    /// Show applied and pending migrations
    Status(StatusArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Stop after applying this version (must match a migration file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub to_version: Option<u64>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
