use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn run_defaults() {
    let cli = Cli::try_parse_from(["tidemark", "run"]).unwrap();
    assert_eq!(cli.global.project_dir, ".");
    assert!(!cli.global.verbose);
    match cli.command {
        Commands::Run(args) => assert_eq!(args.to_version, None),
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn run_with_to_version() {
    let cli = Cli::try_parse_from(["tidemark", "run", "--to-version", "3"]).unwrap();
    match cli.command {
        Commands::Run(args) => assert_eq!(args.to_version, Some(3)),
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn to_version_rejects_zero_and_negative() {
    assert!(Cli::try_parse_from(["tidemark", "run", "--to-version", "0"]).is_err());
    assert!(Cli::try_parse_from(["tidemark", "run", "--to-version", "-1"]).is_err());
    assert!(Cli::try_parse_from(["tidemark", "run", "--to-version", "abc"]).is_err());
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tidemark",
        "status",
        "--json",
        "-v",
        "-p",
        "proj",
        "--database",
        "app.duckdb",
        "--dir",
        "sql",
        "-t",
        "prod",
    ])
    .unwrap();

    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "proj");
    assert_eq!(cli.global.database.as_deref(), Some("app.duckdb"));
    assert_eq!(cli.global.dir.as_deref(), Some("sql"));
    assert_eq!(cli.global.target.as_deref(), Some("prod"));
    match cli.command {
        Commands::Status(args) => assert!(args.json),
        other => panic!("expected status, got {other:?}"),
    }
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["tidemark"]).is_err());
}
