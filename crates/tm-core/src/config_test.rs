use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.migrations_dir, "migrations");
    assert_eq!(config.tracking_table, "schema_migrations");
    assert_eq!(config.database.path, ":memory:");
    assert!(config.targets.is_empty());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
migrations_dir: db/migrations
tracking_table: app_migrations
database:
  path: "./dev.duckdb"
targets:
  prod:
    path: /var/lib/app/prod.duckdb
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    assert_eq!(config.migrations_dir, "db/migrations");
    assert_eq!(config.tracking_table, "app_migrations");
    assert_eq!(config.database_for(None).unwrap().path, "./dev.duckdb");
    assert_eq!(
        config.database_for(Some("prod")).unwrap().path,
        "/var/lib/app/prod.duckdb"
    );
    assert_eq!(
        config.migrations_dir_absolute(Path::new("/srv/app")),
        PathBuf::from("/srv/app/db/migrations")
    );
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("migration_dir: typo\n");
    assert!(result.is_err());
}

#[test]
fn test_unknown_target() {
    let config = Config::default();
    let err = config.database_for(Some("staging")).unwrap_err();
    assert!(err.to_string().contains("unknown target 'staging'"));
}

#[test]
fn test_validate_rejects_unsafe_tracking_table() {
    let config = Config {
        tracking_table: "migrations; DROP TABLE users".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_plain_identifier() {
    assert!(is_plain_identifier("schema_migrations"));
    assert!(is_plain_identifier("_private1"));
    assert!(!is_plain_identifier(""));
    assert!(!is_plain_identifier("1table"));
    assert!(!is_plain_identifier("public.schema_migrations"));
}

#[test]
fn test_load_from_dir_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "migrations");
}

#[test]
fn test_load_from_dir_reads_yaml_variant() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tidemark.yaml"),
        "migrations_dir: sql\ntracking_table: applied\n",
    )
    .unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "sql");
    assert_eq!(config.tracking_table, "applied");
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(&dir.path().join("tidemark.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tidemark.yml");
    std::fs::write(&path, "migrations_dir: [unclosed\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}
