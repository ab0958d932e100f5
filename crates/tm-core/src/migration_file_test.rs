use super::*;

#[test]
fn test_parse_simple_filename() {
    let (version, description) = parse_filename("001_initial.sql").unwrap();
    assert_eq!(version, 1);
    assert_eq!(description, "initial");
}

#[test]
fn test_parse_keeps_further_separators_in_description() {
    let (version, description) = parse_filename("42_add_user_email_column.sql").unwrap();
    assert_eq!(version, 42);
    assert_eq!(description, "add_user_email_column");
}

#[test]
fn test_parse_unpadded_version() {
    assert_eq!(parse_filename("10_y.sql").unwrap().0, 10);
    assert_eq!(parse_filename("0_bootstrap.sql").unwrap().0, 0);
}

#[test]
fn test_parse_rejects_wrong_extension() {
    let err = parse_filename("001_initial.txt").unwrap_err();
    assert!(matches!(err, FilenameError::InvalidExtension { .. }));

    let err = parse_filename("001_initial.SQL").unwrap_err();
    assert!(matches!(err, FilenameError::InvalidExtension { .. }));

    let err = parse_filename("001_initialsql").unwrap_err();
    assert!(matches!(err, FilenameError::InvalidExtension { .. }));
}

#[test]
fn test_parse_rejects_missing_separator() {
    let err = parse_filename("001initial.sql").unwrap_err();
    assert_eq!(
        err,
        FilenameError::MalformedName {
            filename: "001initial.sql".to_string()
        }
    );
}

#[test]
fn test_parse_rejects_non_numeric_version() {
    let err = parse_filename("abc_initial.sql").unwrap_err();
    assert_eq!(
        err,
        FilenameError::NonNumericVersion {
            filename: "abc_initial.sql".to_string(),
            token: "abc".to_string(),
        }
    );
}

#[test]
fn test_parse_rejects_signed_and_empty_versions() {
    for name in ["-1_down.sql", "+1_up.sql", "_nothing.sql", "1a_mixed.sql"] {
        let err = parse_filename(name).unwrap_err();
        assert!(
            matches!(err, FilenameError::NonNumericVersion { .. }),
            "{name} should be rejected as non-numeric, got {err:?}"
        );
    }
}

#[test]
fn test_parse_rejects_overflowing_version() {
    let err = parse_filename("99999999999999999999999_big.sql").unwrap_err();
    assert!(matches!(err, FilenameError::NonNumericVersion { .. }));
}

#[test]
fn test_discovered_migration_from_filename() {
    let m = DiscoveredMigration::from_filename("002_add_email.sql").unwrap();
    assert_eq!(m.version, 2);
    assert_eq!(m.description, "add_email");
    assert_eq!(m.filename, "002_add_email.sql");
}

#[test]
fn test_has_migration_extension() {
    assert!(has_migration_extension("001_initial.sql"));
    assert!(!has_migration_extension("README.md"));
    assert!(!has_migration_extension("sql"));
}
