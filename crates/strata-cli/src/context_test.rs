use super::*;
use std::fs;
use std::path::PathBuf;
use strata_core::StepLimit;

#[test]
fn test_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("strata.yml");
    fs::write(
        &file,
        r#"
migration_path: db/migrations
table_name: from_file
database:
  type: postgres
  host: db.internal
  port: 5432
  name: app
"#,
    )
    .unwrap();

    let global = GlobalArgs {
        config: Some(file),
        db_type: Some("mysql".to_string()),
        db_port: Some(3307),
        db_table: Some("from_flag".to_string()),
        debug: true,
        ..GlobalArgs::default()
    };
    let config = load_config(&global).unwrap();

    assert_eq!(config.migration_path, PathBuf::from("db/migrations"));
    assert_eq!(config.table_name, "from_flag");
    assert_eq!(config.database.dialect, Dialect::Mysql);
    assert_eq!(config.database.host.as_deref(), Some("db.internal"));
    assert_eq!(config.database.port, Some(3307));
    assert_eq!(config.database.name.as_deref(), Some("app"));
    assert!(config.debug);
    assert_eq!(config.steps, StepLimit::Unbounded);
}

#[test]
fn test_unknown_db_type_is_rejected() {
    let global = GlobalArgs {
        db_type: Some("oracle".to_string()),
        ..GlobalArgs::default()
    };
    let err = load_config(&global).unwrap_err();
    assert!(err.to_string().contains("unsupported database type"), "{err}");
}

#[test]
fn test_invalid_table_name_is_rejected() {
    let global = GlobalArgs {
        db_table: Some("history; DROP TABLE users".to_string()),
        ..GlobalArgs::default()
    };
    assert!(load_config(&global).is_err());
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let global = GlobalArgs {
        config: Some(dir.path().join("absent.yml")),
        ..GlobalArgs::default()
    };
    let err = load_config(&global).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load configuration file"));
}

#[tokio::test]
async fn test_connect_creates_history_table() {
    let config = Config {
        database: strata_core::DatabaseConfig {
            dialect: Dialect::DuckDb,
            name: Some(":memory:".to_string()),
            ..Default::default()
        },
        ..Config::default()
    };
    let ctx = MigrationContext::connect(config).await.unwrap();
    assert!(!ctx.migrator.ensure_table().await.unwrap());
    ctx.close().await;
}
