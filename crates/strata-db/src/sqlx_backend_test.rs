use super::*;
use sqlx::sqlite::SqlitePoolOptions;

async fn sqlite() -> SqliteBackend {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    SqliteBackend::from_pool(pool)
}

#[tokio::test]
async fn test_sqlite_dialect() {
    let db = sqlite().await;
    assert_eq!(db.dialect(), Dialect::Sqlite);
    assert_eq!(db.db_type(), "sqlite");
}

#[tokio::test]
async fn test_sqlite_plain_text_runs_multiple_statements() {
    let db = sqlite().await;
    db.execute(&Statement::new(
        "CREATE TABLE a (id INTEGER); CREATE TABLE b (id INTEGER)",
    ))
    .await
    .unwrap();

    let count = db
        .query_count("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'")
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_sqlite_bound_args_and_text_rows() {
    let db = sqlite().await;
    db.execute(&Statement::new("CREATE TABLE kv (k TEXT, v TEXT)"))
        .await
        .unwrap();
    let rows = db
        .execute(&Statement::with_args(
            "INSERT INTO kv VALUES (?, ?)",
            vec!["a".into(), "it's".into()],
        ))
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let rows = db.query_text("SELECT k, v FROM kv", 2).await.unwrap();
    assert_eq!(rows, vec![vec!["a".to_string(), "it's".to_string()]]);
}

#[tokio::test]
async fn test_sqlite_null_text_reads_as_empty() {
    let db = sqlite().await;
    let rows = db.query_text("SELECT NULL", 1).await.unwrap();
    assert_eq!(rows, vec![vec![String::new()]]);
}

#[tokio::test]
async fn test_sqlite_unique_violation_is_classified() {
    let db = sqlite().await;
    db.execute(&Statement::new("CREATE TABLE t (id TEXT PRIMARY KEY)"))
        .await
        .unwrap();
    db.execute(&Statement::new("INSERT INTO t VALUES ('x')"))
        .await
        .unwrap();
    let err = db
        .execute(&Statement::new("INSERT INTO t VALUES ('x')"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation(_)), "{err}");
}

#[tokio::test]
async fn test_sqlite_transaction_rollback_and_commit() {
    let db = sqlite().await;

    let mut tx = db.begin().await.unwrap();
    tx.execute(&Statement::new("CREATE TABLE discarded (id INTEGER)"))
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    let mut tx = db.begin().await.unwrap();
    tx.execute(&Statement::new("CREATE TABLE kept (id INTEGER)"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let rows = db
        .query_text(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
            1,
        )
        .await
        .unwrap();
    assert_eq!(rows, vec![vec!["kept".to_string()]]);
}

#[tokio::test]
async fn test_sqlite_syntax_error_is_execution_error() {
    let db = sqlite().await;
    let err = db
        .execute(&Statement::new("CREATE TABLEX nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)), "{err}");
}
