use super::*;
use crate::duckdb::DuckDbBackend;
use crate::sqlx_backend::SqliteBackend;
use sqlx::sqlite::SqlitePoolOptions;

fn duck_ledger() -> HistoryLedger {
    let db: Arc<dyn Database> = Arc::new(DuckDbBackend::in_memory().unwrap());
    HistoryLedger::new(db, "schema_history")
}

async fn sqlite_ledger() -> HistoryLedger {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let db: Arc<dyn Database> = Arc::new(SqliteBackend::from_pool(pool));
    HistoryLedger::new(db, "schema_history")
}

fn id(s: &str) -> MigrationId {
    MigrationId::new(s)
}

async fn ids(ledger: &HistoryLedger) -> Vec<String> {
    ledger
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id.into_inner())
        .collect()
}

#[tokio::test]
async fn test_ensure_table_is_idempotent() {
    let ledger = duck_ledger();
    assert!(ledger.ensure_table().await.unwrap());
    ledger.insert(&id("20240101")).await.unwrap();

    assert!(!ledger.ensure_table().await.unwrap());
    assert_eq!(ids(&ledger).await, vec!["20240101"]);
}

#[tokio::test]
async fn test_insert_and_remove() {
    let ledger = duck_ledger();
    ledger.ensure_table().await.unwrap();

    ledger.insert(&id("20240101")).await.unwrap();
    let records = ledger.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "20240101");

    ledger.remove(&id("20240101")).await.unwrap();
    assert!(ledger.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_twice_is_noop() {
    let ledger = duck_ledger();
    ledger.ensure_table().await.unwrap();
    ledger.insert(&id("20240101")).await.unwrap();

    ledger.remove(&id("20240101")).await.unwrap();
    ledger.remove(&id("20240101")).await.unwrap();
    assert!(ledger.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_insert_fails() {
    let ledger = duck_ledger();
    ledger.ensure_table().await.unwrap();
    ledger.insert(&id("20240101")).await.unwrap();

    let err = ledger.insert(&id("20240101")).await.unwrap_err();
    assert!(
        matches!(&err, DbError::DuplicateMigration(m) if m == "20240101"),
        "{err}"
    );
    assert_eq!(ids(&ledger).await, vec!["20240101"]);
}

#[tokio::test]
async fn test_list_all_orders_by_id() {
    let ledger = duck_ledger();
    ledger.ensure_table().await.unwrap();
    for i in ["20240103", "20240101", "20240102"] {
        ledger.insert(&id(i)).await.unwrap();
    }
    assert_eq!(
        ids(&ledger).await,
        vec!["20240101", "20240102", "20240103"]
    );
}

#[tokio::test]
async fn test_find() {
    let ledger = duck_ledger();
    ledger.ensure_table().await.unwrap();
    ledger.insert(&id("20240101")).await.unwrap();

    let found = ledger.find(&id("20240101")).await.unwrap().unwrap();
    assert_eq!(found.id, "20240101");
    assert!(ledger.find(&id("20991231")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_without_table_is_ledger_read() {
    let ledger = duck_ledger();
    let err = ledger.list_all().await.unwrap_err();
    assert!(matches!(err, DbError::LedgerRead(_)), "{err}");
}

#[tokio::test]
async fn test_sqlite_ledger_round_trip() {
    let ledger = sqlite_ledger().await;
    assert!(ledger.ensure_table().await.unwrap());
    assert!(!ledger.ensure_table().await.unwrap());

    ledger.insert(&id("20240102")).await.unwrap();
    ledger.insert(&id("20240101")).await.unwrap();
    assert_eq!(ids(&ledger).await, vec!["20240101", "20240102"]);

    let err = ledger.insert(&id("20240101")).await.unwrap_err();
    assert!(matches!(err, DbError::DuplicateMigration(_)), "{err}");

    ledger.remove(&id("20240102")).await.unwrap();
    ledger.remove(&id("20240102")).await.unwrap();
    assert_eq!(ids(&ledger).await, vec!["20240101"]);
}

#[test]
fn test_map_write_error() {
    let mapped = map_write_error(&id("x"), DbError::UniqueViolation("pk".into()));
    assert!(matches!(mapped, DbError::DuplicateMigration(ref m) if m == "x"));

    let kept = map_write_error(&id("x"), DbError::ExecutionError("boom".into()));
    assert!(matches!(kept, DbError::ExecutionError(_)));
}
