use super::*;
use chrono::NaiveDate;

fn sample_ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 8)
        .unwrap()
        .and_hms_opt(10, 2, 31)
        .unwrap()
}

#[test]
fn test_dialect_for_matches_kind() {
    for dialect in Dialect::ALL {
        assert_eq!(dialect_for(dialect).dialect(), dialect);
    }
}

#[test]
fn test_placeholders_per_dialect() {
    assert!(dialect_for(Dialect::Postgres)
        .insert_record_query("t")
        .contains("$1"));
    assert!(dialect_for(Dialect::Postgres)
        .delete_record_query("t")
        .ends_with("migration = $1"));
    for dialect in [Dialect::Mysql, Dialect::Sqlite, Dialect::DuckDb] {
        let d = dialect_for(dialect);
        assert!(!d.insert_record_query("t").contains('$'), "{dialect}");
        assert!(d.delete_record_query("t").ends_with("migration = ?"), "{dialect}");
    }
}

#[test]
fn test_queries_name_the_table() {
    for dialect in Dialect::ALL {
        let d = dialect_for(dialect);
        assert!(d.create_table_query("history").starts_with("CREATE TABLE history ("));
        assert!(d.select_history_query("history").contains("FROM history ORDER BY migration ASC"));
        assert!(d.table_exists_query("history").contains("'history'"));
    }
}

#[test]
fn test_postgres_exists_query_folds_case() {
    let sql = dialect_for(Dialect::Postgres).table_exists_query("SchemaHistory");
    assert!(sql.contains("tablename = 'schemahistory'"));
}

#[test]
fn test_timestamp_roundtrip() {
    for dialect in Dialect::ALL {
        let d = dialect_for(dialect);
        let text = d.format_timestamp(sample_ts());
        assert_eq!(text, "2024-02-08 10:02:31");
        assert_eq!(d.parse_timestamp(&text).unwrap(), sample_ts());
    }
}

#[test]
fn test_sqlite_accepts_other_timestamp_shapes() {
    let d = dialect_for(Dialect::Sqlite);
    for text in [
        "2024-02-08T10:02:31",
        "2024-02-08 10:02:31.000",
        "2024-02-08T10:02:31Z",
        "2024-02-08T12:02:31+02:00",
    ] {
        assert_eq!(d.parse_timestamp(text).unwrap(), sample_ts(), "{text}");
    }
}

#[test]
fn test_invalid_timestamp_is_ledger_read_error() {
    for dialect in Dialect::ALL {
        let err = dialect_for(dialect).parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, DbError::LedgerRead(_)));
    }
}
