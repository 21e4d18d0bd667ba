use super::*;

#[test]
fn test_split_two_statements() {
    assert_eq!(
        split_statements("CREATE TABLE a (id INT); CREATE TABLE b (id INT);"),
        vec!["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]
    );
}

#[test]
fn test_split_empty_input() {
    assert!(split_statements("").is_empty());
}

#[test]
fn test_split_only_terminators() {
    assert!(split_statements("  ;  ;").is_empty());
}

#[test]
fn test_split_without_trailing_terminator() {
    assert_eq!(
        split_statements("INSERT INTO t VALUES (1);\nINSERT INTO t VALUES (2)"),
        vec!["INSERT INTO t VALUES (1)", "INSERT INTO t VALUES (2)"]
    );
}

#[test]
fn test_split_trims_multiline_whitespace() {
    let sql = "\n\n  CREATE TABLE users (\n    id INT\n  );\n\n";
    assert_eq!(
        split_statements(sql),
        vec!["CREATE TABLE users (\n    id INT\n  )"]
    );
}

#[test]
fn test_split_comment_only_body_is_kept() {
    // Scaffolded bodies are a single comment; it survives as one statement.
    assert_eq!(
        split_statements("-- Write your 'up' SQL here\n"),
        vec!["-- Write your 'up' SQL here"]
    );
}

#[test]
fn test_split_ignores_quoting() {
    // Known limitation: semicolons inside literals still split.
    assert_eq!(
        split_statements("INSERT INTO t VALUES ('a;b')"),
        vec!["INSERT INTO t VALUES ('a", "b')"]
    );
}
