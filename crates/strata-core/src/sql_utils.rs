//! SQL text utilities

/// Statement terminator used by [`split_statements`].
pub const STATEMENT_TERMINATOR: char = ';';

/// Split a migration body into individually executable statements.
///
/// Splits on `;`, trims each piece, and drops the empty ones. The splitter
/// knows nothing about string literals or comments: a `;` inside a quoted
/// string or a `--` comment still ends the statement.
///
/// # Examples
/// ```
/// use strata_core::sql_utils::split_statements;
/// assert_eq!(
///     split_statements("CREATE TABLE a (id INT); CREATE TABLE b (id INT);"),
///     vec!["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]
/// );
/// assert!(split_statements("  ;  ;").is_empty());
/// ```
pub fn split_statements(sql: &str) -> Vec<String> {
    sql.split(STATEMENT_TERMINATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
