//! Recover column labels from hand-written SELECT text.
//!
//! This is a first-clause-boundary heuristic, not a tokenizer: a comma list
//! is read after the first `select` and cut at the first entry containing
//! whitespace. Quoted identifiers with spaces, function calls whose
//! arguments contain commas, and `AS` aliases come out wrong.

use crate::db::{DbError, DbResult};

const SELECT_KEYWORD: &str = "select";

/// Selected column labels of `sql`, in order.
///
/// ```
/// use litelens::ast::extract_columns;
///
/// let columns = extract_columns("SELECT a, b FROM t WHERE x=1").unwrap();
/// assert_eq!(columns, vec!["a", "b"]);
/// ```
pub fn extract_columns(sql: &str) -> DbResult<Vec<String>> {
    // ASCII lowering keeps byte offsets aligned with `sql`.
    let lowered = sql.to_ascii_lowercase();
    let start = lowered
        .find(SELECT_KEYWORD)
        .ok_or_else(|| DbError::Parse("Not a select command.".into()))?;
    let projection = sql[start + SELECT_KEYWORD.len()..].trim();

    let mut columns = Vec::new();
    for entry in projection.split(',').map(str::trim) {
        match entry.split_once(char::is_whitespace) {
            Some((head, _)) => {
                columns.push(head.to_string());
                break;
            }
            None => columns.push(entry.to_string()),
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_column_list() {
        assert_eq!(
            extract_columns("SELECT a,b,c FROM t").unwrap(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_stops_at_from_clause() {
        assert_eq!(
            extract_columns("SELECT a, b FROM t WHERE x=1").unwrap(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_not_a_select() {
        let err = extract_columns("UPDATE t SET x=1").unwrap_err();
        assert!(matches!(err, DbError::Parse(_)));
    }

    #[test]
    fn test_keyword_is_case_insensitive_and_labels_keep_case() {
        assert_eq!(
            extract_columns("  sElEcT Id,UserName from Users").unwrap(),
            vec!["Id", "UserName"]
        );
    }

    #[test]
    fn test_newline_is_a_clause_boundary() {
        assert_eq!(
            extract_columns("SELECT id,\n  name\nFROM users").unwrap(),
            vec!["id", "name"]
        );
    }

    #[test]
    fn test_alias_keeps_expression_head() {
        assert_eq!(
            extract_columns("SELECT id, name AS n, email FROM users").unwrap(),
            vec!["id", "name"]
        );
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(extract_columns("SELECT * FROM users").unwrap(), vec!["*"]);
    }

    #[test]
    fn test_bare_select_yields_single_empty_label() {
        assert_eq!(extract_columns("select").unwrap(), vec![""]);
    }
}
