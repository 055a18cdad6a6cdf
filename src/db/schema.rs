use super::{CellValue, DbError, DbResult, Row};

/// User tables only. SQLite reserves the `sqlite_` prefix for its own
/// bookkeeping tables (`sqlite_sequence`, `sqlite_stat1`, ...).
pub const TABLES_QUERY: &str =
    "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'";

/// Column names of the table bound to `?1`, in declaration order.
pub const COLUMNS_QUERY: &str = "SELECT name FROM pragma_table_info(?1) ORDER BY cid";

/// Pull the text value at `idx` out of a catalog row.
pub(crate) fn text_at(row: &Row, idx: usize) -> DbResult<String> {
    match row.get(idx) {
        Some(CellValue::Text(s)) => Ok(s.clone()),
        Some(other) => Err(DbError::Storage(format!(
            "unexpected catalog value: {}",
            other.display()
        ))),
        None => Err(DbError::Storage(format!(
            "catalog row has no column {}",
            idx
        ))),
    }
}

pub(crate) fn names_from_rows(rows: &[Row]) -> DbResult<Vec<String>> {
    rows.iter().map(|row| text_at(row, 0)).collect()
}
