//! Interactive browsing state.
//!
//! A front end feeds the three user events (table picked, SQL edited, filter
//! changed) into a `Session` and renders what it exposes: the SQL text, the
//! last good result, and the error of the latest interaction, if any.
//! A failed interaction never disturbs the previous result.

use std::time::Instant;

use crate::ast::{extract_columns, Projection, Query, Table};
use crate::db::{Database, DbError, DbResult, QueryResult, Row};

pub struct Session<'db> {
    database: &'db dyn Database,
    tables: Vec<String>,
    table: Option<Table<'db>>,
    sql: String,
    filter: String,
    result: QueryResult,
    error: Option<DbError>,
}

impl<'db> Session<'db> {
    /// Start a session and load the table list. A store that cannot be read
    /// leaves the session empty with the error recorded.
    pub fn new(database: &'db dyn Database) -> Self {
        let mut session = Self {
            database,
            tables: Vec::new(),
            table: None,
            sql: String::new(),
            filter: String::new(),
            result: QueryResult::empty(),
            error: None,
        };
        session.refresh_tables();
        session
    }

    pub fn refresh_tables(&mut self) {
        let outcome = self.database.list_tables();
        if let Some(tables) = self.record(outcome) {
            self.tables = tables;
        }
    }

    /// Show every row of `name` and derive the SQL for it. Clears the filter.
    pub fn select_table(&mut self, name: &str) {
        tracing::info!(table = name, "table selected");
        let outcome = self.load_table(name);
        if let Some((table, sql, result)) = self.record(outcome) {
            self.table = Some(table);
            self.sql = sql;
            self.filter.clear();
            self.result = result;
        }
    }

    /// Run hand-edited SQL, labelling the grid from the SELECT list.
    ///
    /// The text is kept even when it fails. Labels are extracted before the
    /// statement runs, so text without a SELECT is never executed.
    pub fn edit_sql(&mut self, sql: &str) {
        self.sql = sql.to_string();
        let outcome = self.run_edited(sql);
        if let Some(result) = self.record(outcome) {
            self.result = result;
        }
    }

    /// Narrow the selected table by `predicate`. A blank predicate shows the
    /// whole table again. Without a selected table the text is only kept.
    pub fn set_filter(&mut self, predicate: &str) {
        self.filter = predicate.to_string();
        let Some(table) = self.table.clone() else {
            return;
        };
        let outcome = self.run_filtered(&table, predicate);
        if let Some((sql, result)) = self.record(outcome) {
            self.sql = sql;
            self.result = result;
        }
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn selected_table(&self) -> Option<&str> {
        self.table.as_ref().map(|t| t.name())
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Last successful result.
    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    /// Error of the latest interaction. Cleared by the next success.
    pub fn error(&self) -> Option<&DbError> {
        self.error.as_ref()
    }

    fn load_table(&self, name: &str) -> DbResult<(Table<'db>, String, QueryResult)> {
        let table = Table::open(self.database, name)?;
        let query = table.select(Projection::All)?;
        let (sql, result) = self.run_query(&query)?;
        Ok((table, sql, result))
    }

    fn run_filtered(&self, table: &Table<'db>, predicate: &str) -> DbResult<(String, QueryResult)> {
        let mut query = table.select(Projection::All)?;
        if !predicate.trim().is_empty() {
            query = query.where_(predicate)?;
        }
        self.run_query(&query)
    }

    fn run_query(&self, query: &Query<'db>) -> DbResult<(String, QueryResult)> {
        let sql = query.resolve()?;
        let start = Instant::now();
        let rows = self.database.fetch(&sql, &[])?;
        let labels = query.projection().map(<[String]>::to_vec).unwrap_or_default();
        let result = QueryResult::new(labels, rows, start.elapsed());
        Ok((sql, result))
    }

    fn run_edited(&self, sql: &str) -> DbResult<QueryResult> {
        let labels = extract_columns(sql)?;
        let start = Instant::now();
        let rows = self.database.fetch(sql, &[])?;
        let labels = reconcile_labels(labels, &rows);
        Ok(QueryResult::new(labels, rows, start.elapsed()))
    }

    /// Remember how an interaction ended and hand back its value on success.
    fn record<T>(&mut self, outcome: DbResult<T>) -> Option<T> {
        match outcome {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(err) => {
                tracing::warn!(category = %err.category(), error = %err, "interaction failed");
                self.error = Some(err);
                None
            }
        }
    }
}

/// Fit extracted labels to the actual row width: pad with positional names,
/// drop extras. With no rows the labels stand as extracted.
fn reconcile_labels(mut labels: Vec<String>, rows: &[Row]) -> Vec<String> {
    let Some(arity) = rows.first().map(Vec::len) else {
        return labels;
    };
    labels.truncate(arity);
    for i in labels.len()..arity {
        labels.push(format!("column{}", i + 1));
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CellValue, ErrorCategory, SqliteDatabase};
    use rusqlite::Connection;
    use tempfile::NamedTempFile;

    fn users_file() -> NamedTempFile {
        let file = NamedTempFile::new().expect("create temp db file");
        let conn = Connection::open(file.path()).expect("open temp sqlite db");
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER, name TEXT, email TEXT);
             INSERT INTO users VALUES (1, 'Alice', 'a@x.com');",
        )
        .expect("seed users");
        drop(conn);
        file
    }

    fn alice() -> Row {
        vec![
            CellValue::Integer(1),
            CellValue::Text("Alice".into()),
            CellValue::Text("a@x.com".into()),
        ]
    }

    #[test]
    fn test_browse_filter_scenario() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);
        assert_eq!(session.tables(), ["users".to_string()]);

        session.select_table("users");
        assert!(session.error().is_none());
        assert_eq!(session.sql(), "SELECT id,name,email FROM users");
        assert_eq!(session.result().column_names(), vec!["id", "name", "email"]);
        assert_eq!(session.result().rows, vec![alice()]);

        session.set_filter("id=1");
        assert!(session.error().is_none());
        assert_eq!(session.sql(), "SELECT id,name,email FROM users WHERE id=1");
        assert_eq!(session.result().rows, vec![alice()]);

        session.set_filter("id=2");
        assert!(session.error().is_none());
        assert_eq!(session.sql(), "SELECT id,name,email FROM users WHERE id=2");
        assert!(session.result().rows.is_empty());
        assert_eq!(session.result().column_names(), vec!["id", "name", "email"]);

        session.set_filter("   ");
        assert_eq!(session.sql(), "SELECT id,name,email FROM users");
        assert_eq!(session.result().rows, vec![alice()]);
    }

    #[test]
    fn test_edited_sql_relabels_grid() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);
        session.select_table("users");

        session.edit_sql("SELECT email, id FROM users");
        assert!(session.error().is_none());
        assert_eq!(session.result().column_names(), vec!["email", "id"]);
        assert_eq!(
            session.result().rows,
            vec![vec![
                CellValue::Text("a@x.com".into()),
                CellValue::Integer(1)
            ]]
        );
    }

    #[test]
    fn test_failed_edit_keeps_previous_result() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);
        session.select_table("users");

        session.edit_sql("SELECT nme FROM users");
        let err = session.error().expect("engine error recorded");
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.to_string().contains("nme"));
        assert_eq!(session.sql(), "SELECT nme FROM users");
        assert_eq!(session.result().rows, vec![alice()]);
        assert_eq!(session.result().column_names(), vec!["id", "name", "email"]);

        session.edit_sql("SELECT name FROM users");
        assert!(session.error().is_none());
        assert_eq!(session.result().column_names(), vec!["name"]);
    }

    #[test]
    fn test_non_select_edit_is_not_executed() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);
        session.select_table("users");

        session.edit_sql("DELETE FROM users");
        assert_eq!(session.error().map(DbError::category), Some(ErrorCategory::Parse));
        let rows = db.fetch("SELECT id FROM users", &[]).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_wildcard_edit_gets_positional_labels() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);

        session.edit_sql("SELECT * FROM users");
        assert!(session.error().is_none());
        assert_eq!(
            session.result().column_names(),
            vec!["*", "column2", "column3"]
        );
    }

    #[test]
    fn test_bad_filter_keeps_previous_result() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);
        session.select_table("users");

        session.set_filter("id = = 1");
        assert_eq!(session.error().map(DbError::category), Some(ErrorCategory::Storage));
        assert_eq!(session.sql(), "SELECT id,name,email FROM users");
        assert_eq!(session.filter(), "id = = 1");
        assert_eq!(session.result().rows, vec![alice()]);
    }

    #[test]
    fn test_unknown_table_is_reported() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);
        session.select_table("orders");
        assert!(matches!(session.error(), Some(DbError::UnknownTable(_))));
        assert!(session.selected_table().is_none());
    }

    #[test]
    fn test_filter_without_table_is_remembered() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);
        session.set_filter("id=1");
        assert_eq!(session.filter(), "id=1");
        assert!(session.sql().is_empty());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_selecting_a_table_clears_filter() {
        let file = users_file();
        let db = SqliteDatabase::open(file.path());
        let mut session = Session::new(&db);
        session.select_table("users");
        session.set_filter("id=2");
        session.select_table("users");
        assert!(session.filter().is_empty());
        assert_eq!(session.result().rows, vec![alice()]);
    }

    #[test]
    fn test_unreadable_store_leaves_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let db = SqliteDatabase::open(dir.path().join("missing.db"));
        let session = Session::new(&db);
        assert!(session.tables().is_empty());
        assert!(matches!(session.error(), Some(DbError::Storage(_))));
    }

    #[test]
    fn test_reconcile_labels() {
        let rows = vec![vec![CellValue::Null, CellValue::Null]];
        assert_eq!(
            reconcile_labels(vec!["a".into(), "b".into(), "c".into()], &rows),
            vec!["a", "b"]
        );
        assert_eq!(reconcile_labels(vec!["*".into()], &rows), vec!["*", "column2"]);
        assert_eq!(reconcile_labels(vec!["a".into()], &[]), vec!["a"]);
    }
}
