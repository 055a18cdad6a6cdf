use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::ast::{Resolver, SqliteResolver};

use super::{schema, CellValue, Database, DbError, DbResult, Row};

/// File-backed SQLite store.
///
/// No connection is held between calls: `execute` and `fetch` each open one,
/// run inside a transaction that commits on success, and close it on return.
/// A transaction that is not committed rolls back when dropped, so error
/// paths release everything as well.
pub struct SqliteDatabase {
    path: PathBuf,
    resolver: Box<dyn Resolver>,
}

impl SqliteDatabase {
    /// Browse the store at `path` with the reference SQLite dialect.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_resolver(path, Box::new(SqliteResolver))
    }

    pub fn with_resolver(path: impl Into<PathBuf>, resolver: Box<dyn Resolver>) -> Self {
        Self {
            path: path.into(),
            resolver,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection. The file must already exist; browsing never
    /// creates a store.
    fn connect(&self) -> DbResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Connection::open_with_flags(&self.path, flags).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to open database");
            DbError::from(e)
        })
    }
}

impl Database for SqliteDatabase {
    fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    fn list_tables(&self) -> DbResult<Vec<String>> {
        let rows = self.fetch(schema::TABLES_QUERY, &[])?;
        schema::names_from_rows(&rows)
    }

    fn list_columns(&self, table: &str) -> DbResult<Vec<String>> {
        let rows = self.fetch(schema::COLUMNS_QUERY, &[CellValue::from(table)])?;
        if rows.is_empty() {
            return Err(DbError::Storage(format!("no such table: {}", table)));
        }
        schema::names_from_rows(&rows)
    }

    fn execute(&self, sql: &str, params: &[CellValue]) -> DbResult<()> {
        tracing::debug!(sql, params = params.len(), "execute");
        let mut conn = self.connect()?;
        execute_in_transaction(&mut conn, sql, params).map_err(|e| {
            tracing::warn!(sql, error = %e, "execute failed");
            DbError::from(e)
        })
    }

    fn fetch(&self, sql: &str, params: &[CellValue]) -> DbResult<Vec<Row>> {
        tracing::debug!(sql, params = params.len(), "fetch");
        let start = Instant::now();
        let mut conn = self.connect()?;
        match fetch_in_transaction(&mut conn, sql, params) {
            Ok(rows) => {
                tracing::debug!(
                    rows = rows.len(),
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "fetch complete"
                );
                Ok(rows)
            }
            Err(e) => {
                tracing::warn!(sql, error = %e, "fetch failed");
                Err(DbError::from(e))
            }
        }
    }
}

fn execute_in_transaction(
    conn: &mut Connection,
    sql: &str,
    params: &[CellValue],
) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(sql)?;
        stmt.execute(params_from_iter(params.iter()))?;
    }
    tx.commit()
}

fn fetch_in_transaction(
    conn: &mut Connection,
    sql: &str,
    params: &[CellValue],
) -> rusqlite::Result<Vec<Row>> {
    let tx = conn.transaction()?;
    let rows = {
        let mut stmt = tx.prepare(sql)?;
        let arity = stmt.column_count();
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..arity)
                    .map(|i| row.get_ref(i).map(CellValue::from))
                    .collect::<rusqlite::Result<Row>>()
            })?
            .collect::<rusqlite::Result<Vec<Row>>>()?;
        rows
    };
    tx.commit()?;
    Ok(rows)
}
