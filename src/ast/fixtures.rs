//! In-memory catalog for exercising the query model without SQLite.

use crate::ast::{Resolver, SqliteResolver};
use crate::db::{CellValue, Database, DbError, DbResult, Row};

pub(crate) struct StaticDatabase {
    tables: Vec<(String, Vec<String>)>,
    resolver: Box<dyn Resolver>,
}

impl StaticDatabase {
    pub(crate) fn new() -> Self {
        Self::with_resolver(Box::new(SqliteResolver))
    }

    pub(crate) fn with_resolver(resolver: Box<dyn Resolver>) -> Self {
        Self {
            tables: Vec::new(),
            resolver,
        }
    }

    pub(crate) fn with_table(mut self, name: &str, columns: &[&str]) -> Self {
        self.tables.push((
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }
}

impl Database for StaticDatabase {
    fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    fn list_tables(&self) -> DbResult<Vec<String>> {
        Ok(self.tables.iter().map(|(name, _)| name.clone()).collect())
    }

    fn list_columns(&self, table: &str) -> DbResult<Vec<String>> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, columns)| columns.clone())
            .ok_or_else(|| DbError::Storage(format!("no such table: {}", table)))
    }

    fn execute(&self, _sql: &str, _params: &[CellValue]) -> DbResult<()> {
        Err(DbError::Storage("static catalog is read-only".into()))
    }

    fn fetch(&self, _sql: &str, _params: &[CellValue]) -> DbResult<Vec<Row>> {
        Ok(Vec::new())
    }
}
