use crate::ast::{Resolver, Table};

use super::{CellValue, DbResult, Row};

/// Capability surface over a relational store.
///
/// Implementations run every call synchronously and scope any connection to
/// that single call. Identifiers handed to `fetch`/`execute` must come from
/// the catalog or the caller; values travel only through `params`.
pub trait Database {
    /// Resolver used by queries built on this database.
    fn resolver(&self) -> &dyn Resolver;

    /// User tables, in catalog order.
    fn list_tables(&self) -> DbResult<Vec<String>>;

    /// Column names of `table`, in declaration order.
    fn list_columns(&self, table: &str) -> DbResult<Vec<String>>;

    fn execute(&self, sql: &str, params: &[CellValue]) -> DbResult<()>;

    fn fetch(&self, sql: &str, params: &[CellValue]) -> DbResult<Vec<Row>>;

    /// Look up a table by name, failing if the catalog does not list it.
    fn table(&self, name: &str) -> DbResult<Table<'_>>
    where
        Self: Sized,
    {
        Table::open(self, name)
    }
}
