/// Query → SQL text resolvers.
///
/// A resolver is a stateless strategy owned by a database. Dispatch happens
/// once per node on `QueryOp`; the default `resolve_select`/`resolve_where`
/// bodies produce the reference grammar and only ask the dialect how to write
/// an identifier, so a new dialect overrides as little as it needs.
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::types::{Query, QueryOp, QueryParam};
use crate::db::{DbError, DbResult};

pub trait Resolver: Send + Sync {
    /// Short dialect name, as used in configuration.
    fn dialect(&self) -> &str;

    /// Spell a table or column name. Names reach the resolver from the
    /// catalog or the caller, never from free text.
    fn identifier<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }

    fn resolve(&self, query: &Query<'_>) -> DbResult<String> {
        match query.op() {
            QueryOp::Select => self.resolve_select(query),
            QueryOp::Where => self.resolve_where(query),
        }
    }

    /// `SELECT <c1>,<c2>,... FROM <table>`
    fn resolve_select(&self, query: &Query<'_>) -> DbResult<String> {
        let columns = match query.param() {
            QueryParam::Columns(columns) if columns.is_empty() => {
                return Err(DbError::Type("SELECT needs at least one column".into()));
            }
            QueryParam::Columns(columns) => columns,
            other => {
                return Err(DbError::Type(format!(
                    "SELECT expects a column list, got a {}",
                    other.kind()
                )));
            }
        };
        if query.child().is_some() {
            return Err(DbError::Structural(
                "SELECT is the base of a query and cannot have a child".into(),
            ));
        }

        let columns: Vec<Cow<'_, str>> = columns.iter().map(|c| self.identifier(c)).collect();
        Ok(format!(
            "SELECT {} FROM {}",
            columns.join(","),
            self.identifier(query.table().name())
        ))
    }

    /// `<child SQL> WHERE <predicate>`. Stacked filters collapse into one
    /// clause: `WHERE (p1) AND (p2)`, oldest first.
    fn resolve_where(&self, query: &Query<'_>) -> DbResult<String> {
        let mut predicates = vec![predicate_of(query)?];
        let mut current = child_of_where(query)?;
        loop {
            match current.op() {
                QueryOp::Select => break,
                QueryOp::Where => {
                    predicates.push(predicate_of(current)?);
                    current = child_of_where(current)?;
                }
            }
        }

        let select = self.resolve(current)?;
        predicates.reverse();
        let filter = match predicates.as_slice() {
            [single] => single.to_string(),
            many => many
                .iter()
                .map(|p| format!("({})", p))
                .collect::<Vec<_>>()
                .join(" AND "),
        };
        Ok(format!("{} WHERE {}", select, filter))
    }
}

fn predicate_of<'q>(query: &'q Query<'_>) -> DbResult<&'q str> {
    match query.param() {
        QueryParam::Predicate(predicate) => Ok(predicate),
        other => Err(DbError::Type(format!(
            "WHERE expects a predicate, got a {}",
            other.kind()
        ))),
    }
}

fn child_of_where<'q, 'db>(query: &'q Query<'db>) -> DbResult<&'q Query<'db>> {
    query.child().ok_or_else(|| {
        DbError::Structural("WHERE must refine a SELECT, but it has no child query".into())
    })
}

/// SQLite's grammar with identifiers written verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteResolver;

impl Resolver for SqliteResolver {
    fn dialect(&self) -> &str {
        "sqlite"
    }
}

/// Standard SQL with every identifier double-quoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiResolver;

impl Resolver for AnsiResolver {
    fn dialect(&self) -> &str {
        "ansi"
    }

    fn identifier<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

/// Resolver selection for configuration and the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Sqlite,
    Ansi,
}

impl Dialect {
    pub fn resolver(self) -> Box<dyn Resolver> {
        match self {
            Dialect::Sqlite => Box::new(SqliteResolver),
            Dialect::Ansi => Box::new(AnsiResolver),
        }
    }
}
