//! Query model: tables, projections and the immutable query chain.
//!
//! A chain always starts with a `Select` node and may be refined by any
//! number of `Where` nodes. Each refinement wraps the previous node, which is
//! shared through an `Rc` rather than copied, so building on a query never
//! changes it.

use std::fmt;
use std::rc::Rc;

use crate::db::{Database, DbError, DbResult};

/// Operation kind of a query node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOp {
    Select,
    Where,
}

impl QueryOp {
    pub fn keyword(self) -> &'static str {
        match self {
            QueryOp::Select => "SELECT",
            QueryOp::Where => "WHERE",
        }
    }
}

impl fmt::Display for QueryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Operation-specific parameter carried by a query node.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    /// Ordered column names of a projection.
    Columns(Vec<String>),
    /// Opaque boolean filter expression.
    Predicate(String),
}

impl QueryParam {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryParam::Columns(_) => "column list",
            QueryParam::Predicate(_) => "predicate",
        }
    }
}

/// What a `select` should return.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The `*` marker: every column the table has when `select` is called.
    All,
    Columns(Vec<String>),
}

impl Projection {
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Projection::Columns(columns.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Projection {
    fn from(columns: Vec<String>) -> Self {
        Projection::Columns(columns)
    }
}

impl From<&[&str]> for Projection {
    fn from(columns: &[&str]) -> Self {
        Projection::columns(columns.iter().copied())
    }
}

/// A named relation of a database.
#[derive(Clone)]
pub struct Table<'db> {
    database: &'db dyn Database,
    name: Rc<str>,
}

impl<'db> Table<'db> {
    /// Fails with `UnknownTable` unless the database currently lists `name`.
    pub fn open(database: &'db dyn Database, name: &str) -> DbResult<Self> {
        let tables = database.list_tables()?;
        if !tables.iter().any(|t| t == name) {
            return Err(DbError::UnknownTable(name.to_string()));
        }
        Ok(Self {
            database,
            name: Rc::from(name),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn database(&self) -> &'db dyn Database {
        self.database
    }

    pub fn columns(&self) -> DbResult<Vec<String>> {
        self.database.list_columns(&self.name)
    }

    /// Start a query pipeline. `Projection::All` is expanded right away, so
    /// later schema changes do not show up in the returned query.
    pub fn select(&self, projection: impl Into<Projection>) -> DbResult<Query<'db>> {
        let columns = match projection.into() {
            Projection::All => self.columns()?,
            Projection::Columns(columns) => columns,
        };
        Ok(Query::from_parts(
            self.clone(),
            QueryOp::Select,
            QueryParam::Columns(columns),
            None,
        ))
    }
}

impl fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table").field("name", &self.name).finish()
    }
}

#[derive(Debug)]
struct QueryNode<'db> {
    table: Table<'db>,
    op: QueryOp,
    param: QueryParam,
    child: Option<Query<'db>>,
}

/// One stage of a query pipeline. Cloning shares the node.
#[derive(Debug, Clone)]
pub struct Query<'db> {
    node: Rc<QueryNode<'db>>,
}

impl<'db> Query<'db> {
    /// Assemble a node without checking the chain invariants.
    ///
    /// `Table::select` and `Query::where_` are the checked way in; this is
    /// for dialect authors and for exercising the resolver's own validation.
    pub fn from_parts(
        table: Table<'db>,
        op: QueryOp,
        param: QueryParam,
        child: Option<Query<'db>>,
    ) -> Self {
        Self {
            node: Rc::new(QueryNode {
                table,
                op,
                param,
                child,
            }),
        }
    }

    pub fn table(&self) -> &Table<'db> {
        &self.node.table
    }

    pub fn op(&self) -> QueryOp {
        self.node.op
    }

    pub fn param(&self) -> &QueryParam {
        &self.node.param
    }

    pub fn child(&self) -> Option<&Query<'db>> {
        self.node.child.as_ref()
    }

    /// The node at the bottom of the chain (the one without a child).
    pub fn base(&self) -> &Query<'db> {
        let mut current = self;
        while let Some(child) = current.child() {
            current = child;
        }
        current
    }

    /// Refine this query with a filter. The predicate is stored as-is; its
    /// syntax is the engine's business.
    pub fn where_(&self, predicate: impl Into<String>) -> DbResult<Query<'db>> {
        let base = self.base();
        if base.op() != QueryOp::Select {
            return Err(DbError::Structural(format!(
                "WHERE must refine a SELECT query, but the chain starts with {}",
                base.op()
            )));
        }
        Ok(Query::from_parts(
            self.table().clone(),
            QueryOp::Where,
            QueryParam::Predicate(predicate.into()),
            Some(self.clone()),
        ))
    }

    /// Render through the owning database's resolver.
    pub fn resolve(&self) -> DbResult<String> {
        self.table().database().resolver().resolve(self)
    }

    /// Column list of the chain's base `Select`, if it has one.
    pub fn projection(&self) -> Option<&[String]> {
        match self.base().param() {
            QueryParam::Columns(columns) => Some(columns),
            QueryParam::Predicate(_) => None,
        }
    }

    /// Whether `other` is this very node rather than an equal copy.
    pub fn shares_node(&self, other: &Query<'_>) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.node) as *const (),
            Rc::as_ptr(&other.node) as *const (),
        )
    }
}
