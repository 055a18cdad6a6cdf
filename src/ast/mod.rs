/// Query model and SQL resolution for litelens.
///
/// ```text
/// Table ──select──▶ Query(SELECT) ──where_──▶ Query(WHERE) ─┐
///                                                          │
///                  Resolver (per dialect)  ◀──resolve──────┘
///                          │
///                          ▼
///                      SQL text ──▶ Database::fetch
/// ```
///
/// Hand-edited SQL skips the model entirely; `projection` recovers its
/// column labels.
pub mod projection;
pub mod resolver;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use projection::extract_columns;
pub use resolver::{AnsiResolver, Dialect, Resolver, SqliteResolver};
pub use types::*;
