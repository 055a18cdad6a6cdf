use std::fmt;

use thiserror::Error;

/// Broad classes of failure, used to title errors in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Engine or connection failure, malformed SQL, constraint violation
    Storage,
    /// A query chain that violates its own invariants
    Structural,
    /// Wrong parameter shape handed to a resolver operation
    Type,
    /// SQL text the projection extractor cannot read
    Parse,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Storage => write!(f, "Storage Error"),
            ErrorCategory::Structural => write!(f, "Query Structure Error"),
            ErrorCategory::Type => write!(f, "Parameter Error"),
            ErrorCategory::Parse => write!(f, "Parse Error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    /// Message text comes straight from SQLite.
    #[error("{0}")]
    Storage(String),

    #[error("table '{0}' does not exist")]
    UnknownTable(String),

    #[error("malformed query: {0}")]
    Structural(String),

    #[error("invalid query parameter: {0}")]
    Type(String),

    #[error("{0}")]
    Parse(String),
}

impl DbError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DbError::Storage(_) | DbError::UnknownTable(_) => ErrorCategory::Storage,
            DbError::Structural(_) => ErrorCategory::Structural,
            DbError::Type(_) => ErrorCategory::Type,
            DbError::Parse(_) => ErrorCategory::Parse,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        DbError::Storage(err.to_string())
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;
