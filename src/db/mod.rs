mod connection;
mod database;
mod error;
mod query;
mod schema;

pub use connection::*;
pub use database::*;
pub use error::*;
pub use query::*;
pub use schema::*;
