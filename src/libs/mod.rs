pub mod bindings;
pub mod config;
pub mod error;
pub mod escape;
pub mod form;
pub mod introspect;
pub mod markup;
pub mod options;
pub mod prior;
pub mod query_builder;
pub mod resolver;
pub mod schema;
pub mod source;
pub mod table;

// Re-export them for easier access from callers
pub use bindings::*;
pub use config::*;
pub use error::*;
pub use escape::*;
pub use form::*;
pub use introspect::*;
pub use options::*;
pub use prior::*;
pub use query_builder::*;
pub use resolver::*;
pub use schema::*;
pub use source::{DataSource, MySqlSource, PgSource, RowMap, SqliteSource, connect};
pub use table::*;
