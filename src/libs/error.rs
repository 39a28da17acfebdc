//! Error types for form and table generation

use thiserror::Error;

/// Errors raised while generating a form or table.
///
/// `Schema`, `Query` and `RowShape` abort the render in flight; no partial
/// view-model is ever returned alongside them.
#[derive(Debug, Error)]
pub enum GenError {
    /// Table or column metadata is unavailable
    #[error("Schema error for table '{table}': {reason}")]
    Schema { table: String, reason: String },

    /// Row or option fetch failed
    #[error("Query error on table '{table}': {reason}")]
    Query { table: String, reason: String },

    /// A fetched row lacks a declared column
    #[error("Row shape error: table '{table}' row is missing column '{column}'")]
    RowShape { table: String, column: String },

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration overlay could not be read
    #[error("Config error: {0}")]
    Config(#[from] std::io::Error),

    /// Configuration overlay could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Markup template failed to render
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl GenError {
    pub(crate) fn schema(table: &str, reason: impl ToString) -> Self {
        Self::Schema {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn query(table: &str, reason: impl ToString) -> Self {
        Self::Query {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn row_shape(table: &str, column: &str) -> Self {
        Self::RowShape {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
