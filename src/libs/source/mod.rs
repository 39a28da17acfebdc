//! Data source seam: schema introspection, option reads and row reads

pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use mysql::MySqlSource;
pub use postgres::PgSource;
pub use sqlite::SqliteSource;

use crate::libs::bindings::Binding;
use crate::libs::error::{GenError, Result};
use crate::libs::query_builder::{Dialect, Direction, QueryBuilder};
use crate::libs::schema::ColumnDescriptor;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{Column, ColumnIndex, Decode, Row, Type};
use std::sync::Arc;

/// One fetched row: column name to textual value, `Value::Null` for SQL `NULL`.
pub type RowMap = Map<String, Value>;

/// Alias the option queries select id and label under.
pub(crate) const OPTION_KEY: &str = "option_key";
pub(crate) const OPTION_LABEL: &str = "option_label";

/// Read-only access to a relational database.
///
/// Table and column identifiers are trusted; callers allow-list them before
/// they reach a source.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Columns of `table` in declared order. Empty when the table does not exist.
    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// `(key, label)` pairs of the bound table, ascending by label.
    async fn fetch_options(&self, binding: &Binding) -> Result<Vec<(String, String)>>;

    /// Every row of `table`, each declared column cast to text.
    async fn fetch_rows(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<Vec<RowMap>>;
}

/// Open a pool for `url`, choosing the backend from its scheme.
pub async fn connect(url: &str, max_connections: u32) -> Result<Arc<dyn DataSource>> {
    let dialect = dialect_from_url(url)?;
    tracing::info!(
        "Connecting to {} database with max {} connections",
        dialect.name(),
        max_connections
    );
    let source: Arc<dyn DataSource> = match dialect {
        Dialect::MySql => Arc::new(MySqlSource::connect(url, max_connections).await?),
        Dialect::Postgres => Arc::new(PgSource::connect(url, max_connections).await?),
        Dialect::Sqlite => Arc::new(SqliteSource::connect(url, max_connections).await?),
    };
    Ok(source)
}

pub fn dialect_from_url(url: &str) -> Result<Dialect> {
    if url.starts_with("sqlite:") {
        Ok(Dialect::Sqlite)
    } else if url.starts_with("postgres:") || url.starts_with("postgresql:") {
        Ok(Dialect::Postgres)
    } else if url.starts_with("mysql:") || url.starts_with("mariadb:") {
        Ok(Dialect::MySql)
    } else {
        Err(GenError::Connection(format!(
            "Unsupported database URL. Expected sqlite:, postgres: or mysql:. Got: {}",
            url.split(':').next().unwrap_or("unknown")
        )))
    }
}

pub(crate) fn options_sql(dialect: Dialect, binding: &Binding) -> String {
    QueryBuilder::new(dialect, &binding.source_table)
        .select_text(&binding.id_column, OPTION_KEY)
        .select_text(&binding.label_column, OPTION_LABEL)
        .order_by(&binding.label_column, Direction::Asc)
        .build_sql()
}

pub(crate) fn rows_sql(dialect: Dialect, table: &str, columns: &[ColumnDescriptor]) -> String {
    columns
        .iter()
        .fold(QueryBuilder::new(dialect, table), |q, c| {
            q.select_text(&c.name, &c.name)
        })
        .build_sql()
}

/// Decode a row whose columns were all cast to text.
pub(crate) fn text_row<R>(row: &R) -> std::result::Result<RowMap, sqlx::Error>
where
    R: Row,
    usize: ColumnIndex<R>,
    String: Type<R::Database> + for<'r> Decode<'r, R::Database>,
{
    let mut map = Map::new();
    for (i, col) in row.columns().iter().enumerate() {
        let value: Option<String> = row.try_get(i)?;
        map.insert(
            col.name().to_string(),
            value.map(Value::String).unwrap_or(Value::Null),
        );
    }
    Ok(map)
}

/// Decode an `(option_key, option_label)` row; a `NULL` label reads as empty.
pub(crate) fn option_pair<R>(row: &R) -> std::result::Result<(String, String), sqlx::Error>
where
    R: Row,
    for<'a> &'a str: ColumnIndex<R>,
    String: Type<R::Database> + for<'r> Decode<'r, R::Database>,
{
    let key: Option<String> = row.try_get(OPTION_KEY)?;
    let label: Option<String> = row.try_get(OPTION_LABEL)?;
    Ok((key.unwrap_or_default(), label.unwrap_or_default()))
}
