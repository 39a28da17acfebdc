use super::{DataSource, RowMap, option_pair, options_sql, rows_sql, text_row};
use crate::libs::bindings::Binding;
use crate::libs::error::{GenError, Result};
use crate::libs::query_builder::Dialect;
use crate::libs::schema::ColumnDescriptor;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{Row, query};

// SQLite keeps no column comments.
const DESCRIBE_SQL: &str = "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid";

#[derive(Clone)]
pub struct SqliteSource {
    pool: SqlitePool,
}

impl SqliteSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| GenError::Connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DataSource for SqliteSource {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = query(DESCRIBE_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::schema(table, e))?;

        rows.iter()
            .map(|r| -> std::result::Result<ColumnDescriptor, sqlx::Error> {
                Ok(ColumnDescriptor {
                    name: r.try_get("name")?,
                    raw_type: r.try_get::<Option<String>, _>("type")?.unwrap_or_default(),
                    comment: String::new(),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GenError::schema(table, e))
    }

    async fn fetch_options(&self, binding: &Binding) -> Result<Vec<(String, String)>> {
        let sql = options_sql(self.dialect(), binding);
        let rows = query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::query(&binding.source_table, e))?;
        rows.iter()
            .map(option_pair)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GenError::query(&binding.source_table, e))
    }

    async fn fetch_rows(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<Vec<RowMap>> {
        let sql = rows_sql(self.dialect(), table, columns);
        let rows = query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::query(table, e))?;
        rows.iter()
            .map(text_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GenError::query(table, e))
    }
}
