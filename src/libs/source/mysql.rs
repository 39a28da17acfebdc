use super::{DataSource, RowMap, option_pair, options_sql, rows_sql, text_row};
use crate::libs::bindings::Binding;
use crate::libs::error::{GenError, Result};
use crate::libs::query_builder::Dialect;
use crate::libs::schema::ColumnDescriptor;
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::{Row, query};

const DESCRIBE_SQL: &str = "
    SELECT CAST(COLUMN_NAME AS CHAR) AS field,
           CAST(COLUMN_TYPE AS CHAR) AS column_type,
           CAST(COLUMN_COMMENT AS CHAR) AS comment
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE()
      AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION";

/// MySQL / MariaDB source; `COLUMN_TYPE` gives the full type including
/// `enum(...)` literal lists.
#[derive(Clone)]
pub struct MySqlSource {
    pool: MySqlPool,
}

impl MySqlSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| GenError::Connection(e.to_string()))?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DataSource for MySqlSource {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = query(DESCRIBE_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::schema(table, e))?;

        rows.iter()
            .map(|r| -> std::result::Result<ColumnDescriptor, sqlx::Error> {
                let name: String = r.try_get("field")?;
                let raw_type: Option<String> = r.try_get("column_type")?;
                let comment: Option<String> = r.try_get("comment")?;
                Ok(ColumnDescriptor {
                    name,
                    raw_type: raw_type.unwrap_or_default(),
                    comment: comment.unwrap_or_default(),
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()
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
