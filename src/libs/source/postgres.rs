use super::{DataSource, RowMap, option_pair, options_sql, rows_sql, text_row};
use crate::libs::bindings::Binding;
use crate::libs::error::{GenError, Result};
use crate::libs::query_builder::Dialect;
use crate::libs::schema::ColumnDescriptor;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Row, query};

const DESCRIBE_SQL: &str = "
    SELECT c.column_name::text AS field,
           c.data_type::text AS data_type,
           c.udt_schema::text AS udt_schema,
           c.udt_name::text AS udt_name,
           c.character_maximum_length::int4 AS max_length,
           COALESCE(col_description(
               (quote_ident(c.table_schema) || '.' || quote_ident(c.table_name))::regclass,
               c.ordinal_position::int
           ), '') AS comment
    FROM information_schema.columns c
    WHERE c.table_schema = current_schema()
      AND c.table_name = $1
    ORDER BY c.ordinal_position";

const ENUM_LABELS_SQL: &str = "
    SELECT e.enumlabel::text AS label
    FROM pg_enum e
    JOIN pg_type t ON t.oid = e.enumtypid
    JOIN pg_namespace n ON n.oid = t.typnamespace
    WHERE n.nspname = $1
      AND t.typname = $2
    ORDER BY e.enumsortorder";

struct DescribedColumn {
    name: String,
    data_type: String,
    udt_schema: String,
    udt_name: String,
    max_length: Option<i32>,
    comment: String,
}

impl DescribedColumn {
    fn from_row(r: &PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            name: r.try_get("field")?,
            data_type: r.try_get("data_type")?,
            udt_schema: r.try_get("udt_schema")?,
            udt_name: r.try_get("udt_name")?,
            max_length: r.try_get("max_length")?,
            comment: r.try_get("comment")?,
        })
    }
}

/// PostgreSQL source. User-defined enum columns are reported as
/// `enum('a','b',...)` so they resolve to select widgets like MySQL enums.
#[derive(Clone)]
pub struct PgSource {
    pool: PgPool,
}

impl PgSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| GenError::Connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Labels of the enum type `udt_schema.udt_name`, as an `enum(...)` type string.
    async fn enum_type(
        &self,
        udt_schema: &str,
        udt_name: &str,
    ) -> std::result::Result<Option<String>, sqlx::Error> {
        let labels: Vec<String> = query(ENUM_LABELS_SQL)
            .bind(udt_schema)
            .bind(udt_name)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(|r| r.try_get("label"))
            .collect::<std::result::Result<_, _>>()?;
        Ok(enum_literal(&labels))
    }
}

fn enum_literal(labels: &[String]) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    let literals: Vec<String> = labels
        .iter()
        .map(|l| format!("'{}'", l.replace('\\', "\\\\").replace('\'', "''")))
        .collect();
    Some(format!("enum({})", literals.join(",")))
}

#[async_trait]
impl DataSource for PgSource {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = query(DESCRIBE_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenError::schema(table, e))?;

        let mut columns = Vec::with_capacity(rows.len());
        for r in rows {
            let DescribedColumn {
                name,
                data_type,
                udt_schema,
                udt_name,
                max_length,
                comment,
            } = DescribedColumn::from_row(&r).map_err(|e| GenError::schema(table, e))?;

            let raw_type = if data_type == "USER-DEFINED" {
                self.enum_type(&udt_schema, &udt_name)
                    .await
                    .map_err(|e| GenError::schema(table, e))?
                    .unwrap_or(udt_name)
            } else if let Some(len) = max_length {
                format!("{}({})", data_type, len)
            } else {
                data_type
            };
            columns.push(ColumnDescriptor {
                name,
                raw_type,
                comment,
            });
        }
        Ok(columns)
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
