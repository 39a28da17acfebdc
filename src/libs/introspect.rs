use crate::libs::error::{GenError, Result};
use crate::libs::schema::TableSchema;
use crate::libs::source::DataSource;

/// Reads a table's column descriptors through a [`DataSource`].
pub struct SchemaIntrospector<'a> {
    source: &'a dyn DataSource,
}

impl<'a> SchemaIntrospector<'a> {
    pub fn new(source: &'a dyn DataSource) -> Self {
        Self { source }
    }

    /// Columns of `table` in declared order.
    ///
    /// A table with no columns does not exist; that and any metadata query
    /// failure are reported as [`GenError::Schema`].
    pub async fn describe_columns(&self, table: &str) -> Result<TableSchema> {
        let columns = self.source.describe_columns(table).await?;
        if columns.is_empty() {
            return Err(GenError::schema(table, "table does not exist"));
        }
        tracing::debug!(
            table,
            dialect = self.source.dialect().name(),
            columns = columns.len(),
            "described table"
        );
        Ok(TableSchema {
            name: table.to_string(),
            columns,
        })
    }
}
