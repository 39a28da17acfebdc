//! Editable table view-model generation

use crate::libs::config::ConfigOverlay;
use crate::libs::error::{GenError, Result};
use crate::libs::escape::Html;
use crate::libs::introspect::SchemaIntrospector;
use crate::libs::source::{DataSource, RowMap};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub value: Html,
    pub readonly: bool,
}

/// Per-row data consumed by the verify workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub row_id: Html,
    pub table: Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub action: RowAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableViewModel {
    pub table: Html,
    pub headers: Vec<Html>,
    pub rows: Vec<TableRow>,
}

/// Builds table view-models listing every row of a table.
pub struct TableRenderer {
    source: Arc<dyn DataSource>,
    overlay: Arc<ConfigOverlay>,
    key_column: String,
}

impl TableRenderer {
    pub fn new(source: Arc<dyn DataSource>, overlay: Arc<ConfigOverlay>) -> Self {
        Self {
            source,
            overlay,
            key_column: "id".to_string(),
        }
    }

    /// Take the row identifier from `column` instead of `id`.
    pub fn with_key(mut self, column: &str) -> Self {
        self.key_column = column.to_string();
        self
    }

    /// Render every row of `table`. No pagination and no filtering.
    pub async fn render(&self, table: &str) -> Result<TableViewModel> {
        let schema = SchemaIntrospector::new(self.source.as_ref())
            .describe_columns(table)
            .await?;
        let rows = self.source.fetch_rows(table, &schema.columns).await?;
        tracing::debug!(table, rows = rows.len(), "fetched rows");

        let visible: Vec<_> = schema.visible(&self.overlay).collect();
        let headers = visible
            .iter()
            .map(|c| Html::escape(&self.overlay.header(&c.name)))
            .collect();

        let rows = rows
            .iter()
            .map(|row| -> Result<TableRow> {
                let cells = visible
                    .iter()
                    .map(|c| -> Result<TableCell> {
                        Ok(TableCell {
                            value: Html::escape(&cell_text(row, table, &c.name)?),
                            readonly: self.overlay.is_readonly(&c.name),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(TableRow {
                    cells,
                    action: RowAction {
                        row_id: Html::escape(&cell_text(row, table, &self.key_column)?),
                        table: Html::escape(table),
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TableViewModel {
            table: Html::escape(table),
            headers,
            rows,
        })
    }
}

/// Textual value of `column`; `NULL` reads as empty, a missing key is an error.
fn cell_text(row: &RowMap, table: &str, column: &str) -> Result<String> {
    match row.get(column) {
        None => Err(GenError::row_shape(table, column)),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}
