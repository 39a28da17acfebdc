#![allow(dead_code)]

use async_trait::async_trait;
use formgen::{Binding, ColumnDescriptor, ConfigOverlay, DataSource, Dialect, GenError, RowMap};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory data source with canned schemas, option tables and rows.
#[derive(Default)]
pub struct MemorySource {
    pub schemas: HashMap<String, Vec<ColumnDescriptor>>,
    pub options: HashMap<String, Vec<(String, String)>>,
    pub rows: HashMap<String, Vec<RowMap>>,
    /// Tables whose row fetch fails as a broken query would.
    pub failing_rows: HashSet<String>,
    pub option_fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, name: &str, columns: &[(&str, &str)]) -> Self {
        self.schemas.insert(
            name.to_string(),
            columns
                .iter()
                .map(|(n, t)| ColumnDescriptor::new(n, t, ""))
                .collect(),
        );
        self
    }

    /// Options of a bound table, given unsorted; sorted by label on fetch.
    pub fn option_table(mut self, name: &str, pairs: &[(&str, &str)]) -> Self {
        self.options.insert(
            name.to_string(),
            pairs
                .iter()
                .map(|(k, l)| (k.to_string(), l.to_string()))
                .collect(),
        );
        self
    }

    pub fn row(mut self, table: &str, row: Value) -> Self {
        let map = match row {
            Value::Object(map) => map,
            other => panic!("row must be an object, got {other}"),
        };
        self.rows.entry(table.to_string()).or_default().push(map);
        self
    }

    pub fn fail_rows(mut self, table: &str) -> Self {
        self.failing_rows.insert(table.to_string());
        self
    }

    pub fn shared(self) -> Arc<dyn DataSource> {
        Arc::new(self)
    }
}

#[async_trait]
impl DataSource for MemorySource {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, GenError> {
        Ok(self.schemas.get(table).cloned().unwrap_or_default())
    }

    async fn fetch_options(&self, binding: &Binding) -> Result<Vec<(String, String)>, GenError> {
        self.option_fetches.fetch_add(1, Ordering::SeqCst);
        let mut pairs = self
            .options
            .get(&binding.source_table)
            .cloned()
            .ok_or_else(|| GenError::Query {
                table: binding.source_table.clone(),
                reason: "no such table".to_string(),
            })?;
        pairs.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(pairs)
    }

    async fn fetch_rows(
        &self,
        table: &str,
        _columns: &[ColumnDescriptor],
    ) -> Result<Vec<RowMap>, GenError> {
        if self.failing_rows.contains(table) {
            return Err(GenError::Query {
                table: table.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        Ok(self.rows.get(table).cloned().unwrap_or_default())
    }
}

pub fn overlay() -> Arc<ConfigOverlay> {
    Arc::new(
        ConfigOverlay::from_json_str(
            r#"{
                "disabled_fields": ["id", "created_at", "updated_at", "deleted_at"],
                "readonly_fields": ["is_verified", "status"],
                "table_header_names": {"user_id": "User", "email": "Email Address"},
                "form_labels": {"name": "Full Name", "email": "Email Address"},
                "field_placeholders": {"email": "Enter your email..."}
            }"#,
        )
        .expect("valid overlay"),
    )
}
