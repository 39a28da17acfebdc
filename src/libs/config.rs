//! Configuration overlay applied on top of schema-derived defaults

use crate::libs::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Overrides for visibility, editability and display text.
///
/// Loaded once and shared read-only (typically as `Arc<ConfigOverlay>`)
/// across every renderer. Missing keys are never errors.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub disabled_fields: HashSet<String>,
    #[serde(default)]
    pub readonly_fields: HashSet<String>,
    #[serde(default, rename = "table_header_names")]
    pub header_names: HashMap<String, String>,
    #[serde(default)]
    pub form_labels: HashMap<String, String>,
    #[serde(default, rename = "field_placeholders")]
    pub placeholders: HashMap<String, String>,
}

impl ConfigOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an overlay from a JSON document.
    ///
    /// ```
    /// let overlay = formgen::ConfigOverlay::from_json_str(r#"{"disabled_fields": ["id"]}"#)?;
    /// assert!(overlay.is_disabled("id"));
    /// # Ok::<(), formgen::GenError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse an overlay file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn with_disabled(mut self, column: &str) -> Self {
        self.disabled_fields.insert(column.to_string());
        self
    }

    pub fn with_readonly(mut self, column: &str) -> Self {
        self.readonly_fields.insert(column.to_string());
        self
    }

    pub fn with_header(mut self, column: &str, header: &str) -> Self {
        self.header_names
            .insert(column.to_string(), header.to_string());
        self
    }

    pub fn with_label(mut self, column: &str, label: &str) -> Self {
        self.form_labels.insert(column.to_string(), label.to_string());
        self
    }

    pub fn with_placeholder(mut self, column: &str, placeholder: &str) -> Self {
        self.placeholders
            .insert(column.to_string(), placeholder.to_string());
        self
    }

    /// Form label for a column, falling back to the humanized name.
    pub fn label(&self, column: &str) -> String {
        self.form_labels
            .get(column)
            .cloned()
            .unwrap_or_else(|| humanize(column))
    }

    /// Table header for a column, falling back to the humanized name.
    pub fn header(&self, column: &str) -> String {
        self.header_names
            .get(column)
            .cloned()
            .unwrap_or_else(|| humanize(column))
    }

    pub fn placeholder(&self, column: &str) -> String {
        self.placeholders.get(column).cloned().unwrap_or_default()
    }

    pub fn is_disabled(&self, column: &str) -> bool {
        self.disabled_fields.contains(column)
    }

    pub fn is_readonly(&self, column: &str) -> bool {
        self.readonly_fields.contains(column)
    }
}

/// `user_id` -> `User id`
pub fn humanize(column: &str) -> String {
    let spaced = column.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
