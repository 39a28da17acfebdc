//! Prior values used to re-hydrate a form

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Raw (unescaped) prior values keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorValues(HashMap<String, String>);

impl PriorValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.0.insert(column.to_string(), value.to_string());
        self
    }

    /// Build from a JSON object such as a fetched row or a decoded submission.
    ///
    /// Arrays (multi-select submissions) are joined with `,`; `null` values
    /// are skipped.
    pub fn from_json(object: &Map<String, Value>) -> Self {
        let values = object
            .iter()
            .filter_map(|(column, value)| Some((column.clone(), flatten(value)?)))
            .collect();
        Self(values)
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for PriorValues {
    fn from(values: HashMap<String, String>) -> Self {
        Self(values)
    }
}

fn flatten(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(flatten)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
