//! Caller-declared foreign-key bindings for select widgets

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    Single,
    Multi,
}

/// Where a bound column draws its options from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub kind: BindingKind,
    pub source_table: String,
    pub id_column: String,
    pub label_column: String,
}

impl Binding {
    pub fn single(source_table: &str, id_column: &str, label_column: &str) -> Self {
        Self::new(BindingKind::Single, source_table, id_column, label_column)
    }

    pub fn multi(source_table: &str, id_column: &str, label_column: &str) -> Self {
        Self::new(BindingKind::Multi, source_table, id_column, label_column)
    }

    fn new(kind: BindingKind, source_table: &str, id_column: &str, label_column: &str) -> Self {
        Self {
            kind,
            source_table: source_table.to_string(),
            id_column: id_column.to_string(),
            label_column: label_column.to_string(),
        }
    }
}

/// Bindings keyed by target column, plus the columns flagged for
/// client-side select enhancement.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    by_column: HashMap<String, Binding>,
    enhanced: HashSet<String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a binding for `column`.
    ///
    /// A multi-select binding is never displaced by a later single-select one.
    pub fn bind(mut self, column: &str, binding: Binding) -> Self {
        let keep_existing = matches!(
            (self.by_column.get(column), binding.kind),
            (Some(existing), BindingKind::Single) if existing.kind == BindingKind::Multi
        );
        if !keep_existing {
            self.by_column.insert(column.to_string(), binding);
        }
        self
    }

    pub fn single(self, column: &str, source_table: &str, id_column: &str, label_column: &str) -> Self {
        self.bind(column, Binding::single(source_table, id_column, label_column))
    }

    pub fn multi(self, column: &str, source_table: &str, id_column: &str, label_column: &str) -> Self {
        self.bind(column, Binding::multi(source_table, id_column, label_column))
    }

    /// Flag a column's select widget for client-side enhancement.
    pub fn enhance(mut self, column: &str) -> Self {
        self.enhanced.insert(column.to_string());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Binding> {
        self.by_column.get(column)
    }

    pub fn is_enhanced(&self, column: &str) -> bool {
        self.enhanced.contains(column)
    }
}
