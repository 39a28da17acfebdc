// schema.rs
use serde::Serialize;

/// One column as reported by the database, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub raw_type: String,
    pub comment: String,
}

impl ColumnDescriptor {
    pub fn new(name: &str, raw_type: &str, comment: &str) -> Self {
        Self {
            name: name.to_string(),
            raw_type: raw_type.to_string(),
            comment: comment.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Columns that survive the overlay's disabled set, schema order kept.
    pub fn visible<'a>(
        &'a self,
        overlay: &'a crate::ConfigOverlay,
    ) -> impl Iterator<Item = &'a ColumnDescriptor> + 'a {
        self.columns
            .iter()
            .filter(move |c| !overlay.is_disabled(&c.name))
    }
}
