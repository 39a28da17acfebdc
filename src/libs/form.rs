//! Form view-model generation

use crate::libs::bindings::Bindings;
use crate::libs::config::ConfigOverlay;
use crate::libs::error::Result;
use crate::libs::escape::Html;
use crate::libs::introspect::SchemaIntrospector;
use crate::libs::options::{OptionSet, OptionsProvider};
use crate::libs::prior::PriorValues;
use crate::libs::resolver::{OptionRequest, WidgetKind, resolve};
use crate::libs::schema::ColumnDescriptor;
use crate::libs::source::DataSource;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Grid columns available to a form row.
pub const GRID_COLUMNS: usize = 12;

/// The widget chosen for one visible column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetSpec {
    #[serde(skip)]
    pub column_name: String,
    pub kind: WidgetKind,
    pub label: Html,
    pub placeholder: Html,
    pub readonly: bool,
    #[serde(skip)]
    pub options: Option<OptionSet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    /// Key as stored, which is what a browser submits back.
    #[serde(skip)]
    pub raw_key: String,
    pub key: Html,
    pub label: Html,
    pub selected: bool,
}

/// A widget's current value, shaped by its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Text(Html),
    Options(Vec<OptionEntry>),
}

impl FieldValue {
    /// Raw keys of the selected entries, as a form submission carries them.
    pub fn selected_keys(&self) -> Vec<&str> {
        match self {
            FieldValue::Text(_) => vec![],
            FieldValue::Options(entries) => entries
                .iter()
                .filter(|e| e.selected)
                .map(|e| e.raw_key.as_str())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub spec: WidgetSpec,
    /// Escaped column name for `name`/`id` attributes.
    pub name: Html,
    pub width: usize,
    pub enhanced: bool,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormViewModel {
    pub table: Html,
    pub column_count: usize,
    pub column_width: usize,
    pub fields: Vec<FormField>,
}

impl FormViewModel {
    pub fn field(&self, column: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.spec.column_name == column)
    }
}

/// Clamp a requested column count into `1..=12`.
pub fn clamp_columns(requested: usize) -> usize {
    requested.clamp(1, GRID_COLUMNS)
}

/// Builds form view-models for a table.
pub struct FormRenderer {
    source: Arc<dyn DataSource>,
    overlay: Arc<ConfigOverlay>,
    bindings: Bindings,
}

impl FormRenderer {
    pub fn new(source: Arc<dyn DataSource>, overlay: Arc<ConfigOverlay>) -> Self {
        Self {
            source,
            overlay,
            bindings: Bindings::new(),
        }
    }

    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Render a form for `table` with `column_count` widgets per row,
    /// hydrated from `prior`.
    ///
    /// Fails without a partial result when the schema or any bound option
    /// set cannot be read.
    pub async fn render(
        &self,
        table: &str,
        column_count: usize,
        prior: &PriorValues,
    ) -> Result<FormViewModel> {
        let schema = SchemaIntrospector::new(self.source.as_ref())
            .describe_columns(table)
            .await?;
        let column_count = clamp_columns(column_count);
        let column_width = GRID_COLUMNS / column_count;

        let mut fields = Vec::with_capacity(schema.columns.len());
        for column in schema.visible(&self.overlay) {
            let spec = self.widget_spec(column).await?;
            let value = hydrate(&spec, prior.get(&column.name));
            tracing::debug!(table, column = %column.name, kind = ?spec.kind, "resolved widget");
            fields.push(FormField {
                name: Html::escape(&column.name),
                width: column_width,
                enhanced: spec.kind.is_choice() && self.bindings.is_enhanced(&column.name),
                value,
                spec,
            });
        }

        Ok(FormViewModel {
            table: Html::escape(table),
            column_count,
            column_width,
            fields,
        })
    }

    async fn widget_spec(&self, column: &ColumnDescriptor) -> Result<WidgetSpec> {
        let resolution = resolve(column, &self.bindings);
        let options = match resolution.options {
            OptionRequest::None => None,
            OptionRequest::Inline(set) => Some(set),
            OptionRequest::Fetch(binding) => Some(
                OptionsProvider::new(self.source.as_ref())
                    .fetch_options(&binding)
                    .await?,
            ),
        };
        Ok(WidgetSpec {
            column_name: column.name.clone(),
            kind: resolution.kind,
            label: Html::escape(&self.overlay.label(&column.name)),
            placeholder: Html::escape(&self.overlay.placeholder(&column.name)),
            readonly: self.overlay.is_readonly(&column.name),
            options,
        })
    }
}

/// Fill a widget with its prior raw value.
///
/// Comparisons use the raw value; only the embedded result is escaped.
/// Submitted keys are not checked against the option set: a key with no
/// matching option simply selects nothing.
pub fn hydrate(spec: &WidgetSpec, prior: Option<&str>) -> FieldValue {
    let empty = OptionSet::default();
    let options = spec.options.as_ref().unwrap_or(&empty);
    match spec.kind {
        WidgetKind::Multiselect => {
            let selected: HashSet<&str> = prior
                .map(|raw| raw.split(',').map(str::trim).collect())
                .unwrap_or_default();
            FieldValue::Options(
                options
                    .iter()
                    .map(|o| entry(&o.key, &o.label, selected.contains(o.key.as_str())))
                    .collect(),
            )
        }
        WidgetKind::Select => {
            let mut matched = false;
            FieldValue::Options(
                options
                    .iter()
                    .map(|o| {
                        let selected = !matched && prior == Some(o.key.as_str());
                        matched |= selected;
                        entry(&o.key, &o.label, selected)
                    })
                    .collect(),
            )
        }
        WidgetKind::Text | WidgetKind::Number | WidgetKind::MultilineText | WidgetKind::Date => {
            FieldValue::Text(Html::escape(prior.unwrap_or_default()))
        }
    }
}

fn entry(key: &str, label: &str, selected: bool) -> OptionEntry {
    OptionEntry {
        raw_key: key.to_string(),
        key: Html::escape(key),
        label: Html::escape(label),
        selected,
    }
}
