//! Option sets for select widgets

use crate::libs::bindings::Binding;
use crate::libs::error::Result;
use crate::libs::source::DataSource;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub key: String,
    pub label: String,
}

/// Ordered `(key, label)` pairs; order is kept exactly as produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionSet(Vec<SelectOption>);

impl OptionSet {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, label)| SelectOption { key, label })
                .collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|o| o.key.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Fetches option sets for bound columns. Nothing is cached: every call
/// reads the bound table again.
pub struct OptionsProvider<'a> {
    source: &'a dyn DataSource,
}

impl<'a> OptionsProvider<'a> {
    pub fn new(source: &'a dyn DataSource) -> Self {
        Self { source }
    }

    pub async fn fetch_options(&self, binding: &Binding) -> Result<OptionSet> {
        let pairs = self.source.fetch_options(binding).await?;
        tracing::debug!(
            table = %binding.source_table,
            id = %binding.id_column,
            label = %binding.label_column,
            count = pairs.len(),
            "fetched options"
        );
        Ok(OptionSet::from_pairs(pairs))
    }
}
