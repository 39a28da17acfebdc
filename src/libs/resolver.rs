//! Schema-to-widget resolution
//!
//! A column's widget kind is decided by an ordered rule list evaluated top to
//! bottom; the first rule that matches wins and [`Rule::Fallback`] always
//! matches, so resolution is total.

use crate::libs::bindings::{Binding, BindingKind, Bindings};
use crate::libs::options::OptionSet;
use crate::libs::schema::ColumnDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Text,
    Number,
    MultilineText,
    Date,
    Select,
    Multiselect,
}

impl WidgetKind {
    pub fn is_choice(&self) -> bool {
        matches!(self, WidgetKind::Select | WidgetKind::Multiselect)
    }
}

/// Resolution rules in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    MultiBinding,
    SingleBinding,
    EnumDefinition,
    Numeric,
    LongText,
    Date,
    Fallback,
}

impl Rule {
    pub const ORDER: [Rule; 7] = [
        Rule::MultiBinding,
        Rule::SingleBinding,
        Rule::EnumDefinition,
        Rule::Numeric,
        Rule::LongText,
        Rule::Date,
        Rule::Fallback,
    ];

    /// Apply this rule to a column; `None` means it does not match.
    pub fn apply(&self, column: &ColumnDescriptor, bindings: &Bindings) -> Option<Resolution> {
        let raw = column.raw_type.to_ascii_lowercase();
        match self {
            Rule::MultiBinding => bindings
                .get(&column.name)
                .filter(|b| b.kind == BindingKind::Multi)
                .map(|b| Resolution::bound(WidgetKind::Multiselect, b)),
            Rule::SingleBinding => bindings
                .get(&column.name)
                .filter(|b| b.kind == BindingKind::Single)
                .map(|b| Resolution::bound(WidgetKind::Select, b)),
            Rule::EnumDefinition => match enum_definition(&column.raw_type)? {
                Some(options) => Some(Resolution {
                    kind: WidgetKind::Select,
                    options: OptionRequest::Inline(options),
                }),
                None => {
                    tracing::warn!(
                        column = %column.name,
                        raw_type = %column.raw_type,
                        "malformed enum definition, falling back to text"
                    );
                    Some(Resolution::plain(WidgetKind::Text))
                }
            },
            Rule::Numeric => ["int", "double", "float", "decimal"]
                .iter()
                .any(|t| raw.contains(t))
                .then(|| Resolution::plain(WidgetKind::Number)),
            Rule::LongText => raw
                .contains("text")
                .then(|| Resolution::plain(WidgetKind::MultilineText)),
            Rule::Date => raw
                .contains("date")
                .then(|| Resolution::plain(WidgetKind::Date)),
            Rule::Fallback => Some(Resolution::plain(WidgetKind::Text)),
        }
    }
}

/// Where a select widget's options come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionRequest {
    None,
    /// Options parsed from the column's enum definition.
    Inline(OptionSet),
    /// Options to fetch from a bound table.
    Fetch(Binding),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: WidgetKind,
    pub options: OptionRequest,
}

impl Resolution {
    fn plain(kind: WidgetKind) -> Self {
        Self {
            kind,
            options: OptionRequest::None,
        }
    }

    fn bound(kind: WidgetKind, binding: &Binding) -> Self {
        Self {
            kind,
            options: OptionRequest::Fetch(binding.clone()),
        }
    }
}

/// Resolve a column's widget kind and option source.
pub fn resolve(column: &ColumnDescriptor, bindings: &Bindings) -> Resolution {
    Rule::ORDER
        .iter()
        .find_map(|rule| rule.apply(column, bindings))
        .unwrap_or_else(|| Resolution::plain(WidgetKind::Text))
}

/// Parse an `enum(...)` type definition.
///
/// Returns `None` when the type is not an enum at all, `Some(None)` when it
/// is one but its literal list cannot be parsed, and `Some(Some(options))`
/// with key and label both set to each literal, in declared order.
pub fn enum_definition(raw_type: &str) -> Option<Option<OptionSet>> {
    let trimmed = raw_type.trim_start();
    let is_enum = trimmed
        .get(..5)
        .is_some_and(|p| p.eq_ignore_ascii_case("enum("));
    if !is_enum {
        return None;
    }
    let inner = trimmed[5..].trim_end();
    let parsed = inner
        .strip_suffix(')')
        .and_then(parse_literals)
        .map(|literals| OptionSet::from_pairs(literals.into_iter().map(|l| (l.clone(), l))));
    Some(parsed)
}

/// Split a comma separated list of quoted (or bare) literals.
fn parse_literals(list: &str) -> Option<Vec<String>> {
    let mut literals = Vec::new();
    let mut chars = list.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let literal = match chars.peek().copied() {
            Some(q @ ('\'' | '"')) => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next()? {
                        '\\' => value.push(chars.next()?),
                        c if c == q => {
                            if chars.next_if_eq(&q).is_some() {
                                value.push(q);
                            } else {
                                break;
                            }
                        }
                        c => value.push(c),
                    }
                }
                value
            }
            _ => {
                let mut value = String::new();
                while let Some(c) = chars.next_if(|c| *c != ',') {
                    if c == '\'' || c == '"' {
                        return None;
                    }
                    value.push(c);
                }
                let value = value.trim().to_string();
                if value.is_empty() {
                    return None;
                }
                value
            }
        };
        literals.push(literal);
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => return Some(literals),
            Some(',') => continue,
            Some(_) => return None,
        }
    }
}
