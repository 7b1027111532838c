//! # Address Records and Output Rows
//!
//! An [`AddressRecord`] is one row of the wide input table: an ordered list of
//! columns, each with an optional value. A [`TokenRow`] is one row of the long
//! output table.
//!
//! ## Column provenance
//!
//! Reshaping tools disambiguate duplicate column names with numeric suffixes
//! (`toponym`, `toponym.1`, `toponym.2`). [`FieldName`] parses that suffix once
//! when the record is built, so later stages compare canonical names directly.

use serde::{Deserialize, Serialize};

/// A column name split into its canonical part and occurrence suffix.
///
/// `"toponym.2"` → canonical `"toponym"`, occurrence `2`.
/// `"toponym"` → canonical `"toponym"`, occurrence `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct FieldName {
    raw: String,
    canonical: String,
    occurrence: usize,
}

impl FieldName {
    pub fn parse(raw: &str) -> Self {
        let (canonical, occurrence) = match raw.split_once('.') {
            Some((prefix, suffix)) => (prefix, suffix.parse().unwrap_or(0)),
            None => (raw, 0),
        };
        Self {
            raw: raw.to_string(),
            canonical: canonical.to_string(),
            occurrence,
        }
    }

    /// Column name exactly as it appeared in the input
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Part before the first dot
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn occurrence(&self) -> usize {
        self.occurrence
    }

    /// ASCII case-insensitive comparison of the canonical name.
    pub fn is(&self, name: &str) -> bool {
        self.canonical.eq_ignore_ascii_case(name)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.raw
    }
}

impl From<String> for FieldName {
    fn from(raw: String) -> Self {
        FieldName::parse(&raw)
    }
}

/// One cell of an input record. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(FieldName, Option<String>)", from = "(FieldName, Option<String>)")]
pub struct Field {
    pub name: FieldName,
    pub value: Option<String>,
}

impl Field {
    pub fn new(name: &str, value: Option<&str>) -> Self {
        Self {
            name: FieldName::parse(name),
            value: value.map(str::to_string),
        }
    }

    /// The value, if present and not blank
    pub fn present_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

impl From<Field> for (FieldName, Option<String>) {
    fn from(field: Field) -> Self {
        (field.name, field.value)
    }
}

impl From<(FieldName, Option<String>)> for Field {
    fn from((name, value): (FieldName, Option<String>)) -> Self {
        Self { name, value }
    }
}

/// One input row of the wide table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Ordinal of the row in the source table; join key of the output rows.
    pub old_index: usize,
    /// Columns in their current order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl AddressRecord {
    pub fn new(old_index: usize) -> Self {
        Self {
            old_index,
            fields: Vec::new(),
        }
    }

    /// Builder-style column append.
    pub fn with_field(mut self, name: &str, value: Option<&str>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: &str, value: Option<&str>) {
        self.fields.push(Field::new(name, value));
    }

    /// Value of the column with this exact raw name.
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.raw() == raw)
            .and_then(|f| f.value.as_deref())
    }

    /// First non-blank value among columns whose canonical name is `name`.
    pub fn first_canonical(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .filter(|f| f.name.is(name))
            .find_map(Field::present_value)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.raw().to_string()).collect()
    }
}

/// One row of the long output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRow {
    /// Internal join key, may be dropped before external persistence.
    pub old_index: usize,
    /// Identifier of the source record.
    #[serde(rename = "AA")]
    pub aa: String,
    pub target: String,
    pub text: String,
    /// Position in the source address; 0 for administrative rows.
    pub line_number: usize,
    /// Largest line number of the record; 0 on administrative rows.
    pub total_lines: usize,
}

impl TokenRow {
    pub fn new(old_index: usize, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            old_index,
            aa: String::new(),
            target: target.into(),
            text: text.into(),
            line_number: 0,
            total_lines: 0,
        }
    }

    /// Canonical part of the target (before the first dot).
    pub fn canonical_target(&self) -> &str {
        self.target.split('.').next().unwrap_or(&self.target)
    }
}
