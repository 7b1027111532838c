//! # Pipeline Configuration
//!
//! Column names and fixed lists that drive the pipeline. The defaults reproduce
//! the layout of the address spreadsheets the pipeline was built for; any field
//! can be overridden from JSON:
//!
//! ```json
//! { "columns_to_drop": ["source"], "address_column": "full_address" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Column that receives the free-text remainder before it is exploded.
pub const REMAINDER_COLUMN: &str = "address_to_explode";

/// Known-field groups stripped from the address, in the order they are applied.
pub const KNOWN_FIELD_GROUPS: &[&str] = &[
    "neighborhood",
    "town",
    "municipal_unit",
    "settlement",
    "toponym",
    "city_block",
    "unit",
    "poi",
    "po_box",
    "streetName_prefix",
    "klm",
    "check",
    "municipality",
    "data_city",
    "data_zip",
    "prefecture",
    "type",
    "drop",
];

/// Column prefixes kept, in output order.
const COLUMN_ORDER: &[&str] = &[
    "AA",
    "aa",
    "source",
    "streetName_prefix",
    "full_address",
    "address",
    "neighborhood",
    "drop",
    "klm",
    "road",
    "po_box",
    "poi",
    "town",
    "municipal_unit",
    "settlement",
    "toponym",
    "city_block",
    "unit",
    "number",
    "check",
    "data_city",
    "data_zip",
    "δρομος",
    "ονομασία οδού ok",
    "Street",
    "Num",
    "City",
    "Zip",
    "Municipality",
    "Prefecture",
    "Type",
    "x",
    "y",
];

/// Targets that never receive a line number.
const ZERO_LINE_TARGETS: &[&str] = &[
    "aa",
    "address",
    "full_address",
    "street",
    "num",
    "number",
    "city",
    "zip",
    "type",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Settings of the [`Preprocessor`](crate::pipeline::Preprocessor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Column holding the full free-text address.
    pub address_column: String,
    /// Identifier columns, tried in order, for the `AA` output column.
    pub identifier_columns: Vec<String>,
    /// Column prefixes to keep, in order. Empty keeps every column as is.
    pub column_order: Vec<String>,
    /// Canonical column names to drop before processing.
    pub columns_to_drop: Vec<String>,
    /// Raw column names containing this tag are always dropped.
    pub drop_field_tag: String,
    /// Known-field groups removed from the address, in order.
    pub known_field_groups: Vec<String>,
    /// Targets whose rows are discarded right after reshaping.
    pub dropped_targets: Vec<String>,
    /// Targets that always get line number 0 (case-insensitive).
    pub zero_line_targets: Vec<String>,
    /// Targets whose rows are removed from the final table (case-insensitive).
    pub removed_targets: Vec<String>,
    /// Remove `"` and `'` from every value before segmenting.
    pub strip_quotes: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            address_column: "full_address".to_string(),
            identifier_columns: strings(&["aa", "AA"]),
            column_order: strings(COLUMN_ORDER),
            columns_to_drop: Vec::new(),
            drop_field_tag: "drop_field".to_string(),
            known_field_groups: strings(KNOWN_FIELD_GROUPS),
            dropped_targets: strings(&["data_street", "data_number"]),
            zero_line_targets: strings(ZERO_LINE_TARGETS),
            removed_targets: strings(&["aa", "address"]),
            strip_quotes: true,
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn is_zero_line_target(&self, canonical: &str) -> bool {
        self.zero_line_targets
            .iter()
            .any(|t| t.eq_ignore_ascii_case(canonical))
    }

    pub fn is_dropped_target(&self, canonical: &str) -> bool {
        self.dropped_targets.iter().any(|t| t == canonical)
    }

    /// Case-insensitive, so an `AA` identifier row goes with `aa`.
    pub fn is_removed_target(&self, canonical: &str) -> bool {
        self.removed_targets
            .iter()
            .any(|t| t.eq_ignore_ascii_case(canonical))
    }
}
