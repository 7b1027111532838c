//! # Row Builder
//!
//! The wide-to-long transformation, as a chain of small pure functions. The
//! [`Preprocessor`](crate::pipeline::Preprocessor) calls them in this order:
//!
//! ```text
//! AddressRecord
//!   → drop_columns → order_columns → strip_quotes      (column preparation)
//!   → [segmenter appends address_to_explode]
//!   → reshape_to_long_form                             (one row per cell)
//!   → explode_remainder                                (streetName / streetNumber rows)
//!   → trim_text → assign_line_numbers → assign_total_lines
//!   → attach_identifier → remove_targets
//! Vec<TokenRow>
//!   → correct_target_labels                            (whole batch)
//! ```

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::config::{PipelineConfig, REMAINDER_COLUMN};
use crate::error::RecordError;
use crate::record::{AddressRecord, Field, TokenRow};
use crate::rule_based::classify_token;
use crate::tokenizer::{break_free_text, PositionIndex};

// ---------------------------------------------------------------------------
// Column preparation
// ---------------------------------------------------------------------------

/// Removes tagged columns and the configured `columns_to_drop`.
///
/// Columns whose raw name contains the drop tag always go. The configured list
/// is all-or-nothing: if any listed name is not an existing column, a warning
/// is logged and none of the listed columns is dropped.
pub fn drop_columns(mut record: AddressRecord, config: &PipelineConfig) -> AddressRecord {
    let tag = config.drop_field_tag.as_str();
    if !tag.is_empty() {
        record.fields.retain(|f| !f.name.raw().contains(tag));
    }

    if config.columns_to_drop.is_empty() {
        return record;
    }

    let existing: HashSet<&str> = record.fields.iter().map(|f| f.name.raw()).collect();
    let invalid: Vec<&str> = config
        .columns_to_drop
        .iter()
        .map(String::as_str)
        .filter(|name| !existing.contains(name))
        .collect();

    if !invalid.is_empty() {
        warn!(
            old_index = record.old_index,
            ?invalid,
            "columns to drop are not valid, none dropped"
        );
        return record;
    }

    record
        .fields
        .retain(|f| !config.columns_to_drop.iter().any(|c| c == f.name.canonical()));
    debug!(old_index = record.old_index, dropped = ?config.columns_to_drop, "columns dropped");
    record
}

/// Keeps the columns that start with one of `prefixes`, grouped in prefix order.
///
/// A column is taken by the first prefix it starts with. Columns matching no
/// prefix are removed. An empty prefix list leaves the record untouched.
pub fn order_columns(mut record: AddressRecord, prefixes: &[String]) -> AddressRecord {
    if prefixes.is_empty() {
        return record;
    }

    let mut pending: Vec<Option<Field>> = record.fields.drain(..).map(Some).collect();
    for prefix in prefixes {
        for slot in pending.iter_mut() {
            if slot.as_ref().is_some_and(|f| f.name.raw().starts_with(prefix.as_str())) {
                record.fields.extend(slot.take());
            }
        }
    }
    record
}

/// Removes `"` and `'` from every value.
pub fn strip_quotes(mut record: AddressRecord) -> AddressRecord {
    for value in record.fields.iter_mut().filter_map(|f| f.value.as_mut()) {
        value.retain(|c| c != '"' && c != '\'');
    }
    record
}

// ---------------------------------------------------------------------------
// Long form
// ---------------------------------------------------------------------------

/// One row per non-missing cell, in column order.
///
/// Blank cells count as missing. Rows of the configured dropped targets
/// (`data_street`, `data_number` by default) are left out.
pub fn reshape_to_long_form(record: &AddressRecord, config: &PipelineConfig) -> Vec<TokenRow> {
    record
        .fields
        .iter()
        .filter(|f| !config.is_dropped_target(f.name.canonical()))
        .filter_map(|f| {
            f.present_value()
                .map(|value| TokenRow::new(record.old_index, f.name.raw(), value))
        })
        .collect()
}

/// Replaces each remainder row with one classified row per remainder word.
pub fn explode_remainder(rows: Vec<TokenRow>) -> Vec<TokenRow> {
    let mut exploded = Vec::with_capacity(rows.len());
    for row in rows {
        if row.target != REMAINDER_COLUMN {
            exploded.push(row);
            continue;
        }
        for word in break_free_text(&row.text) {
            let label = classify_token(&word);
            exploded.push(TokenRow::new(row.old_index, label, word));
        }
    }
    exploded
}

pub fn trim_text(rows: &mut [TokenRow]) {
    for row in rows.iter_mut() {
        let trimmed = row.text.trim();
        if trimmed.len() != row.text.len() {
            row.text = trimmed.to_string();
        }
    }
}

/// Sets `line_number` from the position index of the original address.
///
/// Zero-line targets always get 0. Other rows take the position of their
/// text, or of its first token when the whole value occurs in the address
/// as a contiguous run of tokens, or 0.
pub fn assign_line_numbers(rows: &mut [TokenRow], index: &PositionIndex, config: &PipelineConfig) {
    for row in rows.iter_mut() {
        row.line_number = if config.is_zero_line_target(row.canonical_target()) {
            0
        } else {
            index.locate(&row.text).unwrap_or(0)
        };
    }
}

/// Sets `total_lines` to the largest non-zero line number of each record.
///
/// Rows with line number 0 get 0.
pub fn assign_total_lines(rows: &mut [TokenRow]) {
    let mut max_by_record: HashMap<usize, usize> = HashMap::new();
    for row in rows.iter().filter(|r| r.line_number != 0) {
        let max = max_by_record.entry(row.old_index).or_insert(0);
        *max = (*max).max(row.line_number);
    }

    for row in rows.iter_mut() {
        row.total_lines = if row.line_number == 0 {
            0
        } else {
            max_by_record.get(&row.old_index).copied().unwrap_or(0)
        };
    }
}

/// Copies the record identifier into the `AA` column of every row.
///
/// Identifier columns are tried in configured order; the first row whose
/// canonical target equals one of them supplies the value.
pub fn attach_identifier(
    rows: &mut [TokenRow],
    old_index: usize,
    config: &PipelineConfig,
) -> Result<(), RecordError> {
    let aa = config
        .identifier_columns
        .iter()
        .find_map(|column| rows.iter().find(|r| r.canonical_target() == column.as_str()))
        .map(|row| row.text.clone())
        .ok_or_else(|| RecordError::MissingIdentifier {
            old_index,
            tried: config.identifier_columns.join(", "),
        })?;

    for row in rows.iter_mut() {
        row.aa.clone_from(&aa);
    }
    Ok(())
}

/// Drops identifier and address rows from the final table.
pub fn remove_targets(rows: Vec<TokenRow>, config: &PipelineConfig) -> Vec<TokenRow> {
    rows.into_iter()
        .filter(|r| !config.is_removed_target(r.canonical_target()))
        .collect()
}

// ---------------------------------------------------------------------------
// Batch level
// ---------------------------------------------------------------------------

/// Normalizes suffixed targets (`toponym.1`) to their canonical name.
///
/// Builds a map from every target's prefix to the targets sharing it; a target
/// that is not itself a key of that map is truncated to its prefix.
pub fn correct_target_labels(mut rows: Vec<TokenRow>) -> Vec<TokenRow> {
    let mut replacements: HashMap<String, HashSet<String>> = HashMap::new();
    for row in &rows {
        replacements
            .entry(row.canonical_target().to_string())
            .or_default()
            .insert(row.target.clone());
    }

    for row in rows.iter_mut() {
        if !replacements.contains_key(&row.target) {
            let canonical = row.canonical_target().to_string();
            debug!(from = %row.target, to = %canonical, "target corrected");
            row.target = canonical;
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    fn targets(rows: &[TokenRow]) -> Vec<&str> {
        rows.iter().map(|r| r.target.as_str()).collect()
    }

    #[test]
    fn test_drop_field_tag_always_applies() {
        let record = AddressRecord::new(0)
            .with_field("AA", Some("1"))
            .with_field("notes_drop_field", Some("x"));
        let record = drop_columns(record, &config());
        assert_eq!(record.column_names(), vec!["AA"]);
    }

    #[test]
    fn test_columns_to_drop_by_canonical_name() {
        let record = AddressRecord::new(0)
            .with_field("AA", Some("1"))
            .with_field("source", Some("a"))
            .with_field("source.1", Some("b"));
        let config = PipelineConfig {
            columns_to_drop: vec!["source".to_string()],
            ..config()
        };
        let record = drop_columns(record, &config);
        assert_eq!(record.column_names(), vec!["AA"]);
    }

    #[test]
    fn test_invalid_columns_to_drop_drops_nothing() {
        let record = AddressRecord::new(0)
            .with_field("AA", Some("1"))
            .with_field("source", Some("a"));
        let config = PipelineConfig {
            columns_to_drop: vec!["source".to_string(), "missing".to_string()],
            ..config()
        };
        let record = drop_columns(record, &config);
        assert_eq!(record.column_names(), vec!["AA", "source"]);
    }

    #[test]
    fn test_order_columns_by_prefix() {
        let record = AddressRecord::new(0)
            .with_field("town", Some("Αθήνα"))
            .with_field("full_address", Some("Ερμού 5 Αθήνα"))
            .with_field("unknown", Some("?"))
            .with_field("AA", Some("1"))
            .with_field("town.1", Some("Πειραιάς"));
        let record = order_columns(record, &config().column_order);
        assert_eq!(
            record.column_names(),
            vec!["AA", "full_address", "town", "town.1"]
        );
    }

    #[test]
    fn test_order_columns_first_prefix_wins() {
        // Taken by "address", the first prefix it starts with.
        let record = AddressRecord::new(0)
            .with_field("address_line", Some("a"))
            .with_field("AA", Some("1"));
        let prefixes = vec!["AA".to_string(), "address".to_string(), "address_line".to_string()];
        let record = order_columns(record, &prefixes);
        assert_eq!(record.column_names(), vec!["AA", "address_line"]);
    }

    #[test]
    fn test_order_columns_empty_prefixes_keeps_all() {
        let record = AddressRecord::new(0).with_field("b", Some("1")).with_field("a", None);
        let record = order_columns(record, &[]);
        assert_eq!(record.column_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_strip_quotes() {
        let record = AddressRecord::new(0)
            .with_field("full_address", Some("\"Ερμού\" 5 Αγ'Ιωάννη"))
            .with_field("town", None);
        let record = strip_quotes(record);
        assert_eq!(record.get("full_address"), Some("Ερμού 5 ΑγΙωάννη"));
        assert_eq!(record.get("town"), None);
    }

    #[test]
    fn test_reshape_skips_missing_and_dropped() {
        let record = AddressRecord::new(7)
            .with_field("AA", Some("1"))
            .with_field("town", None)
            .with_field("poi", Some("  "))
            .with_field("data_street", Some("Ερμού"))
            .with_field("data_number.1", Some("5"))
            .with_field("toponym.1", Some("Κηφισιά"));
        let rows = reshape_to_long_form(&record, &config());
        assert_eq!(targets(&rows), vec!["AA", "toponym.1"]);
        assert!(rows.iter().all(|r| r.old_index == 7));
    }

    #[test]
    fn test_explode_remainder() {
        let rows = vec![
            TokenRow::new(0, "AA", "1"),
            TokenRow::new(0, REMAINDER_COLUMN, "Λ. Κηφισίας, 100"),
        ];
        let rows = explode_remainder(rows);
        assert_eq!(targets(&rows), vec!["AA", "streetName", "streetName", "streetNumber"]);
        assert_eq!(rows[3].text, "100");
    }

    #[test]
    fn test_explode_empty_remainder_yields_nothing() {
        let rows = vec![TokenRow::new(0, REMAINDER_COLUMN, " , ")];
        assert!(explode_remainder(rows).is_empty());
    }

    #[test]
    fn test_line_numbers() {
        let index = PositionIndex::build("Λ. Κηφισίας 100 Κηφισιά");
        let mut rows = vec![
            TokenRow::new(0, "full_address", "Λ. Κηφισίας 100 Κηφισιά"),
            TokenRow::new(0, "town", "Κηφισιά"),
            TokenRow::new(0, "Zip", "14562"),
            TokenRow::new(0, "streetName", "Λ."),
            TokenRow::new(0, "streetNumber", "100"),
            TokenRow::new(0, "poi", "Άγνωστο"),
        ];
        assign_line_numbers(&mut rows, &index, &config());
        let lines: Vec<usize> = rows.iter().map(|r| r.line_number).collect();
        assert_eq!(lines, vec![0, 4, 0, 1, 3, 0]);
    }

    #[test]
    fn test_line_number_of_absent_multi_word_value() {
        let index = PositionIndex::build("Ερμού 5 Αθήνα");
        let mut rows = vec![
            TokenRow::new(0, "poi", "Αθήνα Mall"),
            TokenRow::new(0, "town", "Αθήνα"),
        ];
        assign_line_numbers(&mut rows, &index, &config());
        assert_eq!(rows[0].line_number, 0);
        assert_eq!(rows[1].line_number, 3);
    }

    #[test]
    fn test_total_lines() {
        let mut rows = vec![
            TokenRow::new(0, "town", "Αθήνα"),
            TokenRow::new(0, "streetName", "Ερμού"),
            TokenRow::new(0, "Zip", "10563"),
            TokenRow::new(1, "streetName", "Πατησίων"),
        ];
        rows[0].line_number = 3;
        rows[1].line_number = 1;
        rows[3].line_number = 1;
        assign_total_lines(&mut rows);
        let totals: Vec<usize> = rows.iter().map(|r| r.total_lines).collect();
        assert_eq!(totals, vec![3, 3, 0, 1]);
    }

    #[test]
    fn test_attach_identifier() {
        let mut rows = vec![TokenRow::new(2, "AA", "42"), TokenRow::new(2, "town", "Αθήνα")];
        attach_identifier(&mut rows, 2, &config()).unwrap();
        assert!(rows.iter().all(|r| r.aa == "42"));
    }

    #[test]
    fn test_attach_identifier_prefers_lowercase_column() {
        let mut rows = vec![TokenRow::new(0, "AA", "upper"), TokenRow::new(0, "aa", "lower")];
        attach_identifier(&mut rows, 0, &config()).unwrap();
        assert_eq!(rows[0].aa, "lower");
    }

    #[test]
    fn test_attach_identifier_missing() {
        let mut rows = vec![TokenRow::new(5, "town", "Αθήνα")];
        let err = attach_identifier(&mut rows, 5, &config()).unwrap_err();
        assert_eq!(err.old_index(), 5);
        assert!(matches!(err, RecordError::MissingIdentifier { .. }));
    }

    #[test]
    fn test_remove_targets() {
        let rows = vec![
            TokenRow::new(0, "AA", "1"),
            TokenRow::new(0, "address", "x"),
            TokenRow::new(0, "town", "Αθήνα"),
        ];
        let rows = remove_targets(rows, &config());
        assert_eq!(targets(&rows), vec!["town"]);
    }

    #[test]
    fn test_correct_target_labels() {
        let rows = vec![
            TokenRow::new(0, "toponym", "Α"),
            TokenRow::new(0, "toponym.1", "Β"),
            TokenRow::new(1, "unit.2", "Γ"),
            TokenRow::new(1, "streetName", "Δ"),
        ];
        let rows = correct_target_labels(rows);
        assert_eq!(targets(&rows), vec!["toponym", "toponym", "unit", "streetName"]);
    }
}
