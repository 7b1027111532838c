//! # Address Segmenter
//!
//! Isolates the ambiguous part of a free-text address (street name and number)
//! by removing the sub-fields that are already known from dedicated columns.
//!
//! For each group of [`KNOWN_FIELD_GROUPS`], in order, the values of every
//! column belonging to the group are trimmed and space-joined into one combined
//! substring. If the address still contains it, its first occurrence is removed
//! and the address is trimmed.
//!
//! This is an approximate, order-sensitive heuristic rather than a parse: an
//! early group can remove text a later group would have matched. The order of
//! the group list is part of the behavior and must not be "improved".
//!
//! ```rust
//! use geoparse_core::segmenter::strip_known_substrings;
//!
//! let rest = strip_known_substrings("Λ. Κηφισίας 100 Αθήνα", &[("town", "Αθήνα")]);
//! assert_eq!(rest, "Λ. Κηφισίας 100");
//! ```

use tracing::debug;

use crate::config::{PipelineConfig, KNOWN_FIELD_GROUPS};
use crate::record::AddressRecord;

/// Removes known sub-field values from `full_address` using the default group order.
///
/// `known_field_values` holds `(column, value)` pairs; the column may carry an
/// occurrence suffix (`toponym.1`) and is matched on its canonical name,
/// ignoring ASCII case.
pub fn strip_known_substrings(full_address: &str, known_field_values: &[(&str, &str)]) -> String {
    strip_known_substrings_with(full_address, known_field_values, KNOWN_FIELD_GROUPS)
}

/// Same as [`strip_known_substrings`] with an explicit group order.
pub fn strip_known_substrings_with<S: AsRef<str>>(
    full_address: &str,
    known_field_values: &[(&str, &str)],
    groups: &[S],
) -> String {
    let mut address = full_address.replace('"', "");

    for group in groups {
        let group = group.as_ref();
        let combined = combined_substring(known_field_values, group);
        if combined.is_empty() {
            continue;
        }

        if let Some(pos) = address.find(&combined) {
            address.replace_range(pos..pos + combined.len(), "");
            address = address.trim().to_string();
            debug!(group, removed = %combined, remainder = %address, "known field stripped");
        }
    }

    address
}

/// Remainder of a record's address, or `None` when the address column is
/// missing or blank.
pub fn remainder_for(record: &AddressRecord, config: &PipelineConfig) -> Option<String> {
    let address = record.first_canonical(&config.address_column)?;

    let known: Vec<(&str, &str)> = record
        .fields
        .iter()
        .filter_map(|f| f.value.as_deref().map(|v| (f.name.raw(), v)))
        .collect();

    Some(strip_known_substrings_with(
        address,
        &known,
        &config.known_field_groups,
    ))
}

/// Space-joined, trimmed values of every column in `group`.
fn combined_substring(known_field_values: &[(&str, &str)], group: &str) -> String {
    known_field_values
        .iter()
        .filter(|(column, _)| canonical(column).eq_ignore_ascii_case(group))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn canonical(column: &str) -> &str {
    column.split('.').next().unwrap_or(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_town_removed() {
        let rest = strip_known_substrings("Λ. Κηφισίας 100 Αθήνα", &[("town", "Αθήνα")]);
        assert_eq!(rest, "Λ. Κηφισίας 100");
    }

    #[test]
    fn test_unmatched_group_is_noop() {
        let rest = strip_known_substrings("Πατησίων 76", &[("town", "Πειραιάς")]);
        assert_eq!(rest, "Πατησίων 76");
    }

    #[test]
    fn test_empty_group_is_skipped() {
        let rest = strip_known_substrings("Πατησίων 76 ", &[("town", "  ")]);
        // Nothing removed, so nothing trimmed either.
        assert_eq!(rest, "Πατησίων 76 ");
    }

    #[test]
    fn test_suffixed_columns_are_combined() {
        let rest = strip_known_substrings(
            "Ερμού 5 Άγιος Στέφανος",
            &[("toponym", "Άγιος"), ("toponym.1", " Στέφανος ")],
        );
        assert_eq!(rest, "Ερμού 5");
    }

    #[test]
    fn test_only_first_occurrence_removed() {
        let rest = strip_known_substrings("Αθήνα Αθήνα 5", &[("town", "Αθήνα")]);
        assert_eq!(rest, "Αθήνα 5");
    }

    #[test]
    fn test_group_names_ignore_ascii_case() {
        let rest = strip_known_substrings("Ερμού 5 Αττική", &[("Prefecture", "Αττική")]);
        assert_eq!(rest, "Ερμού 5");
    }

    #[test]
    fn test_group_order_matters() {
        // neighborhood runs before town and eats part of the town name.
        let known = [("town", "Νέα Σμύρνη"), ("neighborhood", "Νέα")];
        let rest = strip_known_substrings("Πατησίων 5 Νέα Σμύρνη", &known);
        assert_eq!(rest, "Πατησίων 5  Σμύρνη");

        let rest = strip_known_substrings_with("Πατησίων 5 Νέα Σμύρνη", &known, &["town", "neighborhood"]);
        assert_eq!(rest, "Πατησίων 5");
    }

    #[test]
    fn test_unit_group_does_not_take_municipal_unit() {
        let rest = strip_known_substrings(
            "Ερμού 5 Κηφισιά",
            &[("municipal_unit", "Κηφισιά"), ("unit", "Κηφισιά")],
        );
        // municipal_unit removes it; the unit group then finds nothing.
        assert_eq!(rest, "Ερμού 5");
    }

    #[test]
    fn test_double_quotes_removed_from_address() {
        let rest = strip_known_substrings("\"Ερμού\" 5", &[]);
        assert_eq!(rest, "Ερμού 5");
    }

    #[test]
    fn test_remainder_for_record() {
        let record = AddressRecord::new(0)
            .with_field("AA", Some("1"))
            .with_field("full_address", Some("Πατησίων 76 Κυψέλη Αθήνα"))
            .with_field("neighborhood", Some("Κυψέλη"))
            .with_field("town", Some("Αθήνα"))
            .with_field("poi", None);
        let config = PipelineConfig::default();
        assert_eq!(remainder_for(&record, &config).as_deref(), Some("Πατησίων 76"));
    }

    #[test]
    fn test_remainder_for_missing_address() {
        let record = AddressRecord::new(0).with_field("town", Some("Αθήνα"));
        assert_eq!(remainder_for(&record, &PipelineConfig::default()), None);
    }
}
