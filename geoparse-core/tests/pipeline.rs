//! End-to-end tests over the demo records.

use std::collections::BTreeMap;

use geoparse_core::corpus::demo_records;
use geoparse_core::{PipelineConfig, Preprocessor, TokenRow};

fn rows_by_record(rows: &[TokenRow]) -> BTreeMap<usize, Vec<&TokenRow>> {
    let mut grouped: BTreeMap<usize, Vec<&TokenRow>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.old_index).or_default().push(row);
    }
    grouped
}

#[test]
fn test_demo_batch_has_no_failures() {
    let report = Preprocessor::new().process_batch(&demo_records());
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert_eq!(rows_by_record(&report.rows).len(), demo_records().len());
}

#[test]
fn test_total_lines_is_max_line_number() {
    let report = Preprocessor::new().process_batch(&demo_records());

    for (old_index, rows) in rows_by_record(&report.rows) {
        let max = rows.iter().map(|r| r.line_number).max().unwrap_or(0);
        for row in rows {
            if row.line_number == 0 {
                assert_eq!(row.total_lines, 0, "record {old_index}: {row:?}");
            } else {
                assert_eq!(row.total_lines, max, "record {old_index}: {row:?}");
            }
        }
    }
}

#[test]
fn test_body_rows_rebuild_the_address() {
    let records = demo_records();
    let report = Preprocessor::new().process_batch(&records);
    let grouped = rows_by_record(&report.rows);

    // Records 0-4 have no punctuation or repeated words in their address.
    for record in &records[..5] {
        let mut body: Vec<&&TokenRow> = grouped[&record.old_index]
            .iter()
            .filter(|r| r.line_number > 0)
            .collect();
        body.sort_by_key(|r| r.line_number);
        let rebuilt: Vec<&str> = body.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            rebuilt.join(" "),
            record.first_canonical("full_address").unwrap(),
            "record {}",
            record.old_index
        );
    }
}

#[test]
fn test_street_rows_of_intersection() {
    let report = Preprocessor::new().process_batch(&demo_records());
    let street: Vec<(&str, &str)> = report
        .rows
        .iter()
        .filter(|r| r.old_index == 4 && r.target.starts_with("street"))
        .map(|r| (r.target.as_str(), r.text.as_str()))
        .collect();
    assert_eq!(
        street,
        vec![
            ("streetName", "Μελισίων"),
            ("streetNumber", "18"),
            ("streetName", "&"),
            ("streetName", "Μουργκάνας"),
            ("streetNumber", "1"),
        ]
    );
}

#[test]
fn test_dropped_and_removed_targets_never_reach_output() {
    let report = Preprocessor::new().process_batch(&demo_records());
    for row in &report.rows {
        assert!(!["data_street", "data_number", "aa", "AA", "address"].contains(&row.target.as_str()));
        assert!(!row.target.contains("drop_field"));
        assert!(!row.target.contains('.'), "uncorrected target {}", row.target);
    }
}

#[test]
fn test_identifier_on_every_row() {
    let report = Preprocessor::new().process_batch(&demo_records());
    for row in &report.rows {
        assert_eq!(row.aa, (row.old_index + 1).to_string());
    }
}

#[test]
fn test_multi_word_unit_takes_first_token_position() {
    let report = Preprocessor::new().process_batch(&demo_records());
    let unit = report
        .rows
        .iter()
        .find(|r| r.old_index == 5 && r.target == "unit")
        .unwrap();
    assert_eq!(unit.text, "2ος όροφος");
    assert_eq!(unit.line_number, 3);
}

#[test]
fn test_absent_multi_word_value_gets_no_line() {
    let record = geoparse_core::AddressRecord::new(0)
        .with_field("AA", Some("1"))
        .with_field("full_address", Some("Ερμού 5 Αθήνα"))
        .with_field("poi", Some("Αθήνα Mall"))
        .with_field("town", Some("Αθήνα"));
    let report = Preprocessor::new().process_batch(&[record]);

    let line_of = |target: &str| {
        report
            .rows
            .iter()
            .find(|r| r.target == target)
            .map(|r| r.line_number)
    };
    assert_eq!(line_of("poi"), Some(0));
    assert_eq!(line_of("town"), Some(3));
}

#[test]
fn test_custom_config_changes_address_column() {
    let config = PipelineConfig::from_json_str(
        r#"{"address_column": "address", "column_order": []}"#,
    )
    .unwrap();
    let record = geoparse_core::AddressRecord::new(0)
        .with_field("AA", Some("7"))
        .with_field("address", Some("Ερμού 5 Αθήνα"))
        .with_field("town", Some("Αθήνα"));

    let report = Preprocessor::with_config(config).process_batch(&[record]);
    let texts: Vec<&str> = report.rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Αθήνα", "Ερμού", "5"]);
}
