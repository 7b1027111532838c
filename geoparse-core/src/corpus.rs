//! # Demo Address Records
//!
//! A small set of hand-written Greek address records covering the shapes the
//! pipeline has to deal with:
//!
//! - Avenue abbreviations (`Λ.`) and trailing towns
//! - Lettered and ranged house numbers (`12Α`, `12-14`)
//! - Duplicated column names (`toponym`, `toponym.1`)
//! - Ordinal street names (`28ης Οκτωβρίου`)
//! - Intersections (`Μελισίων 18 & Μουργκάνας 1`)
//! - Administrative columns that never get a line number (`Zip`, `Type`)
//!
//! Used by the web demo and by tests.

use crate::record::AddressRecord;

/// `(column, value)` cells of one demo record; `None` is a missing cell.
type DemoRow = &'static [(&'static str, Option<&'static str>)];

const DEMO_ROWS: &[DemoRow] = &[
    &[
        ("AA", Some("1")),
        ("full_address", Some("Λ. Κηφισίας 100 Αθήνα")),
        ("town", Some("Αθήνα")),
        ("Zip", Some("11526")),
    ],
    &[
        ("AA", Some("2")),
        ("full_address", Some("Πατησίων 76 Κυψέλη Αθήνα")),
        ("neighborhood", Some("Κυψέλη")),
        ("town", Some("Αθήνα")),
        ("poi", None),
    ],
    &[
        ("AA", Some("3")),
        ("full_address", Some("Ερμού 12Α Άγιος Στέφανος")),
        ("toponym", Some("Άγιος")),
        ("toponym.1", Some("Στέφανος")),
        ("Type", Some("residential")),
    ],
    &[
        ("AA", Some("4")),
        ("full_address", Some("28ης Οκτωβρίου 12-14 Θεσσαλονίκη")),
        ("town", Some("Θεσσαλονίκη")),
        ("data_street", Some("28ης Οκτωβρίου")),
        ("data_number", Some("12-14")),
    ],
    &[
        ("AA", Some("5")),
        ("full_address", Some("Μελισίων 18 & Μουργκάνας 1 Μαρούσι 15126")),
        ("municipal_unit", Some("Μαρούσι")),
        ("data_zip", Some("15126")),
    ],
    &[
        ("AA", Some("6")),
        ("full_address", Some("\"Ευαγγελίστριας\" 3, 2ος όροφος Πειραιάς")),
        ("unit", Some("2ος όροφος")),
        ("town", Some("Πειραιάς")),
        ("notes_drop_field", Some("checked by hand")),
    ],
];

/// Demo records with sequential `old_index` values starting at 0.
pub fn demo_records() -> Vec<AddressRecord> {
    DEMO_ROWS
        .iter()
        .enumerate()
        .map(|(old_index, cells)| {
            cells
                .iter()
                .fold(AddressRecord::new(old_index), |record, (name, value)| {
                    record.with_field(name, *value)
                })
        })
        .collect()
}

/// Greek street names for the transliteration demo.
pub fn demo_street_names() -> Vec<&'static str> {
    vec![
        "Λεωφόρος Κηφισίας",
        "Πατησίων",
        "Ευαγγελίστριας",
        "Μπουμπουλίνας",
        "Παύλου Μελά",
        "Καραϊσκάκη",
    ]
}
