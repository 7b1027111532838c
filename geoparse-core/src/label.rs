//! # Address Labels
//!
//! Semantic categories ("targets") assigned to address tokens.
//!
//! | Label           | Meaning                         | Example            |
//! |-----------------|---------------------------------|--------------------|
//! | streetName      | Street name word                | Πατησίων           |
//! | streetNumber    | House number, with suffixes     | 12Α, 12-14         |
//! | unit            | Floor / apartment               | 3ος όροφος         |
//! | toponym         | Named place                     | Αγίου Νικολάου     |
//! | neighborhood    | Neighborhood                    | Κολωνάκι           |
//! | town            | Town or city                    | Αθήνα              |
//! | po_box          | P.O. box                        | Τ.Θ. 1234          |
//! | klm             | Kilometer marker on a road      | 12ο χλμ            |
//!
//! The set is closed for the labels the pipeline produces itself and open for
//! everything else: any input column name becomes a label of its own
//! ([`Label::Other`]).

use serde::{Deserialize, Serialize};

/// Label of an address token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Label {
    StreetName,
    StreetNumber,
    Unit,
    Toponym,
    Neighborhood,
    Town,
    MunicipalUnit,
    Settlement,
    CityBlock,
    Poi,
    PoBox,
    Klm,
    Road,
    Drop,
    /// Column-derived label with no dedicated variant.
    Other(String),
}

impl Label {
    /// Name as written in the output `target` column
    pub fn name(&self) -> &str {
        match self {
            Label::StreetName => "streetName",
            Label::StreetNumber => "streetNumber",
            Label::Unit => "unit",
            Label::Toponym => "toponym",
            Label::Neighborhood => "neighborhood",
            Label::Town => "town",
            Label::MunicipalUnit => "municipal_unit",
            Label::Settlement => "settlement",
            Label::CityBlock => "city_block",
            Label::Poi => "poi",
            Label::PoBox => "po_box",
            Label::Klm => "klm",
            Label::Road => "road",
            Label::Drop => "drop",
            Label::Other(name) => name,
        }
    }

    /// Parses a target name; unknown names become [`Label::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "streetName" => Label::StreetName,
            "streetNumber" => Label::StreetNumber,
            "unit" => Label::Unit,
            "toponym" => Label::Toponym,
            "neighborhood" => Label::Neighborhood,
            "town" => Label::Town,
            "municipal_unit" => Label::MunicipalUnit,
            "settlement" => Label::Settlement,
            "city_block" => Label::CityBlock,
            "poi" => Label::Poi,
            "po_box" => Label::PoBox,
            "klm" => Label::Klm,
            "road" => Label::Road,
            "drop" => Label::Drop,
            other => Label::Other(other.to_string()),
        }
    }

    /// Labels produced by splitting the free-text remainder
    pub fn is_street(&self) -> bool {
        matches!(self, Label::StreetName | Label::StreetNumber)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.name().to_string()
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label::from_name(&name)
    }
}
