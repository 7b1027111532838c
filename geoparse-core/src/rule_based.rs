//! # Street Token Rules
//!
//! Classifies each word of the free-text remainder as a street number or a
//! street name. Two regular patterns describe what a Greek house number looks
//! like:
//!
//! - **Plain or ranged number**, optionally with one letter suffix and
//!   apostrophe-separated parts: `12`, `12-14`, `12Α`, `12Α'3`.
//! - **Number glued to lowercase or Greek letters**, optionally followed by
//!   more number groups: `12α`, `12α-14β`, `3ΑΒ 5`.
//!
//! The second pattern excludes ordinals written with the feminine suffix
//! `ης` (`5ης` as in "5ης Μαΐου"), which name a street rather than number one.
//!
//! Anything else, including the empty string, is a street name.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::label::Label;

static PLAIN_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:-\d+)?(?:[Α-ΩA-Za-z](?:'\s*[\dΑ-ΩA-Za-z]*)*)?$").unwrap()
});

static LETTERED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+[α-ωΑ-Ω]+(?:[-\s]*\d+[α-ωΑ-ΩA-Za-z]*)*$").unwrap()
});

/// Feminine ordinal suffix that disqualifies a lettered number.
const ORDINAL_SUFFIX: &str = "ης";

/// Returns `true` when the whole text has the shape of a house number.
pub fn is_street_number(text: &str) -> bool {
    if PLAIN_NUMBER.is_match(text) {
        return true;
    }
    if !LETTERED_NUMBER.is_match(text) {
        return false;
    }
    let letters = text.trim_start_matches(|c: char| c.is_numeric());
    !letters.starts_with(ORDINAL_SUFFIX)
}

/// Label of one word of the free-text remainder.
pub fn classify_token(text: &str) -> Label {
    if is_street_number(text) {
        Label::StreetNumber
    } else {
        Label::StreetName
    }
}
