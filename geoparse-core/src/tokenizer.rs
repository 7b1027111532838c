//! # Greek Address Tokenizer
//!
//! Splits an address into tokens and assigns each distinct token a position,
//! so that every labeled row of the output can be put back in reading order.
//!
//! ## Grammar
//!
//! At each position the first alternative that matches wins (priority order,
//! not longest match). Whitespace is skipped.
//!
//! | # | Alternative                     | Example          |
//! |---|---------------------------------|------------------|
//! | 1 | quoted single word              | `"Ερμού"`        |
//! | 2 | single-letter abbreviation      | `Δ.` in `Δ.Φαλήρου` |
//! | 3 | multi-letter abbreviation       | `Αγ.` in `Αγ.Παρασκευής` |
//! | 4 | parenthesized word              | `(Κτίριο`, `Β)`  |
//! | 5 | hyphenated compound             | `12-14`, `Αγ'-Ιωάννη` |
//! | 6 | word + period before whitespace | `Λ.` in `Λ. Κηφισίας` |
//! | 7 | dotted sequence                 | `Α.Β.` glued to a word |
//! | 8 | slash compound                  | `12/3`           |
//! | 9 | plain word (apostrophe allowed) | `Πατησίων`, `Αγ'` |
//! | 10| any other single symbol         | `&`              |
//!
//! Tokens that are a bare comma, period or quote mark are discarded.
//!
//! ## Positions
//!
//! ```rust
//! use geoparse_core::tokenizer::tokenize_and_index;
//!
//! let positions = tokenize_and_index("Λ. Κηφισίας 100 Αθήνα");
//! assert_eq!(positions[0], ("Λ.".to_string(), 1));
//! assert_eq!(positions[3], ("Αθήνα".to_string(), 4));
//! ```
//!
//! A repeated token text reuses the position of its first occurrence.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A token of the original address.
///
/// Byte offsets (`start`, `end`) refer to the string that was tokenized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset of the first character (inclusive).
    pub start: usize,
    /// Byte offset past the last character (exclusive).
    pub end: usize,
    /// Sequential index among the surviving tokens (0, 1, 2...).
    pub index: usize,
}

/// Context checks the `regex` crate cannot express inside a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    None,
    /// Previous character must not be a word character (leading `\b`).
    WordStart,
    /// Next character must not be whitespace.
    NotBeforeSpace,
    /// Next character must exist and be whitespace.
    BeforeSpace,
}

struct Alternative {
    pattern: Regex,
    guard: Guard,
}

fn alt(pattern: &str, guard: Guard) -> Alternative {
    Alternative {
        pattern: Regex::new(pattern).unwrap(),
        guard,
    }
}

/// Alternatives in priority order, each anchored at the current position.
static GRAMMAR: Lazy<Vec<Alternative>> = Lazy::new(|| {
    vec![
        alt(r#"^" ?\w+ ?""#, Guard::NotBeforeSpace),
        alt(r"^' ?\w+ ?'", Guard::NotBeforeSpace),
        alt(r"^\w\.\b", Guard::WordStart),
        alt(r"^\w+\.\b", Guard::WordStart),
        alt(r"^\(\w+(?:['`]\w+)?\b", Guard::None),
        alt(r"^\w+\)", Guard::WordStart),
        alt(r"^\w+(?:['`]\w+)?-\w+", Guard::WordStart),
        alt(r"^\w+(?:['`]\w+)?\.", Guard::BeforeSpace),
        alt(r"^\w+\.\w+\.?", Guard::None),
        alt(r"^\w+(?:['`]\w+)?/\w+", Guard::None),
        alt(r"^\w+(?:['`]\w+)?", Guard::None),
        alt(r"^[^\w\s]", Guard::None),
    ]
});

/// Token texts dropped after extraction.
const DISCARDED: &[&str] = &[",", ".", "\"", "'", "`"];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn guard_holds(guard: Guard, text: &str, start: usize, end: usize) -> bool {
    match guard {
        Guard::None => true,
        Guard::WordStart => !text[..start].chars().next_back().is_some_and(is_word_char),
        Guard::NotBeforeSpace => !text[end..].chars().next().is_some_and(char::is_whitespace),
        Guard::BeforeSpace => text[end..].chars().next().is_some_and(char::is_whitespace),
    }
}

/// Tokenizes an address with the address grammar.
pub fn tokenize(address: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < address.len() {
        let rest = &address[pos..];
        let Some(ch) = rest.chars().next() else { break };

        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }

        let matched = GRAMMAR.iter().find_map(|alternative| {
            let m = alternative.pattern.find(rest)?;
            let (start, end) = (pos, pos + m.end());
            guard_holds(alternative.guard, address, start, end).then_some(end)
        });

        // The last alternative matches any non-space character that no word
        // alternative took, so `None` is unreachable in practice.
        let end = matched.unwrap_or(pos + ch.len_utf8());
        let text = &address[pos..end];
        if !DISCARDED.contains(&text) {
            tokens.push(Token {
                text: text.to_string(),
                start: pos,
                end,
                index: 0,
            });
        }
        pos = end;
    }

    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

/// Positions of the distinct tokens of an address, starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    tokens: Vec<Token>,
    /// Surviving tokens in order with their position.
    entries: Vec<(String, usize)>,
    by_text: HashMap<String, usize>,
}

impl PositionIndex {
    /// Tokenizes `address` and numbers its distinct tokens.
    pub fn build(address: &str) -> Self {
        let mut index = PositionIndex::default();
        let mut next = 1;

        for token in tokenize(address) {
            let position = *index.by_text.entry(token.text.clone()).or_insert_with(|| {
                let assigned = next;
                next += 1;
                assigned
            });
            index.entries.push((token.text.clone(), position));
            index.tokens.push(token);
        }
        index
    }

    /// Position of a token text, if it occurs in the address.
    pub fn get(&self, text: &str) -> Option<usize> {
        self.by_text.get(text).copied()
    }

    /// Position for a row text: the text itself if it is a token, otherwise
    /// the position of its first token, provided all of its tokens appear
    /// contiguously and in order in the address.
    pub fn locate(&self, text: &str) -> Option<usize> {
        if let Some(position) = self.get(text) {
            return Some(position);
        }
        let wanted: Vec<String> = tokenize(text).into_iter().map(|t| t.text).collect();
        if wanted.is_empty() {
            return None;
        }
        self.tokens
            .windows(wanted.len())
            .find(|window| window.iter().map(|t| &t.text).eq(wanted.iter()))
            .map(|window| self.entries[window[0].index].1)
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Tokens of the address with their byte offsets.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Largest position, equal to the number of distinct tokens.
    pub fn max_position(&self) -> usize {
        self.by_text.len()
    }
}

/// Ordered `(token, position)` pairs of the original address.
pub fn tokenize_and_index(original_address: &str) -> Vec<(String, usize)> {
    PositionIndex::build(original_address).entries
}

/// Splits the free-text remainder: commas removed, whitespace split.
pub fn break_free_text(remainder: &str) -> Vec<String> {
    remainder
        .replace(',', "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
