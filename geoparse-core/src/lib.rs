//! # geoparse-core — Greek Address Preprocessing
//!
//! This crate turns loosely structured Greek postal addresses into a labeled,
//! position-aware long table, and transliterates Greek text into Latin script.
//!
//! ## Architecture
//!
//! Data flows through a linear pipeline, one record at a time:
//!
//! 1.  **Input**: an [`AddressRecord`], a row of columns with optional values.
//! 2.  **Column preparation** ([`rows`]): tagged columns dropped, columns
//!     ordered, quotes removed.
//! 3.  **Segmentation** ([`segmenter`]): values of known sub-field columns
//!     (town, toponym, unit...) are removed from the free-text address,
//!     leaving the street name and number.
//! 4.  **Tokenization** ([`tokenizer`]): the original address is tokenized
//!     with a Greek-aware grammar and each token gets a position.
//! 5.  **Classification** ([`rule_based`]): remainder words become
//!     `streetNumber` or `streetName`.
//! 6.  **Row building** ([`rows`]): one [`TokenRow`] per value, with line
//!     numbers, line totals and the record identifier.
//! 7.  **Output**: a [`BatchReport`] with the final rows and skipped records.
//!
//! Two independent utilities complete the crate: [`transliterate`] (ELOT-743
//! and voice-equivalent rule sets) and [`reorder`] (reassembles labeled
//! tokens in the order of a reference address).
//!
//! ## Example
//!
//! ```rust
//! use geoparse_core::{AddressRecord, Preprocessor};
//!
//! let record = AddressRecord::new(0)
//!     .with_field("AA", Some("1"))
//!     .with_field("full_address", Some("Λ. Κηφισίας 100 Αθήνα"))
//!     .with_field("town", Some("Αθήνα"));
//!
//! let report = Preprocessor::new().process_batch(&[record]);
//! for row in &report.rows {
//!     println!("{} {} {}/{}", row.target, row.text, row.line_number, row.total_lines);
//! }
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod label;
pub mod pipeline;
pub mod record;
pub mod reorder;
pub mod rows;
pub mod rule_based;
pub mod segmenter;
pub mod tokenizer;
pub mod transliterate;

pub use config::PipelineConfig;
pub use error::{GeoparseError, RecordError, Result};
pub use label::Label;
pub use pipeline::{BatchReport, PipelineEvent, Preprocessor, RecordFailure};
pub use record::{AddressRecord, FieldName, TokenRow};
pub use tokenizer::{PositionIndex, Token};
pub use transliterate::{Ruleset, Transliterator};
