//! Error types for geoparse-core.
//!
//! Two levels: [`GeoparseError`] for caller-facing failures (bad configuration,
//! unreadable config files) and [`RecordError`] for a single malformed address
//! record. A `RecordError` never aborts a batch.

use thiserror::Error;

/// Caller-facing error type
#[derive(Error, Debug)]
pub enum GeoparseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for geoparse operations
pub type Result<T> = std::result::Result<T, GeoparseError>;

/// Failure of a single address record inside a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record {old_index}: address column '{column}' is missing or empty")]
    MissingAddress { old_index: usize, column: String },

    #[error("record {old_index}: no identifier column (tried {tried})")]
    MissingIdentifier { old_index: usize, tried: String },
}

impl RecordError {
    pub fn old_index(&self) -> usize {
        match self {
            RecordError::MissingAddress { old_index, .. }
            | RecordError::MissingIdentifier { old_index, .. } => *old_index,
        }
    }
}

impl serde::Serialize for GeoparseError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl serde::Serialize for RecordError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GeoparseError::Config("no ruleset selected".to_string());
        assert_eq!(err.to_string(), "Configuration error: no ruleset selected");

        let err = RecordError::MissingAddress {
            old_index: 3,
            column: "full_address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "record 3: address column 'full_address' is missing or empty"
        );
        assert_eq!(err.old_index(), 3);
    }

    #[test]
    fn test_config_parse_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GeoparseError = parse_err.into();
        assert!(err.to_string().starts_with("Invalid configuration file"));
    }
}
