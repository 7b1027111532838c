//! # Preprocessing Pipeline — Orchestrator with Observable Events
//!
//! The pipeline turns wide [`AddressRecord`]s into long [`TokenRow`]s and can
//! emit an event at every step through a Rust channel (`mpsc`), so that the
//! WebSocket server can stream progress to a client.
//!
//! Each record runs independently. A record that fails (no address, no
//! identifier) is reported and skipped; it never aborts the batch.

use std::sync::mpsc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{PipelineConfig, REMAINDER_COLUMN};
use crate::error::RecordError;
use crate::label::Label;
use crate::record::{AddressRecord, TokenRow};
use crate::rows;
use crate::segmenter::remainder_for;
use crate::tokenizer::{PositionIndex, Token};

/// Events emitted while records are processed.
///
/// Each variant carries what a client needs to render that step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Step 1**: columns dropped, ordered and unquoted.
    ColumnsPrepared {
        old_index: usize,
        columns: Vec<String>,
    },
    /// **Step 2**: known sub-fields removed from the address.
    RemainderBuilt {
        old_index: usize,
        address: String,
        remainder: String,
    },
    /// **Step 3**: original address tokenized and positioned.
    AddressIndexed {
        old_index: usize,
        positions: Vec<(String, usize)>,
        /// Token spans, for highlighting the address.
        tokens: Vec<Token>,
    },
    /// **Step 4**: one remainder word labeled.
    TokenClassified {
        old_index: usize,
        text: String,
        target: String,
        line_number: usize,
    },
    /// **Step 5**: all rows of a record, before batch-level target correction.
    RecordDone {
        old_index: usize,
        rows: Vec<TokenRow>,
    },
    /// The record was skipped.
    RecordFailed {
        old_index: usize,
        message: String,
    },
    /// **Done**: final rows of the whole batch.
    Done {
        rows: Vec<TokenRow>,
        total_records: usize,
        failed_records: usize,
        processing_ms: u64,
    },
}

/// A record that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    pub old_index: usize,
    pub error: RecordError,
}

/// Result of a batch: the final table and the skipped records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub rows: Vec<TokenRow>,
    pub failures: Vec<RecordFailure>,
}

/// The address preprocessing pipeline.
///
/// # Usage
/// - **Single record**: [`process_record`](Self::process_record).
/// - **Batch**: [`process_batch`](Self::process_batch), parallel across records.
/// - **Streaming**: [`process_streaming`](Self::process_streaming), sequential,
///   with a [`PipelineEvent`] per step.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PipelineConfig,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Rows of one record. Target correction is batch-level and not applied.
    pub fn process_record(&self, record: &AddressRecord) -> Result<Vec<TokenRow>, RecordError> {
        self.run_record(record, &mut |_: PipelineEvent| {})
    }

    /// Processes records in parallel; output rows keep the input record order.
    pub fn process_batch(&self, records: &[AddressRecord]) -> BatchReport {
        let results: Vec<(usize, Result<Vec<TokenRow>, RecordError>)> = records
            .par_iter()
            .map(|record| (record.old_index, self.process_record(record)))
            .collect();

        let mut report = BatchReport::default();
        for (old_index, result) in results {
            match result {
                Ok(rows) => report.rows.extend(rows),
                Err(error) => {
                    warn!(old_index, %error, "record skipped");
                    report.failures.push(RecordFailure { old_index, error });
                }
            }
        }
        report.rows = rows::correct_target_labels(report.rows);
        report
    }

    /// Processes records one by one, sending an event per step.
    ///
    /// Send errors are ignored: a dropped receiver just means nobody watches.
    pub fn process_streaming(&self, records: &[AddressRecord], tx: mpsc::Sender<PipelineEvent>) {
        let start = std::time::Instant::now();
        let mut all_rows = Vec::new();
        let mut failed_records = 0;

        for record in records {
            let result = self.run_record(record, &mut |event: PipelineEvent| {
                let _ = tx.send(event);
            });
            match result {
                Ok(rows) => all_rows.extend(rows),
                Err(error) => {
                    warn!(old_index = record.old_index, %error, "record skipped");
                    failed_records += 1;
                    let _ = tx.send(PipelineEvent::RecordFailed {
                        old_index: record.old_index,
                        message: error.to_string(),
                    });
                }
            }
        }

        let _ = tx.send(PipelineEvent::Done {
            rows: rows::correct_target_labels(all_rows),
            total_records: records.len(),
            failed_records,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }

    fn run_record(
        &self,
        record: &AddressRecord,
        emit: &mut dyn FnMut(PipelineEvent),
    ) -> Result<Vec<TokenRow>, RecordError> {
        let config = &self.config;
        let old_index = record.old_index;

        // === Step 1: column preparation ===
        let mut prepared = rows::drop_columns(record.clone(), config);
        prepared = rows::order_columns(prepared, &config.column_order);
        if config.strip_quotes {
            prepared = rows::strip_quotes(prepared);
        }
        emit(PipelineEvent::ColumnsPrepared {
            old_index,
            columns: prepared.column_names(),
        });

        // === Step 2: remainder ===
        let missing_address = || RecordError::MissingAddress {
            old_index,
            column: config.address_column.clone(),
        };
        let address = prepared
            .first_canonical(&config.address_column)
            .map(|a| a.trim().to_string())
            .ok_or_else(missing_address)?;
        let remainder = remainder_for(&prepared, config).ok_or_else(missing_address)?;
        prepared.push(REMAINDER_COLUMN, Some(&remainder));
        emit(PipelineEvent::RemainderBuilt {
            old_index,
            address: address.clone(),
            remainder,
        });

        // === Step 3: positions in the original address ===
        let index = PositionIndex::build(&address);
        emit(PipelineEvent::AddressIndexed {
            old_index,
            positions: index.entries().to_vec(),
            tokens: index.tokens().to_vec(),
        });

        // === Step 4: long form, explosion and line numbers ===
        let mut out = rows::reshape_to_long_form(&prepared, config);
        out = rows::explode_remainder(out);
        rows::trim_text(&mut out);
        rows::assign_line_numbers(&mut out, &index, config);
        rows::assign_total_lines(&mut out);

        for row in out.iter().filter(|r| Label::from_name(&r.target).is_street()) {
            emit(PipelineEvent::TokenClassified {
                old_index,
                text: row.text.clone(),
                target: row.target.clone(),
                line_number: row.line_number,
            });
        }

        // === Step 5: identifier and final filtering ===
        rows::attach_identifier(&mut out, old_index, config)?;
        let out = rows::remove_targets(out, config);

        debug!(old_index, rows = out.len(), "record processed");
        emit(PipelineEvent::RecordDone {
            old_index,
            rows: out.clone(),
        });
        Ok(out)
    }
}
