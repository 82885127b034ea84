//! Input errors: fatal to the analysis call that received them.

use super::error_code::{self, ErrorCode};

/// Malformed reference/current batches or validation inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("feature count mismatch: reference has {reference}, current has {current}")]
    FeatureCountMismatch { reference: usize, current: usize },

    #[error("feature name mismatch at index {index}: '{reference}' vs '{current}'")]
    FeatureNameMismatch {
        index: usize,
        reference: String,
        current: String,
    },

    #[error("feature names ({names}) do not match vector width ({width})")]
    NameWidthMismatch { names: usize, width: usize },

    #[error("batch '{batch}' is empty")]
    EmptyBatch { batch: String },

    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedBatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("feature '{feature}' has {corrupted} of {total} non-finite values")]
    CorruptedFeature {
        feature: String,
        corrupted: usize,
        total: usize,
    },

    #[error("column '{column}' has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl ErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::INPUT_ERROR
    }
}
