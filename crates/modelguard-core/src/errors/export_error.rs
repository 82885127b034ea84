//! Patch JSON export/import errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown patch status '{0}'")]
    UnknownStatus(String),

    #[error("patch_type '{declared}' does not match configuration type '{actual}'")]
    TypeMismatch { declared: String, actual: String },

    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

impl ErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        error_code::EXPORT_ERROR
    }
}
