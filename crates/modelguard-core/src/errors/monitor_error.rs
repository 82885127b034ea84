//! Accuracy monitor errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("rolling window lock poisoned for model {model_id}")]
    LockPoisoned { model_id: String },

    #[error("confidence {confidence} outside [0, 1]")]
    InvalidConfidence { confidence: f64 },
}

impl ErrorCode for MonitorError {
    fn error_code(&self) -> &'static str {
        error_code::MONITOR_ERROR
    }
}
