//! Patch application and lifecycle errors.

use super::error_code::{self, ErrorCode};
use crate::models::PatchStatus;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    #[error("invalid patch transition: {from:?} -> {to:?}")]
    InvalidTransition { from: PatchStatus, to: PatchStatus },

    #[error("feature index {index} out of range for width {width}")]
    FeatureIndexOutOfRange { index: usize, width: usize },

    #[error("malformed {patch_type} configuration: {reason}")]
    MalformedConfiguration { patch_type: String, reason: String },
}

impl ErrorCode for PatchError {
    fn error_code(&self) -> &'static str {
        error_code::PATCH_ERROR
    }
}
