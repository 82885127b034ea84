//! Error handling for ModelGuard.
//! One error enum per subsystem, `thiserror` only.
//!
//! Validation rejections are not errors: they are `ValidationResult { is_valid: false, .. }`.
//! Degenerate computations (zero variance, zero denominators) resolve to documented
//! fallback values and never reach this module.

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod input_error;
pub mod monitor_error;
pub mod patch_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use export_error::ExportError;
pub use input_error::InputError;
pub use monitor_error::MonitorError;
pub use patch_error::PatchError;

/// Top-level error for the engine.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("monitor error: {0}")]
    Monitor(#[from] MonitorError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ErrorCode for GuardError {
    fn error_code(&self) -> &'static str {
        match self {
            GuardError::Input(e) => e.error_code(),
            GuardError::Config(e) => e.error_code(),
            GuardError::Patch(e) => e.error_code(),
            GuardError::Monitor(e) => e.error_code(),
            GuardError::Export(e) => e.error_code(),
            GuardError::SerializationError(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience alias used across the workspace.
pub type GuardResult<T> = Result<T, GuardError>;
