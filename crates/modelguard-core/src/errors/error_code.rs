//! Stable error codes surfaced to host applications.

pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PATCH_ERROR: &str = "PATCH_ERROR";
pub const MONITOR_ERROR: &str = "MONITOR_ERROR";
pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

/// Maps an error to a stable, machine-readable code.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
