//! Span definitions per operation: drift analysis, synthesis, validation,
//! accuracy updates, analytics.

/// Create a drift analysis span.
#[macro_export]
macro_rules! drift_analysis_span {
    ($model_id:expr, $features:expr) => {
        tracing::info_span!("modelguard.drift", model_id = %$model_id, features = $features)
    };
}

/// Create a patch synthesis span.
#[macro_export]
macro_rules! patch_synthesis_span {
    ($drift_result_id:expr) => {
        tracing::info_span!("modelguard.synthesis", drift_result_id = %$drift_result_id)
    };
}

/// Create a patch validation span.
#[macro_export]
macro_rules! patch_validation_span {
    ($patch_id:expr, $patch_type:expr) => {
        tracing::info_span!("modelguard.validation", patch_id = %$patch_id, patch_type = %$patch_type)
    };
}

/// Create an accuracy update span.
#[macro_export]
macro_rules! accuracy_update_span {
    ($model_id:expr) => {
        tracing::debug_span!("modelguard.accuracy", model_id = %$model_id)
    };
}

/// Create an analytics span.
#[macro_export]
macro_rules! analytics_span {
    ($model_id:expr, $history:expr) => {
        tracing::info_span!("modelguard.analytics", model_id = %$model_id, history = $history)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const DRIFT: &str = "modelguard.drift";
    pub const SYNTHESIS: &str = "modelguard.synthesis";
    pub const VALIDATION: &str = "modelguard.validation";
    pub const ACCURACY: &str = "modelguard.accuracy";
    pub const ANALYTICS: &str = "modelguard.analytics";
}
