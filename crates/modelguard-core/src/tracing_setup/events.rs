//! Structured log events shared across crates.

use tracing::{debug, info, warn};

pub fn drift_detected(model_id: &str, drift_score: f64, drift_type: &str, drifted: usize) {
    info!(
        model_id,
        drift_score,
        drift_type,
        drifted_features = drifted,
        "drift detected"
    );
}

pub fn corrupted_input(feature: &str, corrupted: usize, total: usize) {
    warn!(feature, corrupted, total, "non-finite values excluded from feature");
}

pub fn patch_rejected(patch_id: &str, reason: &str) {
    warn!(patch_id, reason, "patch rejected");
}

pub fn patch_accepted(patch_id: &str, safety_score: f64) {
    info!(patch_id, safety_score, "patch accepted");
}

pub fn window_evicted(model_id: &str, window_len: usize) {
    debug!(model_id, window_len, "oldest prediction evicted");
}
