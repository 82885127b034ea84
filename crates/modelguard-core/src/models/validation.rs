use serde::{Deserialize, Serialize};

/// Quality and safety metrics from one validation attempt.
///
/// Invariant: `confidence_interval_lower <= accuracy <= confidence_interval_upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub drift_score_after_patch: f64,
    /// Relative drift reduction in [0, 1].
    pub drift_reduction: f64,
    /// |accuracy - baseline accuracy|, 0 without a baseline.
    pub performance_delta: f64,
    pub safety_score: f64,
    pub confidence_interval_lower: f64,
    pub confidence_interval_upper: f64,
}

/// Accept/reject decision for a candidate patch.
///
/// A rejection is an expected outcome, not an error: `is_valid = false` with reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Absent when validation stopped before metrics could be computed.
    pub metrics: Option<ValidationMetrics>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A rejection carrying a single reason and no metrics.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            metrics: None,
            errors: vec![reason.into()],
            warnings: Vec::new(),
        }
    }
}
