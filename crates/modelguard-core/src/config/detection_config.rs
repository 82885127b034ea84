use serde::{Deserialize, Serialize};

use super::defaults;

/// Drift detection configuration (statistical tests + classification).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// PSI above this marks a feature as drifted.
    pub psi_threshold: f64,
    /// KS significance level. A feature passes the KS test when p-value > this.
    pub ks_threshold: f64,
    /// Aggregate drift score above this sets `is_drift_detected`.
    pub drift_threshold: f64,
    /// Number of equal-frequency PSI bins built from the reference sample.
    pub psi_bins: usize,
    /// Drifted-feature fraction above which drift is classified as covariate.
    pub covariate_fraction: f64,
    /// Categorical PSI over label proportions above which drift is classified as prior.
    pub label_shift_threshold: f64,
    /// Non-finite fraction per column above which the analysis is rejected.
    pub max_corrupted_fraction: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            psi_threshold: defaults::DEFAULT_PSI_THRESHOLD,
            ks_threshold: defaults::DEFAULT_KS_THRESHOLD,
            drift_threshold: defaults::DEFAULT_DRIFT_THRESHOLD,
            psi_bins: defaults::DEFAULT_PSI_BINS,
            covariate_fraction: defaults::DEFAULT_COVARIATE_FRACTION,
            label_shift_threshold: defaults::DEFAULT_LABEL_SHIFT_THRESHOLD,
            max_corrupted_fraction: defaults::DEFAULT_MAX_CORRUPTED_FRACTION,
        }
    }
}
