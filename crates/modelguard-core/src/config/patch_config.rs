use serde::{Deserialize, Serialize};

use super::defaults;

/// Patch synthesis and validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Patched accuracy below this produces a warning.
    pub min_accuracy: f64,
    /// Maximum tolerated |accuracy - baseline accuracy|.
    pub max_performance_delta: f64,
    /// Minimum number of validation rows.
    pub min_sample_size: usize,
    /// Safety score below this rejects the patch.
    pub min_safety_score: f64,
    /// |precision - recall| above this produces an imbalance warning.
    pub imbalance_tolerance: f64,
    /// Confidence level of the accuracy interval (0.95 = 95%).
    pub confidence_level: f64,
    /// Weight of drift reduction in the safety score; accuracy retention gets the rest.
    pub drift_reduction_weight: f64,
    /// Reference quantile used as the clipping lower bound.
    pub clip_lower_quantile: f64,
    /// Reference quantile used as the clipping upper bound.
    pub clip_upper_quantile: f64,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            min_accuracy: defaults::DEFAULT_MIN_ACCURACY,
            max_performance_delta: defaults::DEFAULT_MAX_PERFORMANCE_DELTA,
            min_sample_size: defaults::DEFAULT_MIN_SAMPLE_SIZE,
            min_safety_score: defaults::DEFAULT_MIN_SAFETY_SCORE,
            imbalance_tolerance: defaults::DEFAULT_IMBALANCE_TOLERANCE,
            confidence_level: defaults::DEFAULT_CONFIDENCE_LEVEL,
            drift_reduction_weight: defaults::DEFAULT_DRIFT_REDUCTION_WEIGHT,
            clip_lower_quantile: defaults::DEFAULT_CLIP_LOWER_QUANTILE,
            clip_upper_quantile: defaults::DEFAULT_CLIP_UPPER_QUANTILE,
        }
    }
}
