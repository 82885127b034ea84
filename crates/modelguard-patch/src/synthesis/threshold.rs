//! Decision threshold that restores the reference positive rate.

use modelguard_core::models::{FeatureSample, PatchConfiguration, ThresholdConfig};
use modelguard_core::traits::IInferenceModel;
use modelguard_drift::stats::quantile;

/// Fraction of rows the model scores at or above `threshold`.
pub fn positive_rate(model: &dyn IInferenceModel, rows: &[Vec<f64>], threshold: f64) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let positives = rows.iter().filter(|r| model.score(r) >= threshold).count();
    positives as f64 / rows.len() as f64
}

/// Pick the threshold on current scores whose positive rate matches the rate the
/// model produced on the reference batch at its active threshold.
pub fn synthesize(
    model: &dyn IInferenceModel,
    reference: &FeatureSample,
    current: &FeatureSample,
) -> Option<PatchConfiguration> {
    if reference.is_empty() || current.is_empty() {
        return None;
    }
    let original_threshold = model.decision_threshold();
    let target_rate = positive_rate(model, reference.rows(), original_threshold);

    let mut scores: Vec<f64> = current
        .rows()
        .iter()
        .map(|r| model.score(r))
        .filter(|s| s.is_finite())
        .collect();
    if scores.is_empty() {
        return None;
    }
    scores.sort_by(f64::total_cmp);
    let new_threshold = quantile(&scores, 1.0 - target_rate).clamp(0.0, 1.0);

    Some(PatchConfiguration::ThresholdTuning(ThresholdConfig {
        original_threshold,
        new_threshold,
    }))
}
