//! Template summaries attached to synthesized patches.

use modelguard_core::models::{DriftResult, PatchConfiguration};

fn feature_list(drift: &DriftResult, indices: &[usize]) -> String {
    let names: Vec<&str> = indices
        .iter()
        .map(|&i| {
            drift
                .feature_drifts
                .iter()
                .find(|f| f.feature_index == i)
                .map(|f| f.feature_name.as_str())
                .unwrap_or("?")
        })
        .collect();
    names.join(", ")
}

/// One-sentence description of what the patch does and why.
pub fn summarize(configuration: &PatchConfiguration, drift: &DriftResult) -> String {
    let reason = format!(
        "{} detected with score {:.3}",
        drift.drift_type.as_str(),
        drift.drift_score
    );
    match configuration {
        PatchConfiguration::FeatureClipping(c) => format!(
            "Clip {} feature(s) [{}] to reference percentile bounds; {reason}.",
            c.feature_indices.len(),
            feature_list(drift, &c.feature_indices)
        ),
        PatchConfiguration::FeatureReweighting(c) => {
            let ratio = |k: usize| match (c.new_weights.get(k), c.original_weights.get(k)) {
                (Some(new), Some(orig)) if *orig != 0.0 => new / orig,
                _ => 1.0,
            };
            let most_damped = c
                .feature_indices
                .iter()
                .enumerate()
                .min_by(|(a, _), (b, _)| ratio(*a).total_cmp(&ratio(*b)))
                .map(|(_, i)| feature_list(drift, &[*i]))
                .unwrap_or_default();
            format!(
                "Down-weight drifted features in proportion to their drift (strongest on [{most_damped}]); {reason}."
            )
        }
        PatchConfiguration::ThresholdTuning(t) => format!(
            "Move decision threshold from {:.3} to {:.3} to restore the reference positive rate; {reason}.",
            t.original_threshold, t.new_threshold
        ),
        PatchConfiguration::NormalizationUpdate(c) => format!(
            "Replace normalization mean/std for {} feature(s) [{}] with current-sample estimates; {reason}.",
            c.feature_indices.len(),
            feature_list(drift, &c.feature_indices)
        ),
    }
}
