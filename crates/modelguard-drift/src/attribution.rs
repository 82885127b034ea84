//! Feature attribution: each feature's share of the summed drift scores.

use serde::{Deserialize, Serialize};

use modelguard_core::models::FeatureDrift;

/// A feature's rank in the attribution ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAttribution {
    pub rank: usize,
    pub feature_name: String,
    pub feature_index: usize,
    pub attribution: f64,
    pub drift_score: f64,
}

/// Fill `attribution` on every feature: `score / Σ scores`, all 0 when the sum is 0.
///
/// Values travel with the feature, so permuting the input permutes the output.
pub fn attribute(features: &mut [FeatureDrift]) {
    let total: f64 = features.iter().map(|f| f.drift_score.max(0.0)).sum();
    for f in features.iter_mut() {
        f.attribution = if total > 0.0 {
            (f.drift_score.max(0.0) / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }
}

/// Features ordered by descending attribution, ties broken by feature name.
pub fn rank_features(features: &[FeatureDrift]) -> Vec<FeatureAttribution> {
    let mut ordered: Vec<&FeatureDrift> = features.iter().collect();
    ordered.sort_by(|a, b| {
        b.attribution
            .total_cmp(&a.attribution)
            .then_with(|| a.feature_name.cmp(&b.feature_name))
    });
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, f)| FeatureAttribution {
            rank: i + 1,
            feature_name: f.feature_name.clone(),
            feature_index: f.feature_index,
            attribution: f.attribution,
            drift_score: f.drift_score,
        })
        .collect()
}
