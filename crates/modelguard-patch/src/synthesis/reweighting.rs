//! Weights inversely proportional to per-feature drift.

use modelguard_core::models::{DriftResult, PatchConfiguration, ReweightingConfig};

/// `newᵢ ∝ originalᵢ / (1 + drift_scoreᵢ)`, rescaled so Σ new = Σ original.
///
/// Covers every feature with a non-zero original weight, so the least drifted
/// features absorb the weight taken from the most drifted ones. `None` when no
/// feature drifted at all.
pub fn synthesize(drift: &DriftResult, original_weights: &[f64]) -> Option<PatchConfiguration> {
    if drift.feature_drifts.iter().all(|f| f.drift_score <= 0.0) {
        return None;
    }
    let mut config = ReweightingConfig {
        feature_indices: Vec::new(),
        original_weights: Vec::new(),
        new_weights: Vec::new(),
    };
    for f in &drift.feature_drifts {
        let Some(&weight) = original_weights.get(f.feature_index) else {
            continue;
        };
        if weight == 0.0 || !weight.is_finite() {
            continue;
        }
        config.feature_indices.push(f.feature_index);
        config.original_weights.push(weight);
        config.new_weights.push(weight / (1.0 + f.drift_score.clamp(0.0, 1.0)));
    }

    let original_sum: f64 = config.original_weights.iter().sum();
    let raw_sum: f64 = config.new_weights.iter().sum();
    if config.feature_indices.is_empty() || raw_sum == 0.0 {
        return None;
    }
    let scale = original_sum / raw_sum;
    for w in config.new_weights.iter_mut() {
        *w *= scale;
    }
    Some(PatchConfiguration::FeatureReweighting(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelguard_core::models::DriftType;
    use test_fixtures::feature_drift;

    fn drift(scores: &[f64]) -> DriftResult {
        DriftResult {
            id: "d".into(),
            model_id: "m".into(),
            timestamp: chrono::Utc::now(),
            drift_type: DriftType::CovariateDrift,
            drift_score: 0.5,
            threshold: 0.2,
            is_drift_detected: true,
            feature_drifts: scores
                .iter()
                .enumerate()
                .map(|(i, s)| feature_drift(&format!("f{i}"), i, *s, *s > 0.5))
                .collect(),
            statistical_tests: Vec::new(),
            corrupted_value_count: 0,
        }
    }

    #[test]
    fn drifted_features_lose_weight_and_total_is_kept() {
        let Some(PatchConfiguration::FeatureReweighting(c)) =
            synthesize(&drift(&[0.9, 0.1, 0.0]), &[1.0, 1.0, 1.0])
        else {
            panic!("expected reweighting configuration");
        };
        let total: f64 = c.new_weights.iter().sum();
        assert!((total - 3.0).abs() < 1e-12);
        assert!(c.new_weights[0] < 1.0);
        assert!(c.new_weights[0] < c.new_weights[1]);
        assert!(c.new_weights[1] < c.new_weights[2]);
    }

    #[test]
    fn nothing_to_reweight_without_drift() {
        assert!(synthesize(&drift(&[0.0, 0.0]), &[1.0, 1.0]).is_none());
    }
}
