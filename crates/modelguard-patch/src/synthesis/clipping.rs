//! Clipping bounds from reference percentiles.

use modelguard_core::models::{ClippingConfig, FeatureSample, PatchConfiguration};
use modelguard_drift::stats::{finite_sorted, quantile};

/// Bounds each target feature to its reference `[lower_q, upper_q]` quantiles.
/// `None` when no target feature has finite reference values.
pub fn synthesize(
    targets: &[usize],
    reference: &FeatureSample,
    lower_q: f64,
    upper_q: f64,
) -> Option<PatchConfiguration> {
    let mut config = ClippingConfig {
        feature_indices: Vec::new(),
        min_values: Vec::new(),
        max_values: Vec::new(),
    };
    for &index in targets.iter().filter(|&&i| i < reference.width()) {
        let (sorted, _) = finite_sorted(&reference.column(index));
        if sorted.is_empty() {
            continue;
        }
        config.feature_indices.push(index);
        config.min_values.push(quantile(&sorted, lower_q));
        config.max_values.push(quantile(&sorted, upper_q));
    }
    (!config.feature_indices.is_empty()).then_some(PatchConfiguration::FeatureClipping(config))
}
