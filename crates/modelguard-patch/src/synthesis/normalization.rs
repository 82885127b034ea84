//! Replacement normalization parameters from the current sample.

use modelguard_core::models::{FeatureSample, NormalizationConfig, PatchConfiguration};
use modelguard_drift::stats::{finite_sorted, mean, std_dev};

/// Reference mean/std as the original parameters, current mean/std as the
/// replacements, for every target feature whose current column varies.
pub fn synthesize(
    targets: &[usize],
    reference: &FeatureSample,
    current: &FeatureSample,
) -> Option<PatchConfiguration> {
    let mut config = NormalizationConfig {
        feature_indices: Vec::new(),
        original_means: Vec::new(),
        original_stds: Vec::new(),
        new_means: Vec::new(),
        new_stds: Vec::new(),
    };
    for &index in targets.iter().filter(|&&i| i < reference.width()) {
        let (ref_col, _) = finite_sorted(&reference.column(index));
        let (cur_col, _) = finite_sorted(&current.column(index));
        if ref_col.is_empty() || cur_col.is_empty() {
            continue;
        }
        let new_std = std_dev(&cur_col);
        if new_std <= 0.0 {
            continue;
        }
        config.feature_indices.push(index);
        config.original_means.push(mean(&ref_col));
        config.original_stds.push(std_dev(&ref_col));
        config.new_means.push(mean(&cur_col));
        config.new_stds.push(new_std);
    }
    (!config.feature_indices.is_empty()).then_some(PatchConfiguration::NormalizationUpdate(config))
}
