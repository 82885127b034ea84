//! Label (target) distribution shift, used for prior-drift classification.

use modelguard_core::models::LabelDistribution;

use crate::stats::categorical_psi;

/// Categorical PSI between reference and current label proportions.
/// 0 when either side is empty.
pub fn label_shift_score(labels: &LabelDistribution) -> f64 {
    categorical_psi(&labels.reference, &labels.current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_vs_skewed() {
        let reference: Vec<u32> = (0..100).map(|i| i % 2).collect();
        let skewed: Vec<u32> = (0..100).map(|i| u32::from(i % 10 != 0)).collect();
        let same = LabelDistribution::from_labels(&reference, &reference);
        let shifted = LabelDistribution::from_labels(&reference, &skewed);
        assert!(label_shift_score(&same) < 1e-12);
        assert!(label_shift_score(&shifted) > 0.2);
    }
}
