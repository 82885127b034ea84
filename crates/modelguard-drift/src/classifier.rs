//! DriftClassifier: per-feature flags, aggregate drift score, and drift type.
//!
//! A pure function of the feature measurements and the configured thresholds.

use modelguard_core::config::DetectionConfig;
use modelguard_core::models::{DriftType, FeatureDrift};

/// Aggregate verdict for one analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub drift_score: f64,
    pub is_drift_detected: bool,
    pub drift_type: DriftType,
    pub drifted_fraction: f64,
}

#[derive(Debug, Clone)]
pub struct DriftClassifier {
    config: DetectionConfig,
}

impl DriftClassifier {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Per-feature drift score in [0, 1].
    ///
    /// `0.5 * min(psi / (2 * psi_threshold), 1) + 0.5 * ks`: a feature sitting exactly
    /// on the PSI threshold contributes 0.25 from PSI alone.
    pub fn feature_score(&self, psi_score: f64, ks_statistic: f64) -> f64 {
        let psi_component = (psi_score / (2.0 * self.config.psi_threshold)).min(1.0);
        (0.5 * psi_component + 0.5 * ks_statistic).clamp(0.0, 1.0)
    }

    /// A feature drifts when PSI exceeds its threshold or the KS test is significant.
    pub fn is_feature_drifted(&self, psi_score: f64, p_value: f64) -> bool {
        psi_score > self.config.psi_threshold || p_value <= self.config.ks_threshold
    }

    /// Mean of the per-feature scores, 0 with no features.
    pub fn aggregate_score(&self, features: &[FeatureDrift]) -> f64 {
        if features.is_empty() {
            return 0.0;
        }
        let sum: f64 = features.iter().map(|f| f.drift_score).sum();
        (sum / features.len() as f64).clamp(0.0, 1.0)
    }

    /// Classify an analysis.
    ///
    /// `label_shift` is the categorical PSI of the label distributions when the
    /// caller supplied them.
    pub fn classify(&self, features: &[FeatureDrift], label_shift: Option<f64>) -> Classification {
        let drift_score = self.aggregate_score(features);
        let is_drift_detected = drift_score > self.config.drift_threshold;
        let drifted_fraction = if features.is_empty() {
            0.0
        } else {
            features.iter().filter(|f| f.is_drifted).count() as f64 / features.len() as f64
        };

        let drift_type = if !is_drift_detected {
            DriftType::NoDrift
        } else if drifted_fraction > self.config.covariate_fraction {
            DriftType::CovariateDrift
        } else if label_shift.is_some_and(|s| s > self.config.label_shift_threshold) {
            DriftType::PriorDrift
        } else {
            DriftType::ConceptDrift
        };

        Classification {
            drift_score,
            is_drift_detected,
            drift_type,
            drifted_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelguard_core::models::DistributionShift;

    fn feature(index: usize, score: f64, drifted: bool) -> FeatureDrift {
        FeatureDrift {
            feature_name: format!("f{index}"),
            feature_index: index,
            drift_score: score,
            psi_score: 0.0,
            ks_statistic: 0.0,
            p_value: 1.0,
            is_drifted: drifted,
            attribution: 0.0,
            distribution_shift: DistributionShift::default(),
            corrupted_values: 0,
        }
    }

    fn classifier() -> DriftClassifier {
        DriftClassifier::new(DetectionConfig::default())
    }

    #[test]
    fn feature_score_is_bounded_and_monotone() {
        let c = classifier();
        assert_eq!(c.feature_score(0.0, 0.0), 0.0);
        assert_eq!(c.feature_score(100.0, 1.0), 1.0);
        assert!((c.feature_score(0.2, 0.0) - 0.25).abs() < 1e-12);
        assert!(c.feature_score(0.3, 0.1) > c.feature_score(0.2, 0.1));
        assert!(c.feature_score(0.2, 0.3) > c.feature_score(0.2, 0.1));
    }

    #[test]
    fn drift_flag_uses_either_test() {
        let c = classifier();
        assert!(c.is_feature_drifted(0.25, 0.9));
        assert!(c.is_feature_drifted(0.01, 0.01));
        assert!(!c.is_feature_drifted(0.1, 0.5));
    }

    #[test]
    fn no_drift_below_threshold() {
        let features = vec![feature(0, 0.05, false), feature(1, 0.1, false)];
        let result = classifier().classify(&features, None);
        assert!(!result.is_drift_detected);
        assert_eq!(result.drift_type, DriftType::NoDrift);
    }

    #[test]
    fn many_drifted_features_is_covariate() {
        let features = vec![
            feature(0, 0.8, true),
            feature(1, 0.7, true),
            feature(2, 0.1, false),
        ];
        let result = classifier().classify(&features, Some(5.0));
        assert_eq!(result.drift_type, DriftType::CovariateDrift);
    }

    #[test]
    fn few_drifted_features_with_label_shift_is_prior() {
        let features = vec![
            feature(0, 0.9, true),
            feature(1, 0.2, false),
            feature(2, 0.2, false),
        ];
        let result = classifier().classify(&features, Some(0.8));
        assert!(result.is_drift_detected);
        assert_eq!(result.drift_type, DriftType::PriorDrift);
    }

    #[test]
    fn few_drifted_features_without_label_shift_is_concept() {
        let features = vec![
            feature(0, 0.9, true),
            feature(1, 0.2, false),
            feature(2, 0.2, false),
        ];
        let result = classifier().classify(&features, Some(0.01));
        assert_eq!(result.drift_type, DriftType::ConceptDrift);
        let result = classifier().classify(&features, None);
        assert_eq!(result.drift_type, DriftType::ConceptDrift);
    }

    #[test]
    fn covariate_fraction_is_tunable() {
        let features = vec![
            feature(0, 0.9, true),
            feature(1, 0.2, false),
            feature(2, 0.2, false),
        ];
        let config = DetectionConfig {
            covariate_fraction: 0.3,
            ..Default::default()
        };
        let result = DriftClassifier::new(config).classify(&features, None);
        assert_eq!(result.drift_type, DriftType::CovariateDrift);
    }
}
