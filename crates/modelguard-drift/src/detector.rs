//! DriftDetector: full analysis of a reference/current batch pair.

use chrono::Utc;
use rayon::prelude::*;
use tracing::debug;

use modelguard_core::config::DetectionConfig;
use modelguard_core::errors::InputError;
use modelguard_core::models::{DriftResult, FeatureDrift, FeatureSample, LabelDistribution};
use modelguard_core::tracing_setup::events;

use crate::attribution::attribute;
use crate::classifier::DriftClassifier;
use crate::label_shift::label_shift_score;
use crate::suite::{FeatureComparison, StatisticalTestSuite};

/// Runs the statistical suite per feature, classifies, and attributes.
///
/// Stateless between calls: analyses for different models may run concurrently
/// on the same detector.
#[derive(Debug, Clone)]
pub struct DriftDetector {
    config: DetectionConfig,
    suite: StatisticalTestSuite,
    classifier: DriftClassifier,
}

impl DriftDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            suite: StatisticalTestSuite::new(&config),
            classifier: DriftClassifier::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn suite(&self) -> &StatisticalTestSuite {
        &self.suite
    }

    pub fn classifier(&self) -> &DriftClassifier {
        &self.classifier
    }

    /// Analyze `current` against `reference` for `model_id`.
    pub fn detect(
        &self,
        model_id: &str,
        reference: &FeatureSample,
        current: &FeatureSample,
    ) -> Result<DriftResult, InputError> {
        self.detect_with_labels(model_id, reference, current, None)
    }

    /// Analyze with optional label distributions, which enable prior-drift classification.
    ///
    /// Fails with an [`InputError`] when the batches are incompatible or any feature
    /// has more than `max_corrupted_fraction` non-finite values.
    pub fn detect_with_labels(
        &self,
        model_id: &str,
        reference: &FeatureSample,
        current: &FeatureSample,
        labels: Option<&LabelDistribution>,
    ) -> Result<DriftResult, InputError> {
        reference.ensure_compatible(current)?;
        let span = modelguard_core::drift_analysis_span!(model_id, reference.width());
        let _guard = span.enter();

        let comparisons = self.compare_all(reference, current);
        self.check_corruption(&comparisons)?;

        let statistical_tests = comparisons
            .iter()
            .flat_map(|c| [c.psi_test.clone(), c.ks_test.clone()])
            .collect();
        let corrupted_value_count = comparisons.iter().map(|c| c.corrupted_values).sum();

        let mut feature_drifts: Vec<FeatureDrift> = comparisons
            .into_iter()
            .map(|c| self.to_feature_drift(c))
            .collect();
        attribute(&mut feature_drifts);

        let label_shift = labels.map(label_shift_score);
        let classification = self.classifier.classify(&feature_drifts, label_shift);

        let result = DriftResult {
            id: uuid::Uuid::new_v4().to_string(),
            model_id: model_id.to_string(),
            timestamp: Utc::now(),
            drift_type: classification.drift_type,
            drift_score: classification.drift_score,
            threshold: self.config.drift_threshold,
            is_drift_detected: classification.is_drift_detected,
            feature_drifts,
            statistical_tests,
            corrupted_value_count,
        };

        if result.is_drift_detected {
            events::drift_detected(
                model_id,
                result.drift_score,
                result.drift_type.as_str(),
                result.drifted_features().count(),
            );
        } else {
            debug!(model_id, drift_score = result.drift_score, "no drift");
        }
        Ok(result)
    }

    /// Aggregate drift score only, without building a full result.
    pub fn drift_score(
        &self,
        reference: &FeatureSample,
        current: &FeatureSample,
    ) -> Result<f64, InputError> {
        reference.ensure_compatible(current)?;
        let comparisons = self.compare_all(reference, current);
        self.check_corruption(&comparisons)?;
        let feature_drifts: Vec<FeatureDrift> = comparisons
            .into_iter()
            .map(|c| self.to_feature_drift(c))
            .collect();
        Ok(self.classifier.aggregate_score(&feature_drifts))
    }

    fn compare_all(
        &self,
        reference: &FeatureSample,
        current: &FeatureSample,
    ) -> Vec<FeatureComparison> {
        reference
            .feature_names()
            .par_iter()
            .enumerate()
            .map(|(index, name)| {
                self.suite
                    .compare(name, index, &reference.column(index), &current.column(index))
            })
            .collect()
    }

    fn check_corruption(&self, comparisons: &[FeatureComparison]) -> Result<(), InputError> {
        for c in comparisons.iter().filter(|c| c.corrupted_values > 0) {
            if c.corrupted_fraction() > self.config.max_corrupted_fraction {
                return Err(InputError::CorruptedFeature {
                    feature: c.feature_name.clone(),
                    corrupted: c.corrupted_values,
                    total: c.total_values,
                });
            }
            events::corrupted_input(&c.feature_name, c.corrupted_values, c.total_values);
        }
        Ok(())
    }

    fn to_feature_drift(&self, c: FeatureComparison) -> FeatureDrift {
        FeatureDrift {
            drift_score: self.classifier.feature_score(c.psi_score, c.ks_statistic),
            is_drifted: self.classifier.is_feature_drifted(c.psi_score, c.p_value),
            feature_name: c.feature_name,
            feature_index: c.feature_index,
            psi_score: c.psi_score,
            ks_statistic: c.ks_statistic,
            p_value: c.p_value,
            attribution: 0.0,
            distribution_shift: c.distribution_shift,
            corrupted_values: c.corrupted_values,
        }
    }
}
