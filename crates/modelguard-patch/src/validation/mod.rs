//! PatchValidator: gates candidate patches on held-out data.
//!
//! Checks run in order and stop at the first rejection:
//! 1. sample size and label count
//! 2. apply the patch, run inference, confusion-matrix metrics
//! 3. safety score (drift reduction + accuracy retention)
//! 4. accuracy confidence interval
//! 5. performance delta against a baseline, when given
//! 6. precision/recall imbalance and minimum accuracy warnings
//!
//! A rejection is a normal outcome (`is_valid = false`), never an error.

pub mod metrics;

use std::sync::Arc;

use tracing::debug;

use modelguard_core::config::PatchConfig;
use modelguard_core::errors::PatchError;
use modelguard_core::models::{
    ConfusionMatrix, FeatureSample, Patch, PatchConfiguration, PatchStatus, ValidationMetrics,
    ValidationResult,
};
use modelguard_core::traits::{IInferenceModel, IPatchApplicator};
use modelguard_core::tracing_setup::events;
use modelguard_drift::DriftDetector;

use crate::lifecycle;

pub const INSUFFICIENT_DATA: &str = "Insufficient validation data";
pub const SAFETY_TOO_LOW: &str = "Safety score too low";
pub const DEGRADATION_TOO_HIGH: &str = "Performance degradation too high";
pub const REDUCES_ACCURACY: &str = "Patch reduces accuracy";
pub const IMBALANCED: &str = "Imbalanced precision/recall";
pub const BELOW_MIN_ACCURACY: &str = "Accuracy below minimum";
pub const APPLICATION_FAILED: &str = "Patch application failed";
pub const INCOMPATIBLE_DATA: &str = "Validation data incompatible with reference";

/// Drift measures before and after the patch.
struct DriftMeasure {
    before: f64,
    after: f64,
}

/// Validates patches against a fixed reference batch and model.
pub struct PatchValidator {
    config: PatchConfig,
    detector: DriftDetector,
    reference: Arc<FeatureSample>,
    applicator: Arc<dyn IPatchApplicator>,
    model: Arc<dyn IInferenceModel>,
}

impl PatchValidator {
    pub fn new(
        config: PatchConfig,
        detector: DriftDetector,
        reference: Arc<FeatureSample>,
        applicator: Arc<dyn IPatchApplicator>,
        model: Arc<dyn IInferenceModel>,
    ) -> Self {
        Self {
            config,
            detector,
            reference,
            applicator,
            model,
        }
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Decide whether `patch` is safe to promote.
    pub fn validate(
        &self,
        patch: &Patch,
        validation_data: &[Vec<f64>],
        validation_labels: &[u32],
        baseline: Option<&ValidationMetrics>,
    ) -> ValidationResult {
        let span = modelguard_core::patch_validation_span!(patch.id, patch.patch_type.as_str());
        let _guard = span.enter();

        let result = self.run_checks(patch, validation_data, validation_labels, baseline);
        match (&result.metrics, result.is_valid) {
            (Some(m), true) => events::patch_accepted(&patch.id, m.safety_score),
            _ => events::patch_rejected(&patch.id, &result.errors.join("; ")),
        }
        result
    }

    /// Validate and record the outcome on the patch: the result is attached and the
    /// status moves to `Validated` or `Rejected`.
    pub fn validate_patch(
        &self,
        patch: &mut Patch,
        validation_data: &[Vec<f64>],
        validation_labels: &[u32],
        baseline: Option<&ValidationMetrics>,
    ) -> Result<ValidationResult, PatchError> {
        let next = |valid: bool| {
            if valid {
                PatchStatus::Validated
            } else {
                PatchStatus::Rejected
            }
        };
        // Fail before doing any work when neither outcome is reachable.
        if !patch.status.can_transition_to(PatchStatus::Validated) {
            return Err(PatchError::InvalidTransition {
                from: patch.status,
                to: PatchStatus::Validated,
            });
        }
        let result = self.validate(patch, validation_data, validation_labels, baseline);
        lifecycle::transition(patch, next(result.is_valid))?;
        patch.validation_result = Some(result.clone());
        Ok(result)
    }

    fn run_checks(
        &self,
        patch: &Patch,
        data: &[Vec<f64>],
        labels: &[u32],
        baseline: Option<&ValidationMetrics>,
    ) -> ValidationResult {
        // 1. Sample size.
        if data.len() < self.config.min_sample_size || data.len() != labels.len() {
            return ValidationResult::rejected(format!(
                "{INSUFFICIENT_DATA}: {} samples and {} labels (minimum {})",
                data.len(),
                labels.len(),
                self.config.min_sample_size
            ));
        }

        // 2. Apply and infer.
        let configuration = &patch.configuration;
        let patched = match self.applicator.apply(configuration, data) {
            Ok(rows) => rows,
            Err(e) => return ValidationResult::rejected(format!("{APPLICATION_FAILED}: {e}")),
        };
        let base_threshold = self.model.decision_threshold();
        let threshold = self
            .applicator
            .effective_threshold(configuration, base_threshold);
        let unpatched_predictions = self.predict(data, base_threshold);
        let patched_predictions = self.predict(&patched, threshold);

        let confusion = ConfusionMatrix::from_pairs(
            patched_predictions.iter().copied().zip(labels.iter().copied()),
        );
        let unpatched_accuracy = ConfusionMatrix::from_pairs(
            unpatched_predictions.iter().copied().zip(labels.iter().copied()),
        )
        .accuracy();
        let accuracy = confusion.accuracy();
        let precision = confusion.precision();
        let recall = confusion.recall();

        // 3. Safety.
        let measure = match self.drift_measure(
            configuration,
            data,
            &patched,
            labels,
            &unpatched_predictions,
            &patched_predictions,
        ) {
            Ok(m) => m,
            Err(reason) => return ValidationResult::rejected(reason),
        };
        let drift_reduction = metrics::drift_reduction(measure.before, measure.after);
        let retention = metrics::accuracy_retention(accuracy, unpatched_accuracy);
        let safety_score =
            metrics::safety_score(drift_reduction, retention, self.config.drift_reduction_weight);
        debug!(
            drift_before = measure.before,
            drift_after = measure.after,
            accuracy,
            unpatched_accuracy,
            safety_score,
            "patch evaluated"
        );

        // 4. Confidence interval. Rejected results past this point still carry metrics.
        let (ci_lower, ci_upper) =
            metrics::wilson_interval(accuracy, data.len(), self.config.confidence_level);
        let performance_delta = baseline.map_or(0.0, |b| (accuracy - b.accuracy).abs());
        let validation_metrics = ValidationMetrics {
            accuracy,
            precision,
            recall,
            f1_score: confusion.f1_score(),
            drift_score_after_patch: measure.after,
            drift_reduction,
            performance_delta,
            safety_score,
            confidence_interval_lower: ci_lower,
            confidence_interval_upper: ci_upper,
        };
        let mut result = ValidationResult {
            is_valid: true,
            metrics: Some(validation_metrics),
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        if safety_score < self.config.min_safety_score {
            result.is_valid = false;
            result.errors.push(format!(
                "{SAFETY_TOO_LOW}: {safety_score:.3} < {:.3}",
                self.config.min_safety_score
            ));
            return result;
        }

        // 5. Baseline comparison.
        if let Some(b) = baseline {
            if performance_delta > self.config.max_performance_delta {
                result.is_valid = false;
                result.errors.push(format!(
                    "{DEGRADATION_TOO_HIGH}: delta {performance_delta:.3} > {:.3}",
                    self.config.max_performance_delta
                ));
                return result;
            }
            if accuracy < b.accuracy {
                result.warnings.push(format!(
                    "{REDUCES_ACCURACY} from {:.3} to {accuracy:.3}",
                    b.accuracy
                ));
            }
        }

        // 6. Warnings.
        if precision > 0.0
            && recall > 0.0
            && (precision - recall).abs() > self.config.imbalance_tolerance
        {
            result.warnings.push(format!(
                "{IMBALANCED}: precision {precision:.3}, recall {recall:.3}"
            ));
        }
        if accuracy < self.config.min_accuracy {
            result.warnings.push(format!(
                "{BELOW_MIN_ACCURACY}: {accuracy:.3} < {:.3}",
                self.config.min_accuracy
            ));
        }
        result
    }

    fn predict(&self, rows: &[Vec<f64>], threshold: f64) -> Vec<u32> {
        rows.iter()
            .map(|r| self.model.predict_with_threshold(r, threshold))
            .collect()
    }

    /// Feature-space drift against the reference for normalization and reweighting;
    /// excess tail mass outside the clip bounds for clipping; the gap between
    /// predicted and labelled positive rate for threshold tuning.
    fn drift_measure(
        &self,
        configuration: &PatchConfiguration,
        data: &[Vec<f64>],
        patched: &[Vec<f64>],
        labels: &[u32],
        unpatched_predictions: &[u32],
        patched_predictions: &[u32],
    ) -> Result<DriftMeasure, String> {
        if let PatchConfiguration::ThresholdTuning(_) = configuration {
            let label_rate = metrics::positive_rate(labels);
            return Ok(DriftMeasure {
                before: (metrics::positive_rate(unpatched_predictions) - label_rate).abs(),
                after: (metrics::positive_rate(patched_predictions) - label_rate).abs(),
            });
        }
        if let PatchConfiguration::FeatureClipping(clipping) = configuration {
            let reference = self.reference.rows();
            return Ok(DriftMeasure {
                before: metrics::tail_excess(clipping, data, reference),
                after: metrics::tail_excess(clipping, patched, reference),
            });
        }
        let score = |rows: &[Vec<f64>]| {
            self.reference
                .with_rows(rows.to_vec())
                .and_then(|sample| self.detector.drift_score(&self.reference, &sample))
                .map_err(|e| format!("{INCOMPATIBLE_DATA}: {e}"))
        };
        Ok(DriftMeasure {
            before: score(data)?,
            after: score(patched)?,
        })
    }
}
