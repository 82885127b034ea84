//! PatchSynthesizer: candidate patches for a detected drift.
//!
//! Synthesis never touches a model: every candidate is a side-effect-free
//! [`PatchConfiguration`] wrapped in a fresh [`Patch`] with a template summary.

pub mod clipping;
pub mod normalization;
pub mod reweighting;
pub mod threshold;

use std::sync::Arc;

use tracing::{debug, warn};

use modelguard_core::config::PatchConfig;
use modelguard_core::constants::{METADATA_DRIFT_SCORE, METADATA_SUMMARY};
use modelguard_core::errors::InputError;
use modelguard_core::models::{DriftResult, FeatureSample, Patch, PatchConfiguration, PatchType};
use modelguard_core::traits::IInferenceModel;

use crate::explanation;

pub struct PatchSynthesizer {
    config: PatchConfig,
    model: Option<Arc<dyn IInferenceModel>>,
    feature_weights: Option<Vec<f64>>,
}

impl PatchSynthesizer {
    pub fn new(config: PatchConfig) -> Self {
        Self {
            config,
            model: None,
            feature_weights: None,
        }
    }

    /// Enable threshold tuning, which needs model scores.
    pub fn with_model(mut self, model: Arc<dyn IInferenceModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Current per-feature weights used as the reweighting baseline (1.0 each by default).
    pub fn with_feature_weights(mut self, weights: Vec<f64>) -> Self {
        self.feature_weights = Some(weights);
        self
    }

    /// One candidate per patch type. Empty when no drift was detected.
    pub fn synthesize(
        &self,
        drift: &DriftResult,
        reference: &FeatureSample,
        current: &FeatureSample,
    ) -> Result<Vec<Patch>, InputError> {
        self.synthesize_types(&PatchType::ALL, drift, reference, current)
    }

    /// One candidate per requested patch type that applies to this drift.
    pub fn synthesize_types(
        &self,
        types: &[PatchType],
        drift: &DriftResult,
        reference: &FeatureSample,
        current: &FeatureSample,
    ) -> Result<Vec<Patch>, InputError> {
        reference.ensure_compatible(current)?;
        if !drift.is_drift_detected {
            debug!(drift_result_id = %drift.id, "no drift detected, nothing to synthesize");
            return Ok(Vec::new());
        }
        let span = modelguard_core::patch_synthesis_span!(drift.id);
        let _guard = span.enter();

        let patches: Vec<Patch> = types
            .iter()
            .filter_map(|&t| self.configuration_for(t, drift, reference, current))
            .map(|configuration| {
                let summary = explanation::summarize(&configuration, drift);
                let mut patch = Patch::new(&drift.model_id, &drift.id, configuration);
                patch.metadata.insert(METADATA_SUMMARY.to_string(), summary);
                patch
                    .metadata
                    .insert(METADATA_DRIFT_SCORE.to_string(), format!("{:.6}", drift.drift_score));
                patch
            })
            .collect();
        debug!(candidates = patches.len(), "patch candidates synthesized");
        Ok(patches)
    }

    /// The configuration for one patch type, if it applies.
    pub fn configuration_for(
        &self,
        patch_type: PatchType,
        drift: &DriftResult,
        reference: &FeatureSample,
        current: &FeatureSample,
    ) -> Option<PatchConfiguration> {
        let targets = target_features(drift);
        match patch_type {
            PatchType::FeatureClipping => clipping::synthesize(
                &targets,
                reference,
                self.config.clip_lower_quantile,
                self.config.clip_upper_quantile,
            ),
            PatchType::FeatureReweighting => {
                let weights = self
                    .feature_weights
                    .clone()
                    .unwrap_or_else(|| vec![1.0; reference.width()]);
                reweighting::synthesize(drift, &weights)
            }
            PatchType::ThresholdTuning => match &self.model {
                Some(model) => threshold::synthesize(model.as_ref(), reference, current),
                None => {
                    warn!("threshold tuning skipped: no inference model configured");
                    None
                }
            },
            PatchType::NormalizationUpdate => {
                normalization::synthesize(&targets, reference, current)
            }
        }
    }
}

/// Indices of flagged features, or the single highest-scoring feature when the
/// aggregate crossed the threshold without any individual flag.
fn target_features(drift: &DriftResult) -> Vec<usize> {
    let flagged: Vec<usize> = drift.drifted_features().map(|f| f.feature_index).collect();
    if !flagged.is_empty() {
        return flagged;
    }
    drift
        .feature_drifts
        .iter()
        .filter(|f| f.drift_score > 0.0)
        .max_by(|a, b| a.drift_score.total_cmp(&b.drift_score))
        .map(|f| vec![f.feature_index])
        .unwrap_or_default()
}
