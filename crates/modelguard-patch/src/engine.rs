//! FeaturePatchEngine: applies every configuration variant to raw feature rows.

use modelguard_core::errors::PatchError;
use modelguard_core::models::{
    ClippingConfig, NormalizationConfig, PatchConfiguration, ReweightingConfig,
};
use modelguard_core::traits::IPatchApplicator;

/// Stateless reference applicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeaturePatchEngine;

impl FeaturePatchEngine {
    pub fn new() -> Self {
        Self
    }
}

impl IPatchApplicator for FeaturePatchEngine {
    fn apply(
        &self,
        configuration: &PatchConfiguration,
        rows: &[Vec<f64>],
    ) -> Result<Vec<Vec<f64>>, PatchError> {
        let mut patched = rows.to_vec();
        match configuration {
            PatchConfiguration::FeatureClipping(c) => clip(c, &mut patched)?,
            PatchConfiguration::FeatureReweighting(c) => reweight(c, &mut patched)?,
            PatchConfiguration::NormalizationUpdate(c) => renormalize(c, &mut patched)?,
            // Features untouched; the threshold is picked up via `effective_threshold`.
            PatchConfiguration::ThresholdTuning(_) => {}
        }
        Ok(patched)
    }
}

fn malformed(patch_type: &str, reason: impl Into<String>) -> PatchError {
    PatchError::MalformedConfiguration {
        patch_type: patch_type.to_string(),
        reason: reason.into(),
    }
}

fn check_lengths(patch_type: &str, indices: usize, others: &[usize]) -> Result<(), PatchError> {
    if others.iter().any(|&len| len != indices) {
        return Err(malformed(
            patch_type,
            format!("{indices} feature indices but parameter lengths {others:?}"),
        ));
    }
    Ok(())
}

fn check_index(index: usize, row: &[f64]) -> Result<(), PatchError> {
    if index >= row.len() {
        return Err(PatchError::FeatureIndexOutOfRange {
            index,
            width: row.len(),
        });
    }
    Ok(())
}

fn clip(c: &ClippingConfig, rows: &mut [Vec<f64>]) -> Result<(), PatchError> {
    check_lengths(
        "feature_clipping",
        c.feature_indices.len(),
        &[c.min_values.len(), c.max_values.len()],
    )?;
    for (k, (&lo, &hi)) in c.min_values.iter().zip(c.max_values.iter()).enumerate() {
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Err(malformed(
                "feature_clipping",
                format!("bounds [{lo}, {hi}] for index {}", c.feature_indices[k]),
            ));
        }
    }
    for row in rows.iter_mut() {
        for (k, &index) in c.feature_indices.iter().enumerate() {
            check_index(index, row)?;
            row[index] = row[index].clamp(c.min_values[k], c.max_values[k]);
        }
    }
    Ok(())
}

fn reweight(c: &ReweightingConfig, rows: &mut [Vec<f64>]) -> Result<(), PatchError> {
    check_lengths(
        "feature_reweighting",
        c.feature_indices.len(),
        &[c.original_weights.len(), c.new_weights.len()],
    )?;
    if let Some(w) = c.original_weights.iter().find(|w| **w == 0.0 || !w.is_finite()) {
        return Err(malformed(
            "feature_reweighting",
            format!("original weight {w} cannot be rescaled"),
        ));
    }
    let factors: Vec<f64> = c
        .new_weights
        .iter()
        .zip(c.original_weights.iter())
        .map(|(new, orig)| new / orig)
        .collect();
    for row in rows.iter_mut() {
        for (k, &index) in c.feature_indices.iter().enumerate() {
            check_index(index, row)?;
            row[index] *= factors[k];
        }
    }
    Ok(())
}

/// Re-project current-scale values onto the reference scale:
/// `x -> (x - new_mean) / new_std * original_std + original_mean`.
fn renormalize(c: &NormalizationConfig, rows: &mut [Vec<f64>]) -> Result<(), PatchError> {
    check_lengths(
        "normalization_update",
        c.feature_indices.len(),
        &[
            c.original_means.len(),
            c.original_stds.len(),
            c.new_means.len(),
            c.new_stds.len(),
        ],
    )?;
    if let Some(s) = c.new_stds.iter().find(|s| **s <= 0.0 || !s.is_finite()) {
        return Err(malformed(
            "normalization_update",
            format!("replacement std {s} must be positive"),
        ));
    }
    for row in rows.iter_mut() {
        for (k, &index) in c.feature_indices.iter().enumerate() {
            check_index(index, row)?;
            let z = (row[index] - c.new_means[k]) / c.new_stds[k];
            row[index] = z * c.original_stds[k] + c.original_means[k];
        }
    }
    Ok(())
}
