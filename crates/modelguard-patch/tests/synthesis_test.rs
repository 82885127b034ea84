//! Patch synthesis from detected drift.

use std::sync::Arc;

use modelguard_core::config::{DetectionConfig, PatchConfig};
use modelguard_core::constants::{METADATA_DRIFT_SCORE, METADATA_SUMMARY};
use modelguard_core::models::{PatchConfiguration, PatchStatus, PatchType};
use modelguard_drift::DriftDetector;
use modelguard_patch::{LinearScoreModel, PatchSynthesizer};
use test_fixtures::{batch_with_means, normal_batch};

fn model() -> Arc<LinearScoreModel> {
    Arc::new(LinearScoreModel::new(vec![1.0, 1.0, 1.0], 0.0))
}

#[test]
fn no_drift_yields_no_candidates() {
    let reference = normal_batch(1000, 3, 0.0, 1.0, 1);
    let current = normal_batch(1000, 3, 0.0, 1.0, 2);
    let drift = DriftDetector::new(DetectionConfig::default())
        .detect("m", &reference, &current)
        .unwrap();

    let patches = PatchSynthesizer::new(PatchConfig::default())
        .with_model(model())
        .synthesize(&drift, &reference, &current)
        .unwrap();
    assert!(patches.is_empty());
}

#[test]
fn drift_yields_one_candidate_per_type() {
    let reference = normal_batch(1000, 3, 0.0, 1.0, 1);
    let current = normal_batch(1000, 3, 2.0, 1.0, 2);
    let drift = DriftDetector::new(DetectionConfig::default())
        .detect("model-x", &reference, &current)
        .unwrap();

    let patches = PatchSynthesizer::new(PatchConfig::default())
        .with_model(model())
        .synthesize(&drift, &reference, &current)
        .unwrap();

    let types: Vec<PatchType> = patches.iter().map(|p| p.patch_type).collect();
    assert_eq!(types, PatchType::ALL.to_vec());
    for patch in &patches {
        assert_eq!(patch.model_id, "model-x");
        assert_eq!(patch.drift_result_id, drift.id);
        assert_eq!(patch.status, PatchStatus::Created);
        assert_eq!(patch.patch_type, patch.configuration.patch_type());
        assert!(patch.validation_result.is_none());
        assert!(!patch.summary().unwrap().is_empty());
        assert!(patch.metadata.contains_key(METADATA_SUMMARY));
        assert!(patch.metadata.contains_key(METADATA_DRIFT_SCORE));
    }
}

#[test]
fn threshold_tuning_needs_a_model() {
    let reference = normal_batch(500, 3, 0.0, 1.0, 1);
    let current = normal_batch(500, 3, 2.0, 1.0, 2);
    let drift = DriftDetector::new(DetectionConfig::default())
        .detect("m", &reference, &current)
        .unwrap();

    let patches = PatchSynthesizer::new(PatchConfig::default())
        .synthesize(&drift, &reference, &current)
        .unwrap();
    assert_eq!(patches.len(), 3);
    assert!(patches.iter().all(|p| p.patch_type != PatchType::ThresholdTuning));
}

#[test]
fn only_drifted_features_are_clipped_and_renormalized() {
    let reference = batch_with_means(1000, &[0.0, 0.0, 0.0], 1);
    let current = batch_with_means(1000, &[0.0, 3.0, 0.0], 2);
    let drift = DriftDetector::new(DetectionConfig::default())
        .detect("m", &reference, &current)
        .unwrap();

    let patches = PatchSynthesizer::new(PatchConfig::default())
        .synthesize_types(
            &[PatchType::FeatureClipping, PatchType::NormalizationUpdate],
            &drift,
            &reference,
            &current,
        )
        .unwrap();

    assert_eq!(patches.len(), 2);
    for patch in &patches {
        assert_eq!(patch.configuration.feature_indices(), &[1]);
    }
    let PatchConfiguration::FeatureClipping(clip) = &patches[0].configuration else {
        panic!("expected clipping first");
    };
    assert!(clip.min_values[0] < -2.0 && clip.min_values[0] > -2.6);
    assert!(clip.max_values[0] > 2.0 && clip.max_values[0] < 2.6);
}

#[test]
fn reweighting_respects_supplied_weights() {
    let reference = batch_with_means(1000, &[0.0, 0.0], 1);
    let current = batch_with_means(1000, &[2.0, 0.0], 2);
    let drift = DriftDetector::new(DetectionConfig::default())
        .detect("m", &reference, &current)
        .unwrap();

    let patches = PatchSynthesizer::new(PatchConfig::default())
        .with_feature_weights(vec![2.0, 4.0])
        .synthesize_types(&[PatchType::FeatureReweighting], &drift, &reference, &current)
        .unwrap();

    let PatchConfiguration::FeatureReweighting(c) = &patches[0].configuration else {
        panic!("expected reweighting");
    };
    assert_eq!(c.original_weights, vec![2.0, 4.0]);
    let total: f64 = c.new_weights.iter().sum();
    assert!((total - 6.0).abs() < 1e-9);
    assert!(c.new_weights[0] / 2.0 < c.new_weights[1] / 4.0);
}

#[test]
fn incompatible_batches_are_rejected() {
    let reference = normal_batch(100, 3, 0.0, 1.0, 1);
    let current = normal_batch(100, 2, 2.0, 1.0, 2);
    let drift = DriftDetector::new(DetectionConfig::default())
        .detect("m", &reference, &reference)
        .unwrap();
    let result = PatchSynthesizer::new(PatchConfig::default()).synthesize(&drift, &reference, &current);
    assert!(result.is_err());
}
