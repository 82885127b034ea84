//! Tests for the core data models.

use modelguard_core::errors::{ErrorCode, GuardError, InputError};
use modelguard_core::models::*;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("f{i}")).collect()
}

#[test]
fn feature_sample_rejects_empty_and_ragged() {
    assert!(matches!(
        FeatureSample::new(names(2), vec![]),
        Err(InputError::EmptyBatch { .. })
    ));
    assert!(matches!(
        FeatureSample::new(names(2), vec![vec![1.0, 2.0], vec![1.0]]),
        Err(InputError::RaggedBatch { row: 1, expected: 2, actual: 1 })
    ));
    assert!(matches!(
        FeatureSample::new(names(3), vec![vec![1.0, 2.0]]),
        Err(InputError::NameWidthMismatch { names: 3, width: 2 })
    ));
}

#[test]
fn deserialized_sample_is_checked() {
    let ragged = r#"{"feature_names":["a","b"],"rows":[[1,2],[3]]}"#;
    let err = serde_json::from_str::<FeatureSample>(ragged).unwrap_err();
    assert!(err.to_string().contains("row 1 has 1 values"));

    let empty = r#"{"feature_names":["a"],"rows":[]}"#;
    assert!(serde_json::from_str::<FeatureSample>(empty).is_err());

    let sample = FeatureSample::new(names(2), vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let json = serde_json::to_string(&sample).unwrap();
    let back: FeatureSample = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample);
}

#[test]
fn from_columns_names_the_short_column() {
    let err = FeatureSample::from_columns(vec![
        ("age".to_string(), vec![1.0, 2.0, 3.0]),
        ("income".to_string(), vec![10.0]),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        InputError::ColumnLengthMismatch {
            column: "income".to_string(),
            expected: 3,
            actual: 1,
        }
    );
}

#[test]
fn feature_sample_columns_and_compatibility() {
    let a = FeatureSample::from_columns(vec![
        ("age".to_string(), vec![1.0, 2.0, 3.0]),
        ("income".to_string(), vec![10.0, 20.0, 30.0]),
    ])
    .unwrap();
    assert_eq!(a.width(), 2);
    assert_eq!(a.len(), 3);
    assert_eq!(a.column(1), vec![10.0, 20.0, 30.0]);
    assert_eq!(a.index_of("income"), Some(1));

    let b = FeatureSample::new(
        vec!["age".to_string(), "salary".to_string()],
        vec![vec![1.0, 2.0]],
    )
    .unwrap();
    assert!(matches!(
        a.ensure_compatible(&b),
        Err(InputError::FeatureNameMismatch { index: 1, .. })
    ));

    let c = FeatureSample::new(names(3), vec![vec![1.0, 2.0, 3.0]]).unwrap();
    assert!(matches!(
        a.ensure_compatible(&c),
        Err(InputError::FeatureCountMismatch { reference: 2, current: 3 })
    ));
}

#[test]
fn label_distribution_counts() {
    let dist = LabelDistribution::from_labels(&[0, 1, 1], &[1, 1, 1, 0]);
    assert_eq!(dist.reference.get(&1), Some(&2));
    assert_eq!(dist.current.get(&1), Some(&3));
    assert_eq!(dist.current.get(&0), Some(&1));
}

#[test]
fn patch_status_transitions() {
    use PatchStatus::*;
    assert!(Created.can_transition_to(Validated));
    assert!(Created.can_transition_to(PendingValidation));
    assert!(Validated.can_transition_to(Applied));
    assert!(Applied.can_transition_to(RolledBack));
    assert!(!Rejected.can_transition_to(Applied));
    assert!(!Created.can_transition_to(Applied));
    assert!(!RolledBack.can_transition_to(Applied));
    assert!(Applied.is_attempted());
    assert!(!Validated.is_attempted());
    for status in [Created, PendingValidation, Validated, Rejected, Applied, RolledBack, Failed] {
        assert_eq!(PatchStatus::parse(status.as_str()), Some(status));
    }
}

#[test]
fn patch_configuration_is_tagged() {
    let config = PatchConfiguration::ThresholdTuning(ThresholdConfig {
        original_threshold: 0.5,
        new_threshold: 0.62,
    });
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["type"], "threshold_tuning");
    assert_eq!(json["new_threshold"], 0.62);

    let patch = Patch::new("model-a", "drift-1", config);
    assert_eq!(patch.patch_type, PatchType::ThresholdTuning);
    assert_eq!(patch.status, PatchStatus::Created);
    assert!(patch.configuration.feature_indices().is_empty());
}

#[test]
fn drift_type_serializes_screaming_case() {
    let json = serde_json::to_string(&DriftType::CovariateDrift).unwrap();
    assert_eq!(json, "\"COVARIATE_DRIFT\"");
    assert_eq!(DriftType::NoDrift.as_str(), "NO_DRIFT");
}

#[test]
fn telemetry_uses_camel_case() {
    let patch = Patch::new(
        "model-a",
        "drift-1",
        PatchConfiguration::ThresholdTuning(ThresholdConfig {
            original_threshold: 0.5,
            new_threshold: 0.4,
        }),
    );
    let dto = PatchTelemetry::from(&patch);
    let json = serde_json::to_value(&dto).unwrap();
    assert!(json.get("patchId").is_some());
    assert!(json.get("validationMetrics").is_some());
    assert_eq!(json["status"], "CREATED");
}

#[test]
fn error_codes_are_stable() {
    let err: GuardError = InputError::EmptyBatch {
        batch: "current".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "INPUT_ERROR");
    assert!(err.to_string().contains("current"));
}

#[test]
fn drift_telemetry_summarizes_result() {
    let result = DriftResult {
        id: "drift-1".to_string(),
        model_id: "model-a".to_string(),
        timestamp: chrono::Utc::now(),
        drift_type: DriftType::ConceptDrift,
        drift_score: 0.4,
        threshold: 0.2,
        is_drift_detected: true,
        feature_drifts: Vec::new(),
        statistical_tests: Vec::new(),
        corrupted_value_count: 0,
    };
    let dto = DriftTelemetry::from(&result);
    assert_eq!(dto.feature_count, 0);
    assert!(!dto.is_privatized);
    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json["modelId"], "model-a");
    assert_eq!(json["driftType"], "CONCEPT_DRIFT");
}

#[test]
fn tracing_init_is_idempotent() {
    let config = modelguard_core::config::ObservabilityConfig::default();
    modelguard_core::tracing_setup::init_from_config(&config);
    modelguard_core::tracing_setup::init_from_config(&config);
    modelguard_core::tracing_setup::events::window_evicted("m", 10);
}
