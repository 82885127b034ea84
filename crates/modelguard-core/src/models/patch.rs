//! Patch models: narrowly scoped corrective configurations applied without retraining.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::ValidationResult;

/// Patch kind. Mirrors the [`PatchConfiguration`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchType {
    FeatureClipping,
    FeatureReweighting,
    ThresholdTuning,
    NormalizationUpdate,
}

impl PatchType {
    pub const ALL: [PatchType; 4] = [
        PatchType::FeatureClipping,
        PatchType::FeatureReweighting,
        PatchType::ThresholdTuning,
        PatchType::NormalizationUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatchType::FeatureClipping => "feature_clipping",
            PatchType::FeatureReweighting => "feature_reweighting",
            PatchType::ThresholdTuning => "threshold_tuning",
            PatchType::NormalizationUpdate => "normalization_update",
        }
    }
}

/// Clip drifted features into reference-derived bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClippingConfig {
    pub feature_indices: Vec<usize>,
    pub min_values: Vec<f64>,
    pub max_values: Vec<f64>,
}

/// Rescale drifted features by `new_weight / original_weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReweightingConfig {
    pub feature_indices: Vec<usize>,
    pub original_weights: Vec<f64>,
    pub new_weights: Vec<f64>,
}

/// Replace the model's decision threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub original_threshold: f64,
    pub new_threshold: f64,
}

/// Replace normalization parameters for drifted features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    pub feature_indices: Vec<usize>,
    pub original_means: Vec<f64>,
    pub original_stds: Vec<f64>,
    pub new_means: Vec<f64>,
    pub new_stds: Vec<f64>,
}

/// Exactly one configuration variant per patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatchConfiguration {
    FeatureClipping(ClippingConfig),
    FeatureReweighting(ReweightingConfig),
    ThresholdTuning(ThresholdConfig),
    NormalizationUpdate(NormalizationConfig),
}

impl PatchConfiguration {
    pub fn patch_type(&self) -> PatchType {
        match self {
            PatchConfiguration::FeatureClipping(_) => PatchType::FeatureClipping,
            PatchConfiguration::FeatureReweighting(_) => PatchType::FeatureReweighting,
            PatchConfiguration::ThresholdTuning(_) => PatchType::ThresholdTuning,
            PatchConfiguration::NormalizationUpdate(_) => PatchType::NormalizationUpdate,
        }
    }

    /// Feature indices touched by this configuration (empty for threshold tuning).
    pub fn feature_indices(&self) -> &[usize] {
        match self {
            PatchConfiguration::FeatureClipping(c) => &c.feature_indices,
            PatchConfiguration::FeatureReweighting(c) => &c.feature_indices,
            PatchConfiguration::ThresholdTuning(_) => &[],
            PatchConfiguration::NormalizationUpdate(c) => &c.feature_indices,
        }
    }
}

/// Patch lifecycle status.
///
/// `Created -> PendingValidation -> Validated | Rejected`, then
/// `Validated -> Applied | Failed`, and `Applied -> RolledBack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatchStatus {
    Created,
    PendingValidation,
    Validated,
    Rejected,
    Applied,
    RolledBack,
    Failed,
}

impl PatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchStatus::Created => "CREATED",
            PatchStatus::PendingValidation => "PENDING_VALIDATION",
            PatchStatus::Validated => "VALIDATED",
            PatchStatus::Rejected => "REJECTED",
            PatchStatus::Applied => "APPLIED",
            PatchStatus::RolledBack => "ROLLED_BACK",
            PatchStatus::Failed => "FAILED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CREATED" => Some(PatchStatus::Created),
            "PENDING_VALIDATION" => Some(PatchStatus::PendingValidation),
            "VALIDATED" => Some(PatchStatus::Validated),
            "REJECTED" => Some(PatchStatus::Rejected),
            "APPLIED" => Some(PatchStatus::Applied),
            "ROLLED_BACK" => Some(PatchStatus::RolledBack),
            "FAILED" => Some(PatchStatus::Failed),
            _ => None,
        }
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: PatchStatus) -> bool {
        use PatchStatus::*;
        matches!(
            (self, next),
            (Created, PendingValidation)
                | (Created, Validated)
                | (Created, Rejected)
                | (PendingValidation, Validated)
                | (PendingValidation, Rejected)
                | (Validated, Applied)
                | (Validated, Failed)
                | (Applied, RolledBack)
                | (Applied, Failed)
        )
    }

    /// Whether the patch was handed to the applicator (counts toward success rate).
    pub fn is_attempted(self) -> bool {
        matches!(
            self,
            PatchStatus::Applied | PatchStatus::Failed | PatchStatus::RolledBack
        )
    }
}

/// A synthesized patch and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub id: String,
    pub model_id: String,
    pub drift_result_id: String,
    pub patch_type: PatchType,
    pub configuration: PatchConfiguration,
    pub status: PatchStatus,
    pub created_at: DateTime<Utc>,
    pub applied_at: Option<DateTime<Utc>>,
    pub rolled_back_at: Option<DateTime<Utc>>,
    pub validation_result: Option<ValidationResult>,
    pub metadata: BTreeMap<String, String>,
}

impl Patch {
    /// Create a patch in the `Created` state with a fresh id.
    pub fn new(
        model_id: impl Into<String>,
        drift_result_id: impl Into<String>,
        configuration: PatchConfiguration,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            model_id: model_id.into(),
            drift_result_id: drift_result_id.into(),
            patch_type: configuration.patch_type(),
            configuration,
            status: PatchStatus::Created,
            created_at: Utc::now(),
            applied_at: None,
            rolled_back_at: None,
            validation_result: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Template summary attached at synthesis time, if any.
    pub fn summary(&self) -> Option<&str> {
        self.metadata
            .get(crate::constants::METADATA_SUMMARY)
            .map(String::as_str)
    }

    /// Safety score of the attached validation, if validated.
    pub fn safety_score(&self) -> Option<f64> {
        self.validation_result
            .as_ref()
            .and_then(|v| v.metrics.as_ref())
            .map(|m| m.safety_score)
    }
}
