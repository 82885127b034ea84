//! Patch JSON export shape.
//!
//! ```json
//! { "patch_id": "...", "model_id": "...", "drift_result_id": "...",
//!   "patch_type": "normalization_update", "status": "VALIDATED",
//!   "created_at": "2024-01-01T00:00:00Z", "applied_at": null, "rolled_back_at": null,
//!   "configuration": { "type": "normalization_update", "feature_indices": [0], ... },
//!   "validation": { "is_valid": true, "accuracy": 0.9, ... },
//!   "metadata": { "summary": "..." } }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use modelguard_core::errors::{ExportError, GuardResult};
use modelguard_core::models::{
    Patch, PatchConfiguration, PatchStatus, PatchType, ValidationMetrics, ValidationResult,
};

/// Flattened validation outcome. Metric fields are absent when validation
/// stopped before metrics were computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationExport {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f1_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_reduction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_delta: Option<f64>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchExport {
    pub patch_id: String,
    pub model_id: String,
    pub drift_result_id: String,
    pub patch_type: PatchType,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub applied_at: Option<String>,
    #[serde(default)]
    pub rolled_back_at: Option<String>,
    pub configuration: PatchConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationExport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ExportError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ExportError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

impl From<&Patch> for PatchExport {
    fn from(patch: &Patch) -> Self {
        let validation = patch.validation_result.as_ref().map(|v| {
            let m = v.metrics.as_ref();
            ValidationExport {
                is_valid: v.is_valid,
                accuracy: m.map(|m| m.accuracy),
                f1_score: m.map(|m| m.f1_score),
                safety_score: m.map(|m| m.safety_score),
                drift_reduction: m.map(|m| m.drift_reduction),
                performance_delta: m.map(|m| m.performance_delta),
                errors: v.errors.clone(),
            }
        });
        Self {
            patch_id: patch.id.clone(),
            model_id: patch.model_id.clone(),
            drift_result_id: patch.drift_result_id.clone(),
            patch_type: patch.patch_type,
            status: patch.status.as_str().to_string(),
            created_at: timestamp(&patch.created_at),
            applied_at: patch.applied_at.as_ref().map(timestamp),
            rolled_back_at: patch.rolled_back_at.as_ref().map(timestamp),
            configuration: patch.configuration.clone(),
            validation,
            metadata: (!patch.metadata.is_empty()).then(|| patch.metadata.clone()),
        }
    }
}

impl PatchExport {
    /// Rebuild the patch.
    ///
    /// Metrics outside the export shape come back as 0, with the confidence
    /// interval collapsed onto the exported accuracy.
    pub fn into_patch(self) -> Result<Patch, ExportError> {
        let status = PatchStatus::parse(&self.status)
            .ok_or_else(|| ExportError::UnknownStatus(self.status.clone()))?;
        let actual = self.configuration.patch_type();
        if actual != self.patch_type {
            return Err(ExportError::TypeMismatch {
                declared: self.patch_type.as_str().to_string(),
                actual: actual.as_str().to_string(),
            });
        }
        let validation_result = self.validation.map(|v| {
            let metrics = v.accuracy.map(|accuracy| ValidationMetrics {
                accuracy,
                precision: 0.0,
                recall: 0.0,
                f1_score: v.f1_score.unwrap_or(0.0),
                drift_score_after_patch: 0.0,
                drift_reduction: v.drift_reduction.unwrap_or(0.0),
                performance_delta: v.performance_delta.unwrap_or(0.0),
                safety_score: v.safety_score.unwrap_or(0.0),
                confidence_interval_lower: accuracy,
                confidence_interval_upper: accuracy,
            });
            ValidationResult {
                is_valid: v.is_valid,
                metrics,
                errors: v.errors,
                warnings: Vec::new(),
            }
        });
        Ok(Patch {
            id: self.patch_id,
            model_id: self.model_id,
            drift_result_id: self.drift_result_id,
            patch_type: self.patch_type,
            configuration: self.configuration,
            status,
            created_at: parse_timestamp(&self.created_at)?,
            applied_at: self.applied_at.as_deref().map(parse_timestamp).transpose()?,
            rolled_back_at: self.rolled_back_at.as_deref().map(parse_timestamp).transpose()?,
            validation_result,
            metadata: self.metadata.unwrap_or_default(),
        })
    }
}

/// Pretty-printed export JSON for `patch`.
pub fn to_json(patch: &Patch) -> GuardResult<String> {
    Ok(serde_json::to_string_pretty(&PatchExport::from(patch))?)
}

/// Parse an export document back into a patch.
pub fn from_json(json: &str) -> GuardResult<Patch> {
    let export: PatchExport = serde_json::from_str(json)?;
    Ok(export.into_patch()?)
}
