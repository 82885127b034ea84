//! Telemetry DTOs for optional backend sync. camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::drift_result::{DriftResult, DriftType};
use super::patch::{Patch, PatchStatus, PatchType};
use super::validation::ValidationMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftTelemetry {
    pub model_id: String,
    pub timestamp: DateTime<Utc>,
    pub drift_score: f64,
    pub drift_type: DriftType,
    pub feature_count: usize,
    /// Set by the host when the payload was privatized before upload.
    pub is_privatized: bool,
}

impl From<&DriftResult> for DriftTelemetry {
    fn from(result: &DriftResult) -> Self {
        Self {
            model_id: result.model_id.clone(),
            timestamp: result.timestamp,
            drift_score: result.drift_score,
            drift_type: result.drift_type,
            feature_count: result.feature_drifts.len(),
            is_privatized: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTelemetry {
    pub patch_id: String,
    pub model_id: String,
    pub patch_type: PatchType,
    pub status: PatchStatus,
    pub validation_metrics: Option<ValidationMetrics>,
    pub timestamp: DateTime<Utc>,
}

impl From<&Patch> for PatchTelemetry {
    fn from(patch: &Patch) -> Self {
        let timestamp = patch
            .rolled_back_at
            .or(patch.applied_at)
            .unwrap_or(patch.created_at);
        Self {
            patch_id: patch.id.clone(),
            model_id: patch.model_id.clone(),
            patch_type: patch.patch_type,
            status: patch.status,
            validation_metrics: patch
                .validation_result
                .as_ref()
                .and_then(|v| v.metrics.clone()),
            timestamp,
        }
    }
}
