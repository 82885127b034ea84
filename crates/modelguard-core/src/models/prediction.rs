//! Live prediction tracking models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confusion::ConfusionMatrix;

/// One (prediction, ground truth) pair appended to a model's rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub model_id: String,
    pub predicted_class: u32,
    pub actual_class: u32,
    /// Confidence of the predicted class, in [0, 1].
    pub confidence: f64,
    pub features: Vec<f64>,
    pub timestamp: DateTime<Utc>,
    /// Mirrors `predicted_class == actual_class`; metrics read [`Self::is_hit`].
    pub is_correct: bool,
}

impl PredictionRecord {
    /// Build a record stamped now; `is_correct` is derived from the classes.
    pub fn new(
        model_id: impl Into<String>,
        predicted_class: u32,
        actual_class: u32,
        confidence: f64,
        features: Vec<f64>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            predicted_class,
            actual_class,
            confidence,
            features,
            timestamp: Utc::now(),
            is_correct: predicted_class == actual_class,
        }
    }

    /// Whether the prediction matched, derived from the classes.
    pub fn is_hit(&self) -> bool {
        self.predicted_class == self.actual_class
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Metrics recomputed from a model's window after every insertion.
/// Replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub model_id: String,
    /// Predictions recorded for the model when these metrics were computed,
    /// evicted ones included. Strictly increases per model, so a listener can
    /// drop a push whose sequence is not above the last one it saw.
    #[serde(default)]
    pub sequence: usize,
    pub sample_count: usize,
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub matthews_correlation: f64,
    pub expected_calibration_error: f64,
    /// Early-half accuracy minus recent-half accuracy. Positive means degradation.
    pub accuracy_drift: f64,
    /// 0.5 when not computable.
    pub roc_auc: f64,
    /// 0.0 when not computable.
    pub pr_auc: f64,
    pub updated_at: DateTime<Utc>,
}

/// Accuracy of the window at the time of one insertion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracySnapshot {
    pub timestamp: DateTime<Utc>,
    pub accuracy: f64,
    pub sample_count: usize,
}

/// Direction of recent accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccuracyTrend {
    Improving,
    Stable,
    Degrading,
    InsufficientData,
}

/// Summary over a model's accuracy snapshot history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub model_id: String,
    pub current_accuracy: f64,
    pub trend: AccuracyTrend,
    pub prediction_count: usize,
    pub min_accuracy: f64,
    pub avg_accuracy: f64,
    pub max_accuracy: f64,
    pub std_dev: f64,
}
