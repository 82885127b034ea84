//! Read-only analytics views over historical drift results and patches.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::drift_result::DriftType;

/// Inclusive date range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The last `days` days ending at `end`.
    pub fn last_days(end: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: end - chrono::Duration::days(days),
            end,
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// Direction of drift scores over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriftTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// Projected drift score for one day ahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftForecast {
    pub days_ahead: u32,
    pub forecast_date: DateTime<Utc>,
    /// Clamped to [0, 1].
    pub predicted_drift_score: f64,
    /// Clamped to [0, 1].
    pub confidence: f64,
}

/// Recommendation priority. Ordered LOW < MEDIUM < HIGH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// An actionable, rule-triggered recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
}

/// Average drift of one feature across the analysed history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDriftSummary {
    pub feature_name: String,
    pub avg_drift_score: f64,
    pub drifted_count: usize,
    pub occurrences: usize,
}

/// Patch outcome counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchStats {
    pub total: usize,
    pub applied: usize,
    pub failed: usize,
    pub rolled_back: usize,
    /// applied / (applied + failed + rolled back); 0 when none attempted.
    pub success_rate: f64,
    /// Mean safety score over validated patches; 0 when none.
    pub avg_safety_score: f64,
}

/// Aggregated analytics for one model over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAnalytics {
    pub model_id: String,
    pub range: DateRange,
    pub total_checks: usize,
    pub drift_detected_count: usize,
    pub drift_rate: f64,
    pub avg_drift_score: f64,
    pub min_drift_score: f64,
    pub max_drift_score: f64,
    pub drift_type_distribution: BTreeMap<DriftType, usize>,
    pub patch_stats: PatchStats,
    pub trend: DriftTrend,
    /// In [0, 100].
    pub health_score: f64,
    pub top_drifted_features: Vec<FeatureDriftSummary>,
    pub last_check: Option<DateTime<Utc>>,
    /// Empty when the history is too short to fit.
    pub forecasts: Vec<DriftForecast>,
    /// Sorted by descending priority.
    pub recommendations: Vec<Recommendation>,
}
