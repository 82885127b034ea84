//! Drift analysis results: per-test, per-feature, and aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one statistical test on one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalTestResult {
    /// Test name, prefixed with the feature (`"psi:age"`, `"ks:age"`).
    pub test_name: String,
    pub statistic: f64,
    /// p-value in [0, 1]. PSI has no p-value and reports 1.0 when passed, 0.0 otherwise.
    pub p_value: f64,
    pub threshold: f64,
    pub is_passed: bool,
}

/// Drift classification for an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriftType {
    /// P(Y|X) changed: aggregate drift is high but few features cross their thresholds.
    ConceptDrift,
    /// P(X) changed across many features.
    CovariateDrift,
    /// P(Y) changed.
    PriorDrift,
    NoDrift,
}

impl DriftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftType::ConceptDrift => "CONCEPT_DRIFT",
            DriftType::CovariateDrift => "COVARIATE_DRIFT",
            DriftType::PriorDrift => "PRIOR_DRIFT",
            DriftType::NoDrift => "NO_DRIFT",
        }
    }
}

/// Shift of one quantile between reference and current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileShift {
    pub quantile: f64,
    pub shift: f64,
}

/// Descriptive-statistic deltas (current minus reference).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionShift {
    pub mean_shift: f64,
    pub std_shift: f64,
    pub min_shift: f64,
    pub max_shift: f64,
    pub quantile_shifts: Vec<QuantileShift>,
}

/// Drift measurements for a single feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    pub feature_name: String,
    pub feature_index: usize,
    /// Combined PSI/KS score in [0, 1].
    pub drift_score: f64,
    /// PSI, >= 0.
    pub psi_score: f64,
    /// KS statistic in [0, 1].
    pub ks_statistic: f64,
    /// KS p-value in [0, 1].
    pub p_value: f64,
    pub is_drifted: bool,
    /// Share of the aggregate drift attributed to this feature, in [0, 1].
    pub attribution: f64,
    pub distribution_shift: DistributionShift,
    /// Non-finite values excluded from both samples.
    pub corrupted_values: usize,
}

/// Aggregate drift analysis for one model and one reference/current pair.
/// Immutable once created; persistence belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftResult {
    pub id: String,
    pub model_id: String,
    pub timestamp: DateTime<Utc>,
    pub drift_type: DriftType,
    /// Aggregate score in [0, 1].
    pub drift_score: f64,
    pub threshold: f64,
    pub is_drift_detected: bool,
    pub feature_drifts: Vec<FeatureDrift>,
    pub statistical_tests: Vec<StatisticalTestResult>,
    /// Total non-finite values excluded across all features.
    pub corrupted_value_count: usize,
}

impl DriftResult {
    /// Features flagged as drifted, in feature order.
    pub fn drifted_features(&self) -> impl Iterator<Item = &FeatureDrift> {
        self.feature_drifts.iter().filter(|f| f.is_drifted)
    }

    /// Fraction of features flagged as drifted (0 when there are no features).
    pub fn drifted_fraction(&self) -> f64 {
        if self.feature_drifts.is_empty() {
            return 0.0;
        }
        self.drifted_features().count() as f64 / self.feature_drifts.len() as f64
    }

    /// Look up a feature by name.
    pub fn feature(&self, name: &str) -> Option<&FeatureDrift> {
        self.feature_drifts.iter().find(|f| f.feature_name == name)
    }
}
