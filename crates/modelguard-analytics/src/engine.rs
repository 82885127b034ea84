//! AnalyticsEngine: folds stored drift results and patches into per-model views.

use chrono::{DateTime, Utc};
use tracing::debug;

use modelguard_core::config::AnalyticsConfig;
use modelguard_core::models::{
    DateRange, DriftForecast, DriftResult, DriftTrend, FeatureDriftSummary, ModelAnalytics, Patch,
    PatchStats, PatchStatus, Recommendation,
};

use crate::aggregation::{self, drift_stats, drift_type_distribution, top_drifted_features};
use crate::forecast::{self, ForecastParams};
use crate::health::{self, HealthInputs};
use crate::recommendations::{self, RecommendationInputs};
use crate::trend;

/// Stateless analytics over history supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Full analytics bundle for `model_id` over `range`.
    pub fn analyze(
        &self,
        model_id: &str,
        results: &[DriftResult],
        patches: &[Patch],
        range: DateRange,
        now: DateTime<Utc>,
    ) -> ModelAnalytics {
        let history = aggregation::history(results, model_id, &range);
        let patches = aggregation::patches_in(patches, model_id, &range);

        let span = modelguard_core::analytics_span!(model_id, history.len());
        let _guard = span.enter();

        let stats = drift_stats(&history);
        let patch_stats = aggregation::patch_stats(&patches);
        let trend = self.trend_of(&history);
        let health_score = self.health_of(&history, &patch_stats);
        let top = top_drifted_features(&history, self.config.top_features);
        let last_check = history.last().map(|r| r.timestamp);
        let forecasts =
            forecast::forecast(&history, self.config.forecast_days, self.forecast_params());
        let failed = patches.iter().filter(|p| p.status == PatchStatus::Failed).count();
        let recommendations = self.recommend(&history, trend, failed, &top, last_check, now);

        debug!(
            checks = stats.total,
            drift_rate = stats.rate,
            health_score,
            recommendations = recommendations.len(),
            "analytics computed"
        );

        ModelAnalytics {
            model_id: model_id.to_string(),
            range,
            total_checks: stats.total,
            drift_detected_count: stats.detected,
            drift_rate: stats.rate,
            avg_drift_score: stats.avg,
            min_drift_score: stats.min,
            max_drift_score: stats.max,
            drift_type_distribution: drift_type_distribution(&history),
            patch_stats,
            trend,
            health_score,
            top_drifted_features: top,
            last_check,
            forecasts,
            recommendations,
        }
    }

    /// Forecasts for each of the next `days_ahead` days. Empty below the minimum history.
    pub fn forecast_drift(&self, results: &[DriftResult], days_ahead: u32) -> Vec<DriftForecast> {
        forecast::forecast(&chronological(results), days_ahead, self.forecast_params())
    }

    pub fn drift_trend(&self, results: &[DriftResult]) -> DriftTrend {
        self.trend_of(&chronological(results))
    }

    /// Health in [0, 100]; 100 when there is no drift history.
    pub fn health_score(&self, results: &[DriftResult], patches: &[Patch]) -> f64 {
        let patches: Vec<&Patch> = patches.iter().collect();
        self.health_of(&chronological(results), &aggregation::patch_stats(&patches))
    }

    pub fn patch_stats(&self, patches: &[Patch]) -> PatchStats {
        let patches: Vec<&Patch> = patches.iter().collect();
        aggregation::patch_stats(&patches)
    }

    /// Recommendations for the given history, highest priority first.
    pub fn recommendations(
        &self,
        results: &[DriftResult],
        patches: &[Patch],
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let history = chronological(results);
        let top = top_drifted_features(&history, self.config.top_features);
        let failed = patches.iter().filter(|p| p.status == PatchStatus::Failed).count();
        let last_check = history.last().map(|r| r.timestamp);
        self.recommend(&history, self.trend_of(&history), failed, &top, last_check, now)
    }

    fn trend_of(&self, history: &[&DriftResult]) -> DriftTrend {
        let scores: Vec<f64> = history.iter().map(|r| r.drift_score).collect();
        trend::drift_trend(&scores, self.config.trend_window, self.config.trend_band)
    }

    fn health_of(&self, history: &[&DriftResult], patches: &PatchStats) -> f64 {
        if history.is_empty() {
            return 100.0;
        }
        let recent = &history[history.len().saturating_sub(self.config.health_window)..];
        let stats = drift_stats(recent);
        health::health_score(HealthInputs {
            drift_rate: stats.rate,
            avg_drift_score: stats.avg,
            patch_success_rate: patches.success_rate,
            avg_safety_score: patches.avg_safety_score,
        })
    }

    fn recommend(
        &self,
        history: &[&DriftResult],
        trend: DriftTrend,
        failed_patches: usize,
        top: &[FeatureDriftSummary],
        last_check: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let detections: Vec<bool> = history.iter().map(|r| r.is_drift_detected).collect();
        recommendations::generate(&RecommendationInputs {
            detections: &detections,
            trend,
            failed_patches,
            top_features: top,
            last_check,
            now,
            stale_check_days: self.config.stale_check_days,
        })
    }

    fn forecast_params(&self) -> ForecastParams {
        ForecastParams {
            min_points: self.config.min_forecast_points,
            decay_per_day: self.config.forecast_decay_per_day,
            variance_penalty: self.config.forecast_variance_penalty,
        }
    }
}

fn chronological(results: &[DriftResult]) -> Vec<&DriftResult> {
    let mut sorted: Vec<&DriftResult> = results.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);
    sorted
}
