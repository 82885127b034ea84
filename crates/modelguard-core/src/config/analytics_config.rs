use serde::{Deserialize, Serialize};

use super::defaults;

/// Historical analytics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Drift results compared on each side of the drift trend.
    pub trend_window: usize,
    /// Mean drift change inside ±band is considered stable.
    pub trend_band: f64,
    /// Number of most recent drift events feeding the health score.
    pub health_window: usize,
    /// Days without a drift check before a staleness recommendation fires.
    pub stale_check_days: i64,
    /// Minimum history length for trends and forecasts.
    pub min_forecast_points: usize,
    /// Forecast confidence lost per day ahead.
    pub forecast_decay_per_day: f64,
    /// Forecast confidence lost per unit of residual variance.
    pub forecast_variance_penalty: f64,
    /// Days projected in the analytics bundle.
    pub forecast_days: u32,
    /// Features listed in `top_drifted_features`.
    pub top_features: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_window: defaults::DEFAULT_DRIFT_TREND_WINDOW,
            trend_band: defaults::DEFAULT_DRIFT_TREND_BAND,
            health_window: defaults::DEFAULT_HEALTH_WINDOW,
            stale_check_days: defaults::DEFAULT_STALE_CHECK_DAYS,
            min_forecast_points: defaults::DEFAULT_MIN_FORECAST_POINTS,
            forecast_decay_per_day: defaults::DEFAULT_FORECAST_DECAY_PER_DAY,
            forecast_variance_penalty: defaults::DEFAULT_FORECAST_VARIANCE_PENALTY,
            forecast_days: defaults::DEFAULT_FORECAST_DAYS,
            top_features: defaults::DEFAULT_TOP_FEATURES,
        }
    }
}
