//! Top-level ModelGuard configuration with layered resolution.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AnalyticsConfig, DetectionConfig, MonitorConfig, ObservabilityConfig, PatchConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`MODELGUARD_*`)
/// 2. TOML config file
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    pub detection: DetectionConfig,
    pub patch: PatchConfig,
    pub monitor: MonitorConfig,
    pub analytics: AnalyticsConfig,
    pub observability: ObservabilityConfig,
}

impl GuardConfig {
    /// Load configuration from an optional TOML file, then apply env overrides.
    ///
    /// A `path` that does not exist is an error; pass `None` to skip the file layer.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `MODELGUARD_*` environment variables. Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse("MODELGUARD_PSI_THRESHOLD") {
            self.detection.psi_threshold = v;
        }
        if let Some(v) = env_parse("MODELGUARD_KS_THRESHOLD") {
            self.detection.ks_threshold = v;
        }
        if let Some(v) = env_parse("MODELGUARD_DRIFT_THRESHOLD") {
            self.detection.drift_threshold = v;
        }
        if let Some(v) = env_parse("MODELGUARD_MIN_SAMPLE_SIZE") {
            self.patch.min_sample_size = v;
        }
        if let Some(v) = env_parse("MODELGUARD_WINDOW_CAPACITY") {
            self.monitor.window_capacity = v;
        }
        if let Ok(level) = std::env::var("MODELGUARD_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.observability.log_level = level;
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.detection;
        unit_interval("detection.psi_threshold", d.psi_threshold, false)?;
        unit_interval("detection.ks_threshold", d.ks_threshold, false)?;
        unit_interval("detection.drift_threshold", d.drift_threshold, false)?;
        unit_interval("detection.covariate_fraction", d.covariate_fraction, true)?;
        unit_interval("detection.max_corrupted_fraction", d.max_corrupted_fraction, true)?;
        positive("detection.label_shift_threshold", d.label_shift_threshold)?;
        if d.psi_bins < 2 {
            return Err(invalid("detection.psi_bins", "must be at least 2"));
        }

        let p = &self.patch;
        unit_interval("patch.min_accuracy", p.min_accuracy, true)?;
        unit_interval("patch.max_performance_delta", p.max_performance_delta, true)?;
        unit_interval("patch.min_safety_score", p.min_safety_score, true)?;
        unit_interval("patch.imbalance_tolerance", p.imbalance_tolerance, true)?;
        unit_interval("patch.drift_reduction_weight", p.drift_reduction_weight, true)?;
        if !(p.confidence_level > 0.0 && p.confidence_level < 1.0) {
            return Err(invalid("patch.confidence_level", "must be in (0, 1)"));
        }
        if p.min_sample_size == 0 {
            return Err(invalid("patch.min_sample_size", "must be greater than 0"));
        }
        if !(0.0..p.clip_upper_quantile).contains(&p.clip_lower_quantile)
            || p.clip_upper_quantile > 1.0
        {
            return Err(invalid(
                "patch.clip_lower_quantile",
                "clip quantiles must satisfy 0 <= lower < upper <= 1",
            ));
        }

        let m = &self.monitor;
        if m.window_capacity == 0 {
            return Err(invalid("monitor.window_capacity", "must be greater than 0"));
        }
        if m.calibration_bins == 0 {
            return Err(invalid("monitor.calibration_bins", "must be greater than 0"));
        }
        if m.trend_window == 0 {
            return Err(invalid("monitor.trend_window", "must be greater than 0"));
        }

        let a = &self.analytics;
        if a.trend_window == 0 || a.health_window == 0 {
            return Err(invalid("analytics.trend_window", "windows must be greater than 0"));
        }
        if a.min_forecast_points < 2 {
            return Err(invalid(
                "analytics.min_forecast_points",
                "regression needs at least 2 points",
            ));
        }
        if a.top_features == 0 {
            return Err(invalid("analytics.top_features", "must be greater than 0"));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn unit_interval(field: &str, value: f64, allow_zero: bool) -> Result<(), ConfigError> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if lower_ok && value <= 1.0 {
        Ok(())
    } else if allow_zero {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    } else {
        Err(invalid(field, "must be in (0.0, 1.0]"))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}
