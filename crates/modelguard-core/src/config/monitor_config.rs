use serde::{Deserialize, Serialize};

use super::defaults;

/// Accuracy monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Rolling window capacity per model (FIFO eviction).
    pub window_capacity: usize,
    /// Equal-width confidence bins for expected calibration error.
    pub calibration_bins: usize,
    /// Snapshots compared on each side of the accuracy trend.
    pub trend_window: usize,
    /// Accuracy change inside ±band is considered stable.
    pub trend_band: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_capacity: defaults::DEFAULT_WINDOW_CAPACITY,
            calibration_bins: defaults::DEFAULT_CALIBRATION_BINS,
            trend_window: defaults::DEFAULT_ACCURACY_TREND_WINDOW,
            trend_band: defaults::DEFAULT_ACCURACY_TREND_BAND,
        }
    }
}
