// Single source of truth for all default values.

// --- Detection ---
pub const DEFAULT_PSI_THRESHOLD: f64 = 0.2;
pub const DEFAULT_KS_THRESHOLD: f64 = 0.05;
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.2;
pub const DEFAULT_PSI_BINS: usize = 10;
pub const DEFAULT_COVARIATE_FRACTION: f64 = 0.5;
pub const DEFAULT_LABEL_SHIFT_THRESHOLD: f64 = 0.2;
pub const DEFAULT_MAX_CORRUPTED_FRACTION: f64 = 0.1;

// --- Patch synthesis & validation ---
pub const DEFAULT_MIN_ACCURACY: f64 = 0.7;
pub const DEFAULT_MAX_PERFORMANCE_DELTA: f64 = 0.1;
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 50;
pub const DEFAULT_MIN_SAFETY_SCORE: f64 = 0.7;
pub const DEFAULT_IMBALANCE_TOLERANCE: f64 = 0.3;
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
pub const DEFAULT_DRIFT_REDUCTION_WEIGHT: f64 = 0.5;
pub const DEFAULT_CLIP_LOWER_QUANTILE: f64 = 0.01;
pub const DEFAULT_CLIP_UPPER_QUANTILE: f64 = 0.99;

// --- Accuracy monitor ---
pub const DEFAULT_WINDOW_CAPACITY: usize = 1000;
pub const DEFAULT_CALIBRATION_BINS: usize = 10;
pub const DEFAULT_ACCURACY_TREND_WINDOW: usize = 10;
pub const DEFAULT_ACCURACY_TREND_BAND: f64 = 0.02;

// --- Analytics ---
pub const DEFAULT_DRIFT_TREND_WINDOW: usize = 10;
pub const DEFAULT_DRIFT_TREND_BAND: f64 = 0.1;
pub const DEFAULT_HEALTH_WINDOW: usize = 20;
pub const DEFAULT_STALE_CHECK_DAYS: i64 = 30;
pub const DEFAULT_MIN_FORECAST_POINTS: usize = 3;
pub const DEFAULT_FORECAST_DECAY_PER_DAY: f64 = 0.03;
pub const DEFAULT_FORECAST_VARIANCE_PENALTY: f64 = 2.0;
pub const DEFAULT_FORECAST_DAYS: u32 = 7;
pub const DEFAULT_TOP_FEATURES: usize = 5;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
