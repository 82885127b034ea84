/// ModelGuard version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Epsilon substituted for empty PSI bins to avoid ln(0) and division by zero.
pub const PSI_EPSILON: f64 = 1e-4;

/// Upper bound for the mean-shift PSI fallback on zero-variance reference features.
pub const PSI_MEAN_SHIFT_CAP: f64 = 10.0;

/// Quantiles reported in every [`crate::models::DistributionShift`].
pub const SHIFT_QUANTILES: [f64; 5] = [0.05, 0.25, 0.5, 0.75, 0.95];

/// Maximum number of accuracy snapshots retained per model for trend analysis.
pub const MAX_ACCURACY_SNAPSHOTS: usize = 100;

/// Metadata key holding the template-based patch summary.
pub const METADATA_SUMMARY: &str = "summary";

/// Metadata key holding the drift score the patch was synthesized against.
pub const METADATA_DRIFT_SCORE: &str = "drift_score";

/// Milliseconds per day, used by forecasting and staleness checks.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
