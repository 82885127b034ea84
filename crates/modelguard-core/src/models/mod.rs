//! Data models exchanged between the engine components and their callers.

pub mod analytics;
pub mod confusion;
pub mod drift_result;
pub mod feature_sample;
pub mod patch;
pub mod prediction;
pub mod telemetry;
pub mod validation;

pub use analytics::{
    DateRange, DriftForecast, DriftTrend, FeatureDriftSummary, ModelAnalytics, PatchStats,
    Priority, Recommendation,
};
pub use confusion::ConfusionMatrix;
pub use drift_result::{
    DistributionShift, DriftResult, DriftType, FeatureDrift, QuantileShift, StatisticalTestResult,
};
pub use feature_sample::{FeatureSample, LabelDistribution};
pub use patch::{
    ClippingConfig, NormalizationConfig, Patch, PatchConfiguration, PatchStatus, PatchType,
    ReweightingConfig, ThresholdConfig,
};
pub use prediction::{AccuracySnapshot, AccuracySummary, AccuracyTrend, ModelMetrics, PredictionRecord};
pub use telemetry::{DriftTelemetry, PatchTelemetry};
pub use validation::{ValidationMetrics, ValidationResult};
