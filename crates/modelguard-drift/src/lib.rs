//! # modelguard-drift
//!
//! Per-feature distribution comparison and drift aggregation.
//!
//! ## Pipeline
//! 1. **StatisticalTestSuite**: PSI over reference quantile bins, two-sample KS
//! 2. **DriftClassifier**: per-feature drift flags, aggregate score, drift type
//! 3. **Attribution**: each feature's share of the aggregate drift
//!
//! [`DriftDetector`] runs all three over a reference/current pair and returns an
//! immutable [`DriftResult`](modelguard_core::DriftResult).
//!
//! ## Cost
//! Per feature: Θ(n log n) for sorting both columns, Θ(n log b) for PSI binning
//! and Θ(n) for the KS merge. Callers cap batch size before invoking the detector.

pub mod attribution;
pub mod classifier;
pub mod detector;
pub mod label_shift;
pub mod stats;
pub mod suite;

pub use attribution::{attribute, rank_features, FeatureAttribution};
pub use classifier::{Classification, DriftClassifier};
pub use detector::DriftDetector;
pub use suite::{FeatureComparison, StatisticalTestSuite};
