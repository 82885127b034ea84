//! # modelguard-analytics
//!
//! Read-only aggregation over stored drift results and patches. Nothing here
//! holds state between calls: every view is recomputed from the history passed in.
//!
//! - **Aggregation**: drift rate and extremes, drift-type distribution, patch outcomes
//! - **Trend**: recent vs previous mean drift score
//! - **Forecast**: least-squares projection of drift score N days ahead
//! - **Health**: 0–100 score from drift and patch outcomes
//! - **Recommendations**: rule-based, sorted by priority

pub mod aggregation;
pub mod engine;
pub mod forecast;
pub mod health;
pub mod recommendations;
pub mod trend;

pub use engine::AnalyticsEngine;
pub use health::HealthInputs;
