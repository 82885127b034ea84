//! # modelguard-core
//!
//! Foundation crate for the ModelGuard drift engine.
//! Defines all data models, traits, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::GuardConfig;
pub use errors::{GuardError, GuardResult};
pub use models::{
    DriftResult, DriftType, FeatureDrift, FeatureSample, Patch, PatchConfiguration, PatchStatus,
    PatchType, PredictionRecord, ValidationMetrics, ValidationResult,
};
