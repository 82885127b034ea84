//! Seams to injected collaborators.

pub mod inference;
pub mod metrics_listener;
pub mod patch_applicator;

pub use inference::IInferenceModel;
pub use metrics_listener::IMetricsListener;
pub use patch_applicator::IPatchApplicator;
