//! # modelguard-patch
//!
//! Corrective patches for drifted models, without retraining.
//!
//! ## Flow
//! 1. **PatchSynthesizer**: proposes one configuration per patch type from a drift result
//! 2. **PatchValidator**: applies the candidate to held-out data and gates it on safety
//! 3. **Lifecycle**: status transitions once a host applies or rolls back a patch
//!
//! [`FeaturePatchEngine`] is the reference [`IPatchApplicator`](modelguard_core::traits::IPatchApplicator)
//! and [`LinearScoreModel`] a reference [`IInferenceModel`](modelguard_core::traits::IInferenceModel).

pub mod engine;
pub mod explanation;
pub mod export;
pub mod lifecycle;
pub mod model;
pub mod synthesis;
pub mod validation;

pub use engine::FeaturePatchEngine;
pub use export::PatchExport;
pub use model::LinearScoreModel;
pub use synthesis::PatchSynthesizer;
pub use validation::PatchValidator;
