//! Configuration system for ModelGuard.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod analytics_config;
pub mod defaults;
pub mod detection_config;
pub mod guard_config;
pub mod monitor_config;
pub mod observability_config;
pub mod patch_config;

pub use analytics_config::AnalyticsConfig;
pub use detection_config::DetectionConfig;
pub use guard_config::GuardConfig;
pub use monitor_config::MonitorConfig;
pub use observability_config::ObservabilityConfig;
pub use patch_config::PatchConfig;
