//! Tracing setup: structured logging with span definitions and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the ModelGuard tracing/logging system.
///
/// Reads the `MODELGUARD_LOG` environment variable for per-crate log levels.
/// Format: `MODELGUARD_LOG=modelguard_drift=debug,modelguard_patch=info`
///
/// Falls back to `modelguard=info` if `MODELGUARD_LOG` is not set or is invalid.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_plain(env_filter_or(DEFAULT_FILTER));
}

/// Initialize tracing with JSON output. `MODELGUARD_LOG` wins over `filter`.
pub fn init_tracing_json(filter: &str) {
    let filter = env_filter_or(filter);
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init();
    });
}

/// Initialize from an [`ObservabilityConfig`](crate::config::ObservabilityConfig).
///
/// `MODELGUARD_LOG` takes precedence; otherwise `log_level` sets the filter.
pub fn init_from_config(config: &crate::config::ObservabilityConfig) {
    if config.json_logs {
        init_tracing_json(&config.log_level);
    } else {
        init_plain(env_filter_or(&config.log_level));
    }
}

const DEFAULT_FILTER: &str = "modelguard=info";

/// `MODELGUARD_LOG` when set and valid, else `fallback`, else the default filter.
fn env_filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env("MODELGUARD_LOG")
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn init_plain(filter: EnvFilter) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_applies_without_env_override() {
        std::env::remove_var("MODELGUARD_LOG");
        assert_eq!(env_filter_or("debug").to_string(), "debug");
        assert_eq!(
            env_filter_or("modelguard_drift=trace").to_string(),
            "modelguard_drift=trace"
        );
    }
}
