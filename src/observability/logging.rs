//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Derive the default filter from configuration
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Logs go to stderr so CLI output on stdout stays machine-readable

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError};

use crate::config::ObservabilityConfig;

/// Default filter directive for a configured level.
pub fn default_filter(config: &ObservabilityConfig) -> String {
    format!("crm_mock_api={}", config.log_level.to_ascii_lowercase())
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(config).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
