//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mock API.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::normalizer::{DEV_PREFIX, SERVERLESS_PREFIX};

/// Root configuration for the mock API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MockApiConfig {
    /// URL prefixes accepted by the path normalizer.
    pub routing: RoutingConfig,

    /// Simulated network latency.
    pub latency: LatencyConfig,

    /// Store initialization.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Routing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Prefixes rewritten to the canonical `/api/` prefix.
    pub accepted_prefixes: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            accepted_prefixes: vec![DEV_PREFIX.to_string(), SERVERLESS_PREFIX.to_string()],
        }
    }
}

/// Latency simulation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Delay applied before a response is delivered, in milliseconds.
    /// Zero disables the delay.
    pub delay_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self { delay_ms: 300 }
    }
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Load the dashboard seed data at startup.
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed: true }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record dispatch metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}
