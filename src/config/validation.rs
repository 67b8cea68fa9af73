//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate prefix shape and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MockApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::MockApiConfig;

/// Upper bound for the simulated latency.
pub const MAX_DELAY_MS: u64 = 60_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &MockApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let prefixes = &config.routing.accepted_prefixes;
    if prefixes.is_empty() {
        errors.push(ValidationError::new(
            "routing.accepted_prefixes",
            "at least one prefix is required",
        ));
    }
    for (i, prefix) in prefixes.iter().enumerate() {
        if prefix.len() < 2 || !prefix.starts_with('/') || !prefix.ends_with('/') {
            errors.push(ValidationError::new(
                format!("routing.accepted_prefixes[{i}]"),
                format!("'{prefix}' must start and end with '/' and name at least one segment"),
            ));
        }
    }

    if config.latency.delay_ms > MAX_DELAY_MS {
        errors.push(ValidationError::new(
            "latency.delay_ms",
            format!("{} exceeds maximum of {MAX_DELAY_MS}", config.latency.delay_ms),
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
