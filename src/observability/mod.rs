//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher produces:
//!     → logging.rs (structured log events with request id)
//!     → metrics.rs (counters, gauges, histograms)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - Request ID flows through every event of a dispatch
//! - Metrics can be switched off in configuration

pub mod logging;
pub mod metrics;
