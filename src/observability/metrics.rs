//! Metrics collection.
//!
//! # Metrics
//! - `mock_api_requests_total` (counter): dispatches by method, route, status
//! - `mock_api_dispatch_duration_seconds` (histogram): time spent in dispatch
//! - `mock_api_store_records` (gauge): records per collection after a mutation
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no exporter is installed here,
//!   so without a recorder every call is a no-op
//! - Dispatch duration excludes the simulated latency
//! - `route` is a registered route key or `unmatched`, never a raw path

use std::time::Instant;

/// Record a completed dispatch.
pub fn record_dispatch(method: &str, route: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "mock_api_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!("mock_api_dispatch_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of a collection.
pub fn record_store_size(collection: &'static str, len: usize) {
    ::metrics::gauge!("mock_api_store_records", "collection" => collection).set(len as f64);
}
