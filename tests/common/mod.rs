//! Shared utilities for integration tests.

use std::sync::Arc;
use std::time::Duration;

use crm_mock_api::routing::PathNormalizer;
use crm_mock_api::{ApiResponse, Dispatcher, LatencySimulator, MockApi, Store};
use serde_json::Value;

/// Mock API over a freshly seeded store with no latency.
pub fn seeded_api() -> MockApi {
    api_with_latency(Duration::ZERO)
}

/// Mock API over a freshly seeded store with a fixed delay.
pub fn api_with_latency(delay: Duration) -> MockApi {
    let dispatcher = Dispatcher::new(Arc::new(Store::seeded()), PathNormalizer::default());
    MockApi::new(dispatcher, LatencySimulator::new(delay))
}

/// The `data` payload of a success envelope.
pub fn data(response: &ApiResponse) -> Value {
    response
        .envelope()
        .data()
        .cloned()
        .unwrap_or_else(|| panic!("expected success envelope, got {:?}", response.envelope()))
}

/// The envelope as generic JSON.
#[allow(dead_code)]
pub fn envelope_json(response: &ApiResponse) -> Value {
    serde_json::from_slice(&response.body_bytes()).unwrap()
}
