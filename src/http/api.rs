//! Caller-facing mock backend.
//!
//! `MockApi` pairs the dispatcher with the latency simulator, which is what a
//! dashboard client talks to in place of a real server.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::MockApiConfig;
use crate::http::dispatcher::Dispatcher;
use crate::http::request::ApiRequest;
use crate::http::response::ApiResponse;
use crate::latency::{Cancelled, LatencySimulator};
use crate::store::Store;

/// In-process simulation of the CRM REST backend.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct MockApi {
    dispatcher: Arc<Dispatcher>,
    latency: LatencySimulator,
}

impl MockApi {
    pub fn new(dispatcher: Dispatcher, latency: LatencySimulator) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            latency,
        }
    }

    /// Build a mock API with a fresh store from configuration.
    pub fn from_config(config: &MockApiConfig) -> Self {
        let store = if config.store.seed {
            Store::seeded()
        } else {
            Store::empty()
        };
        Self::new(
            Dispatcher::from_config(Arc::new(store), config),
            LatencySimulator::from_config(&config.latency),
        )
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn store(&self) -> &Arc<Store> {
        self.dispatcher.store()
    }

    pub fn latency(&self) -> LatencySimulator {
        self.latency
    }

    /// Dispatch and deliver after the simulated latency.
    pub async fn send(&self, request: ApiRequest) -> ApiResponse {
        let response = self.dispatcher.dispatch(&request);
        self.latency.wait().await;
        response
    }

    /// Dispatch and deliver unless `cancel` fires first.
    ///
    /// A request cancelled before dispatch performs no work. A request
    /// cancelled during the delay has already committed any store mutation;
    /// only the response is discarded.
    pub async fn request(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, Cancelled> {
        if cancel.is_cancelled() {
            tracing::debug!(method = %request.method(), url = %request.url(), "Request cancelled before dispatch");
            return Err(Cancelled);
        }

        let response = self.dispatcher.dispatch(&request);
        self.latency.deliver(response, cancel).await
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::from_config(&MockApiConfig::default())
    }
}
