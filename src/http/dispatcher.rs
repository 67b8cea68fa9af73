//! Request dispatch.
//!
//! # Responsibilities
//! - Normalize and match the request path
//! - Resolve the handler from the registry
//! - Parse the request body before invocation (after lookup, so an
//!   unregistered route is a 404 even when its body is malformed)
//! - Invoke the handler against the store
//! - Convert the outcome into an envelope and status code
//! - Observability (structured logs with request IDs, metrics)
//!
//! # Design Decisions
//! - The only place failure policy is decided
//! - Stateless across calls apart from the injected store
//! - Synchronous: runs to completion before any suspension point

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::config::MockApiConfig;
use crate::http::error::DispatchError;
use crate::http::handlers::{self, HandlerOutput};
use crate::http::request::{ApiRequest, RequestId};
use crate::http::response::ApiResponse;
use crate::observability::metrics;
use crate::routing::{Handler, PathNormalizer, RouteMatch};
use crate::store::Store;

/// Route label used when no registered handler serves the request.
/// Keeps the `route` label bounded to the route table plus this value.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Orchestrates a single request against the store.
pub struct Dispatcher {
    store: Arc<Store>,
    normalizer: PathNormalizer,
    metrics_enabled: bool,
}

impl Dispatcher {
    /// Create a dispatcher over an explicitly constructed store.
    pub fn new(store: Arc<Store>, normalizer: PathNormalizer) -> Self {
        Self {
            store,
            normalizer,
            metrics_enabled: false,
        }
    }

    pub fn from_config(store: Arc<Store>, config: &MockApiConfig) -> Self {
        Self::new(
            store,
            PathNormalizer::new(config.routing.accepted_prefixes.iter().cloned()),
        )
        .with_metrics(config.observability.metrics_enabled)
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }

    /// Dispatch a request. Never fails: every error becomes an error envelope.
    pub fn dispatch(&self, request: &ApiRequest) -> ApiResponse {
        let start_time = Instant::now();
        let request_id = RequestId::new();
        let method = request.method();
        let path = self.normalizer.normalize(request.url());

        let span = tracing::debug_span!("dispatch", request_id = %request_id, method = %method, path = %path);
        let _guard = span.enter();

        tracing::debug!(url = %request.url(), "Dispatching request");

        let lookup = lookup(method, &path);
        let route_label = route_label(&lookup);
        let outcome = lookup.and_then(|(handler, route)| self.execute(request, handler, &route));

        let response = match outcome {
            Ok(HandlerOutput { data, message }) => ApiResponse::success(data, message),
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "Request failed");
                ApiResponse::failure(&err)
            }
        };

        let status = response.status().as_u16();
        tracing::info!(
            request_id = %request_id,
            method = %method,
            route = %route_label,
            status,
            elapsed_us = start_time.elapsed().as_micros() as u64,
            "Request dispatched"
        );
        if self.metrics_enabled {
            metrics::record_dispatch(method, &route_label, status, start_time);
        }

        response
    }

    fn execute(
        &self,
        request: &ApiRequest,
        handler: Handler,
        route: &RouteMatch,
    ) -> Result<HandlerOutput, DispatchError> {
        // 1. Parse body before invocation
        let body = parse_body(request.body())?;

        // 2. Invoke
        let output = handlers::invoke(handler, &self.store, route.id.as_deref(), body)?;

        if let (Handler::Records { kind, .. }, true) = (handler, handler.mutates()) {
            let size = self.store.len(kind);
            tracing::debug!(handler = %handler, collection = kind.resource(), size, "Store mutated");
            if self.metrics_enabled {
                metrics::record_store_size(kind.resource(), size);
            }
        }

        Ok(output)
    }
}

/// Match a canonical path and resolve its handler.
fn lookup(method: &str, path: &str) -> Result<(Handler, RouteMatch), DispatchError> {
    let route = RouteMatch::parse(path).ok_or_else(|| DispatchError::route_not_found(method, path))?;
    let handler = Handler::resolve(method, &route)?;
    Ok((handler, route))
}

/// Metrics label for a lookup: the registered route key, or `unmatched`.
fn route_label(lookup: &Result<(Handler, RouteMatch), DispatchError>) -> String {
    match lookup {
        Ok((handler, _)) => handler.route_key(),
        Err(_) => UNMATCHED_ROUTE.to_string(),
    }
}

/// Parse a request body. An empty body counts as absent.
fn parse_body(body: Option<&[u8]>) -> Result<Option<Value>, DispatchError> {
    match body {
        None => Ok(None),
        Some(bytes) if bytes.is_empty() => Ok(None),
        Some(bytes) => serde_json::from_slice(bytes).map(Some).map_err(|e| {
            tracing::debug!(error = %e, "Body is not valid JSON");
            DispatchError::invalid_json()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(Store::seeded()), PathNormalizer::default())
    }

    fn data(response: &ApiResponse) -> &Value {
        response.envelope().data().expect("success envelope")
    }

    #[test]
    fn test_list_leads() {
        let resp = dispatcher().dispatch(&ApiRequest::get("/api/leads"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.envelope().is_success());
        assert_eq!(data(&resp).as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_get_lead_by_id() {
        let resp = dispatcher().dispatch(&ApiRequest::get("/.netlify/functions/leads/2?x=1"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(data(&resp)["name"], "Jane Smith");
    }

    #[test]
    fn test_malformed_path_is_not_found() {
        let d = dispatcher();
        for url in ["/", "/api", "/.netlify/functions", "/other/leads"] {
            let resp = d.dispatch(&ApiRequest::get(url));
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{url}");
            assert!(resp.envelope().error_message().unwrap().starts_with("Route not found: GET "));
        }
    }

    #[test]
    fn test_unregistered_route_names_method_and_route() {
        let resp = dispatcher().dispatch(&ApiRequest::delete("/api/opportunities/1"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.envelope().error_message(),
            Some("Route not found: DELETE /api/opportunities/:id")
        );
        assert!(resp.envelope().data().is_none());
    }

    #[test]
    fn test_invalid_json_on_any_registered_route() {
        let d = dispatcher();
        let requests = [
            ApiRequest::post("/api/leads"),
            ApiRequest::put("/api/leads/1"),
            ApiRequest::get("/api/analytics"),
            ApiRequest::delete("/api/leads/1"),
        ];
        for request in requests {
            let resp = d.dispatch(&request.with_body("{not json"));
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(resp.envelope().error_message(), Some("Invalid JSON in request body"));
        }
        // Nothing was deleted or created
        assert_eq!(d.store().len(crate::store::CollectionKind::Leads), 2);
    }

    #[test]
    fn test_empty_body_is_absent() {
        let resp = dispatcher().dispatch(&ApiRequest::post("/api/leads").with_body(""));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(data(&resp)["status"], "NEW");
    }

    #[test]
    fn test_non_object_body_is_handler_failure() {
        let resp = dispatcher().dispatch(&ApiRequest::put("/api/leads/1").with_json(&json!("CONTACTED")));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.envelope().error_message(),
            Some("Request body must be a JSON object")
        );
    }

    #[test]
    fn test_update_missing_record() {
        let resp = dispatcher().dispatch(
            &ApiRequest::put("/api/leads/999").with_json(&json!({"status": "LOST"})),
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.envelope().error_message(), Some("Lead not found"));
    }

    #[test]
    fn test_metrics_enabled_dispatch() {
        let d = dispatcher().with_metrics(true);
        let resp = d.dispatch(&ApiRequest::post("/api/leads").with_json(&json!({"name": "M"})));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.envelope().message(), Some("Lead created successfully"));
    }

    #[test]
    fn test_unregistered_route_with_malformed_body_is_not_found() {
        let d = dispatcher();
        let resp = d.dispatch(&ApiRequest::post("/api/opportunities").with_body("{"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.envelope().error_message(),
            Some("Route not found: POST /api/opportunities")
        );
        assert_eq!(d.store().len(crate::store::CollectionKind::Opportunities), 2);
    }

    #[test]
    fn test_deep_segment_with_scheme_separator_targets_id() {
        let d = dispatcher();
        let resp = d.dispatch(&ApiRequest::delete("/api/leads/1/ref/https://example.com/x"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(data(&resp)["id"], "1");
        assert_eq!(d.store().len(crate::store::CollectionKind::Leads), 1);
    }

    #[test]
    fn test_route_label_is_bounded() {
        let cases = [
            ("GET", "/api/leads/7", "/api/leads/:id"),
            ("GET", "/api/analytics", "/api/analytics"),
            ("GET", "/api/anything-at-all", UNMATCHED_ROUTE),
            ("POST", "/api/opportunities", UNMATCHED_ROUTE),
            ("GET", "/nowhere", UNMATCHED_ROUTE),
        ];
        for (method, path, expected) in cases {
            assert_eq!(route_label(&lookup(method, path)), expected, "{method} {path}");
        }
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(None), Ok(None));
        assert_eq!(parse_body(Some(&b""[..])), Ok(None));
        assert_eq!(parse_body(Some(&b"[1]"[..])), Ok(Some(json!([1]))));
        assert_eq!(parse_body(Some(&b" "[..])), Err(DispatchError::invalid_json()));
    }
}
