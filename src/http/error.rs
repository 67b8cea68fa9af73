//! Dispatch error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Errors produced while dispatching a request.
///
/// Every variant is converted into an error envelope at the dispatcher
/// boundary; callers only ever see the envelope and its status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Unknown route, or a record id absent from its collection.
    #[error("{0}")]
    NotFound(String),

    /// Request body present but not valid JSON.
    #[error("{0}")]
    BadRequest(String),

    /// Any other failure surfaced by handler logic.
    #[error("{0}")]
    HandlerFailure(String),
}

impl DispatchError {
    pub fn route_not_found(method: &str, route: &str) -> Self {
        DispatchError::NotFound(format!("Route not found: {method} {route}"))
    }

    pub fn invalid_json() -> Self {
        DispatchError::BadRequest("Invalid JSON in request body".to_string())
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::NotFound(_) => StatusCode::NOT_FOUND,
            DispatchError::BadRequest(_) => StatusCode::BAD_REQUEST,
            DispatchError::HandlerFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::NotFound(_) => "not_found",
            DispatchError::BadRequest(_) => "bad_request",
            DispatchError::HandlerFailure(_) => "handler_failure",
        }
    }
}

impl From<StoreError> for DispatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => DispatchError::NotFound(err.to_string()),
        }
    }
}
