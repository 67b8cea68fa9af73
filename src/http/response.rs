//! Response envelope and status mapping.
//!
//! # Responsibilities
//! - Wrap handler results in the uniform `{success, data, error, message}` shape
//! - Map dispatch errors to status codes
//! - Serialize the envelope for callers and host applications
//!
//! # Design Decisions
//! - Fields are private; constructors enforce the envelope invariant
//!   (success never carries `error`, failure never carries `data`)
//! - Absent fields are omitted from JSON rather than serialized as `null`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::error::DispatchError;

/// Uniform response wrapper returned by every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T = Value> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Envelope plus the status code chosen for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    envelope: Envelope,
}

impl ApiResponse {
    pub fn success(data: Value, message: Option<String>) -> Self {
        let envelope = match message {
            Some(message) => Envelope::ok_with_message(data, message),
            None => Envelope::ok(data),
        };
        Self {
            status: StatusCode::OK,
            envelope,
        }
    }

    pub fn failure(err: &DispatchError) -> Self {
        Self {
            status: err.status(),
            envelope: Envelope::error(err.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn into_envelope(self) -> Envelope {
        self.envelope
    }

    /// Serialized envelope, as a caller would receive it on the wire.
    pub fn body_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.envelope).unwrap_or_default()
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let env = Envelope::ok(json!([1, 2]));
        assert_eq!(serde_json::to_value(&env).unwrap(), json!({"success": true, "data": [1, 2]}));

        let env = Envelope::ok_with_message(json!({"id": "1"}), "Lead created successfully");
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({"success": true, "data": {"id": "1"}, "message": "Lead created successfully"})
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let env: Envelope = Envelope::error("Lead not found");
        assert!(!env.is_success());
        assert!(env.data().is_none());
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({"success": false, "error": "Lead not found"})
        );
    }

    #[test]
    fn test_failure_status() {
        let resp = ApiResponse::failure(&DispatchError::invalid_json());
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.body_bytes(),
            br#"{"success":false,"error":"Invalid JSON in request body"}"#.to_vec()
        );
    }

    #[test]
    fn test_into_axum_response() {
        let resp = ApiResponse::failure(&DispatchError::route_not_found("GET", "/api/x")).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }
}
