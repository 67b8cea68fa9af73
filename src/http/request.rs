//! Request types consumed by the dispatcher.
//!
//! # Responsibilities
//! - Carry method, URL and optional raw body bytes
//! - Generate a unique request ID per dispatch for log correlation

use std::fmt;

use serde_json::Value;
use uuid::Uuid;

/// A request submitted to the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: String,
    url: String,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a request without a body. The method is upper-cased.
    pub fn new(method: impl AsRef<str>, url: impl Into<String>) -> Self {
        Self {
            method: method.as_ref().to_ascii_uppercase(),
            url: url.into(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new("PUT", url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new("DELETE", url)
    }

    /// Attach raw body bytes (not validated until dispatch).
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach a JSON body.
    pub fn with_json(self, body: &Value) -> Self {
        self.with_body(body.to_string())
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Unique identifier attached to every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
