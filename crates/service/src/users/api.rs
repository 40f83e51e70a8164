//! Transport-neutral request/response shapes.
//!
//! The HTTP layer (or a function-as-a-service adapter) turns its own request
//! into an [`ApiRequest`] and writes an [`ApiResponse`] back out.

use std::collections::HashMap;

use serde::Serialize;

use common::types::ErrorBody;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    pub body: Option<Vec<u8>>,
    pub path_parameters: HashMap<String, String>,
}

impl ApiRequest {
    pub fn new() -> Self { Self::default() }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters.get(name).map(String::as_str)
    }
}

/// Status code plus a JSON text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        let body = serde_json::to_string(body)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string());
        Self { status_code, body }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::json(status_code, &ErrorBody::new(message))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
