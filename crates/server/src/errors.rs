use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use service::users::ApiResponse;
use thiserror::Error;
use tracing::error;

/// Writes a handler's [`ApiResponse`] out as an HTTP response.
#[derive(Debug)]
pub struct JsonReply(pub ApiResponse);

impl IntoResponse for JsonReply {
    fn into_response(self) -> Response {
        let ApiResponse { status_code, body } = self.0;
        let status = StatusCode::from_u16(status_code).unwrap_or_else(|_| {
            error!(status_code, "handler produced an invalid status code");
            StatusCode::INTERNAL_SERVER_ERROR
        });
        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("user store initialization failed: {0}")]
    Store(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
