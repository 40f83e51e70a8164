use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use service::users::{ApiRequest, ApiResponse};

use crate::errors::JsonReply;
use crate::metrics;
use crate::routes::AppState;

/// Create a user from a `{name, email}` JSON body.
///
/// The body is taken as raw bytes so that non-JSON input reaches the
/// handler and is answered with the documented error body.
#[utoipa::path(
    post, path = "/user", tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CreateUserResponse),
        (status = 400, description = "Malformed input (strict status codes only)", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Malformed input or store failure", body = crate::openapi::ErrorResponse),
        (status = 502, description = "Store failure (strict status codes only)", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> JsonReply {
    let req = ApiRequest::new().with_body(body.to_vec());
    let started = Instant::now();
    let resp = state.users.create_user(&req).await;
    record("create_user", &resp, started);
    JsonReply(resp)
}

#[utoipa::path(
    get, path = "/user/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::UserDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorResponse),
        (status = 502, description = "Store failure (strict status codes only)", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get_user_by_id(State(state): State<AppState>, Path(id): Path<String>) -> JsonReply {
    let req = ApiRequest::new().with_path_parameter("id", id);
    let started = Instant::now();
    let resp = state.users.get_user_by_id(&req).await;
    record("get_user_by_id", &resp, started);
    JsonReply(resp)
}

fn record(operation: &str, resp: &ApiResponse, started: Instant) {
    metrics::observe(operation, resp.status_code, started.elapsed().as_secs_f64());
}
