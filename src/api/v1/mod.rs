//! v1 API endpoints, one per handler

pub mod ingestion;
pub mod prompt;
pub mod retrieve;

use axum::http::HeaderMap;
use axum::{routing::post, Router};
use uuid::Uuid;

use super::state::AppState;

/// Header carrying the id assigned by the router's request-id layer
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/prompt", post(prompt::prompt))
        .route("/retrieve", post(retrieve::retrieve))
        .route("/ingestion", post(ingestion::trigger_ingestion))
}

/// Id of an HTTP request, falling back to a fresh one when the header is absent
pub(crate) fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_request_id)
}

pub(crate) fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}
