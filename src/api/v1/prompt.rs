//! Direct retrieve-and-generate: one managed call answers the query

use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::json;
use tracing::{error, info};

use super::{new_request_id, request_id};

use crate::api::state::AppState;
use crate::api::types::{ApiError, HttpEvent, ResponseEnvelope};
use crate::domain::RetrieveAndGenerateRequest;

pub(crate) const CONFIG_ERROR_PREFIX: &str = "Failed to fetch config from SSM";

/// POST /v1/prompt
pub async fn prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> ResponseEnvelope {
    respond(&state, &HttpEvent::from_body(body), &request_id(&headers)).await
}

pub async fn handle_prompt(state: &AppState, event: &HttpEvent) -> ResponseEnvelope {
    respond(state, event, &new_request_id()).await
}

async fn respond(state: &AppState, event: &HttpEvent, request_id: &str) -> ResponseEnvelope {
    match answer(state, event, request_id).await {
        Ok(body) => ResponseEnvelope::ok(&body),
        Err(err) => {
            error!(request_id = %request_id, error = %err, "Prompt request failed");
            err.into_envelope()
        }
    }
}

async fn answer(
    state: &AppState,
    event: &HttpEvent,
    request_id: &str,
) -> Result<serde_json::Value, ApiError> {
    let query = event.query()?;
    info!(request_id = %request_id, query = %query, "Processing prompt request");

    let settings = state
        .configuration
        .knowledge_base()
        .await
        .map_err(|e| ApiError::internal_with(CONFIG_ERROR_PREFIX, e))?;

    let request = RetrieveAndGenerateRequest {
        knowledge_base_id: settings.knowledge_base_id,
        query,
        model_arn: state.generation.retrieve_and_generate_model_arn.clone(),
    };

    let answer = state
        .knowledge_base
        .retrieve_and_generate(request)
        .await
        .map_err(|e| ApiError::internal_with("Retrieve and generate failed", e))?;

    info!(
        request_id = %request_id,
        session_id = answer.session_id.as_deref().unwrap_or("none"),
        citations = answer.citation_count,
        "Generated answer"
    );

    Ok(json!({ "response": answer.text }))
}
