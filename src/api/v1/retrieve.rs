//! Retrieve-then-converse: retrieval, prompt assembly and guarded generation

use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::json;
use tracing::{error, info};

use super::prompt::CONFIG_ERROR_PREFIX;
use super::{new_request_id, request_id};
use crate::api::state::AppState;
use crate::api::types::{ApiError, HttpEvent, ResponseEnvelope};
use crate::domain::{
    ConverseRequest, ConverseResponse, GuardrailConfig, Message, RagPrompt, RetrieveRequest,
};

const CONVERSE_ERROR_PREFIX: &str = "Converse API failed";

/// POST /v1/retrieve
pub async fn retrieve(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> ResponseEnvelope {
    respond(&state, &HttpEvent::from_body(body), &request_id(&headers)).await
}

pub async fn handle_retrieve(state: &AppState, event: &HttpEvent) -> ResponseEnvelope {
    respond(state, event, &new_request_id()).await
}

async fn respond(state: &AppState, event: &HttpEvent, request_id: &str) -> ResponseEnvelope {
    match answer(state, event, request_id).await {
        Ok(body) => ResponseEnvelope::ok(&body).json_content_type(),
        Err(err) => {
            error!(request_id = %request_id, error = %err, "Retrieve request failed");
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
    info!(request_id = %request_id, query = %query, "Processing retrieve request");

    let contexts = retrieve_contexts(state, &query).await?;
    info!(request_id = %request_id, passages = contexts.len(), "Retrieved context");

    let response = converse(state, &contexts, &query).await?;
    let usage = response.usage.unwrap_or_default();
    info!(
        request_id = %request_id,
        provider = state.converse.provider_name(),
        stop_reason = ?response.stop_reason,
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        total_tokens = usage.total_tokens,
        "Generated answer"
    );
    log_guardrail_trace(request_id, &response);

    let text = response.first_text().ok_or_else(|| {
        ApiError::internal_with(CONVERSE_ERROR_PREFIX, "response contained no text")
    })?;

    let mut body = json!({ "response": text });
    if response.guardrail_intervened() {
        info!(request_id = %request_id, "Guardrail intervened in the response");
        body["guardrailAction"] = json!("INTERVENED");
    }

    Ok(body)
}

/// Passage texts in the order the service ranked them
async fn retrieve_contexts(state: &AppState, query: &str) -> Result<Vec<String>, ApiError> {
    let settings = state
        .configuration
        .knowledge_base()
        .await
        .map_err(|e| ApiError::internal_with(CONFIG_ERROR_PREFIX, e))?;

    let request = RetrieveRequest::new(settings.knowledge_base_id, query)
        .with_top_k(state.generation.top_k);

    let passages = state
        .knowledge_base
        .retrieve(request)
        .await
        .map_err(|e| ApiError::internal_with("Retrieve failed", e))?;

    Ok(passages.into_iter().map(|p| p.text).collect())
}

async fn converse(
    state: &AppState,
    contexts: &[String],
    query: &str,
) -> Result<ConverseResponse, ApiError> {
    let guardrail = state
        .configuration
        .guardrail()
        .await
        .map_err(|e| ApiError::internal_with(CONFIG_ERROR_PREFIX, e))?;

    let prompt = RagPrompt::build(contexts, query)
        .map_err(|e| ApiError::internal_with(CONVERSE_ERROR_PREFIX, e))?;

    let request = ConverseRequest::builder(&state.generation.converse_model_id)
        .system(prompt.system)
        .message(Message::user(prompt.user))
        .inference(state.generation.inference())
        .guardrail(GuardrailConfig::from(guardrail))
        .build();

    state
        .converse
        .converse(request)
        .await
        .map_err(|e| ApiError::internal_with(CONVERSE_ERROR_PREFIX, e))
}

fn log_guardrail_trace(request_id: &str, response: &ConverseResponse) {
    let trace = match &response.guardrail_trace {
        Some(trace) if !trace.is_empty() => trace,
        _ => {
            info!(request_id = %request_id, "No guardrail interventions detected");
            return;
        }
    };

    for assessment in trace.assessments() {
        let findings = serde_json::to_string(&assessment.findings).unwrap_or_default();

        info!(
            request_id = %request_id,
            stage = ?assessment.stage,
            guardrail = %assessment.source,
            findings = %findings,
            latency_ms = ?assessment.processing_latency_ms,
            "Guardrail assessment"
        );
    }

    if let Some(reason) = &trace.action_reason {
        info!(request_id = %request_id, reason = %reason, "Guardrail action reason");
    }
}
