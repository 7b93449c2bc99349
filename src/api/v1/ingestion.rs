//! Ingestion trigger: starts a knowledge base ingestion job for new documents

use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::json;
use tracing::{error, info};

use super::{new_request_id, request_id};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ResponseEnvelope, S3Event};

/// POST /v1/ingestion
pub async fn trigger_ingestion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<serde_json::Value>,
) -> ResponseEnvelope {
    respond(&state, &event, &request_id(&headers)).await
}

/// Start one ingestion job for the configured knowledge base and data source.
///
/// The payload is only logged. Exactly one attempt is made.
pub async fn handle_ingestion(state: &AppState, event: &serde_json::Value) -> ResponseEnvelope {
    respond(state, event, &new_request_id()).await
}

async fn respond(
    state: &AppState,
    event: &serde_json::Value,
    request_id: &str,
) -> ResponseEnvelope {
    log_event(request_id, event);

    match start_ingestion(state).await {
        Ok(body) => ResponseEnvelope::ok(&body),
        Err(err) => {
            error!(request_id = %request_id, error = %err, "Ingestion trigger failed");
            err.into_envelope()
        }
    }
}

async fn start_ingestion(state: &AppState) -> Result<serde_json::Value, ApiError> {
    let settings = state
        .configuration
        .ingestion()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!(
        knowledge_base_id = %settings.knowledge_base_id,
        data_source_id = %settings.data_source_id,
        "Starting ingestion job"
    );

    let job = state
        .ingestion
        .start_ingestion_job(&settings.knowledge_base_id, &settings.data_source_id)
        .await?;

    info!(
        ingestion_job_id = %job.ingestion_job_id,
        status = %job.status,
        "Ingestion job started"
    );

    Ok(json!({
        "message": "Ingestion job initiated successfully",
        "ingestionJobId": job.ingestion_job_id,
        "status": job.status,
    }))
}

fn log_event(request_id: &str, event: &serde_json::Value) {
    match S3Event::from_payload(event) {
        Some(s3) => {
            for record in &s3.records {
                let event_time = record
                    .event_time
                    .map(|time| time.to_rfc3339())
                    .unwrap_or_else(|| "unknown".to_string());

                info!(
                    request_id = %request_id,
                    bucket = %record.s3.bucket.name,
                    key = %record.s3.object.key,
                    size = ?record.s3.object.size,
                    event_name = record.event_name.as_deref().unwrap_or("unknown"),
                    event_time = %event_time,
                    "Received S3 object notification"
                );
            }
        }
        None => info!(request_id = %request_id, event = %event, "Received event"),
    }
}
