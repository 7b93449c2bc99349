use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::v1;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::state::mock::TestState;
    use crate::domain::knowledge_base::mock::{MockIngestionClient, MockKnowledgeBaseClient};
    use crate::domain::llm::MockConverseClient;
    use crate::domain::{ConverseResponse, IngestionJob, RetrievedPassage};

    fn test_state() -> TestState {
        TestState::new()
            .knowledge_base(
                MockKnowledgeBaseClient::new()
                    .with_passages(vec![RetrievedPassage::new("AWS Lambda is serverless.")])
                    .with_answer("Lambda runs code without servers."),
            )
            .ingestion(
                MockIngestionClient::new().with_job(IngestionJob::new("JOB789", "STARTING")),
            )
            .converse(MockConverseClient::new().with_response(ConverseResponse::text(
                "Lambda is a serverless compute service.",
            )))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_router(test_state().app_state());

        for uri in ["/health", "/live", "/ready"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let app = create_router(test_state().app_state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_prompt_route() {
        let app = create_router(test_state().app_state());

        let response = app
            .oneshot(post("/v1/prompt", json!({"query": "What is Lambda?"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"response": "Lambda runs code without servers."})
        );
    }

    #[tokio::test]
    async fn test_retrieve_route_sets_content_type() {
        let app = create_router(test_state().app_state());

        let response = app
            .oneshot(post("/v1/retrieve", json!({"query": "What is Lambda?"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(
            body_json(response).await,
            json!({"response": "Lambda is a serverless compute service."})
        );
    }

    #[tokio::test]
    async fn test_retrieve_route_rejects_empty_body() {
        let app = create_router(test_state().app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/retrieve")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Missing user query."}));
    }

    #[tokio::test]
    async fn test_ingestion_route() {
        let test = test_state();
        let app = create_router(test.app_state());

        let response = app
            .oneshot(post(
                "/v1/ingestion",
                json!({"Records": [{"s3": {
                    "bucket": {"name": "rag-lab-docs"},
                    "object": {"key": "guides/lambda.pdf"}
                }}]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["ingestionJobId"], "JOB789");
        assert_eq!(test.ingestion.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_ingestion_route_rejects_malformed_json() {
        let app = create_router(test_state().app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/ingestion")
                    .header("content-type", "application/json")
                    .body(Body::from("{broken"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }
}
