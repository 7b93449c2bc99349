//! Invoke command - runs one handler once, function style

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};

use crate::api::state::AppState;
use crate::api::types::{HttpEvent, ResponseEnvelope};
use crate::api::v1::{ingestion, prompt, retrieve};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Ingestion trigger (event: S3 notification)
    Ingest,
    /// Direct retrieve-and-generate (event: HTTP-style with a query body)
    Prompt,
    /// Retrieve-then-converse (event: HTTP-style with a query body)
    Retrieve,
}

#[derive(Args, Debug, Clone)]
pub struct InvokeArgs {
    /// Handler to run
    #[arg(value_enum)]
    pub handler: Handler,

    /// Event JSON file; reads stdin when omitted
    #[arg(long)]
    pub event: Option<PathBuf>,
}

/// Read the event, run the handler and print the result envelope
pub async fn run(args: InvokeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let event = read_event(args.event.as_ref())?;

    let state = crate::create_app_state(&config).await?;
    let envelope = dispatch(&state, args.handler, event).await;

    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}

pub async fn dispatch(
    state: &AppState,
    handler: Handler,
    event: serde_json::Value,
) -> ResponseEnvelope {
    match handler {
        Handler::Ingest => ingestion::handle_ingestion(state, &event).await,
        Handler::Prompt => prompt::handle_prompt(state, &http_event(event)).await,
        Handler::Retrieve => retrieve::handle_retrieve(state, &http_event(event)).await,
    }
}

/// Events without a usable `body` string fall through to the query check
fn http_event(event: serde_json::Value) -> HttpEvent {
    serde_json::from_value(event).unwrap_or_default()
}

fn read_event(path: Option<&PathBuf>) -> anyhow::Result<serde_json::Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read event from stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("Event is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::api::state::mock::TestState;
    use crate::domain::knowledge_base::mock::MockKnowledgeBaseClient;

    #[test]
    fn test_http_event_tolerates_other_shapes() {
        assert_eq!(http_event(json!({"body": 42})), HttpEvent::default());
        assert_eq!(http_event(json!("text")), HttpEvent::default());
        assert_eq!(
            http_event(json!({"body": "{\"query\":\"q\"}"})).body.as_deref(),
            Some("{\"query\":\"q\"}")
        );
    }

    #[tokio::test]
    async fn test_dispatch_prompt() {
        let test = TestState::new()
            .knowledge_base(MockKnowledgeBaseClient::new().with_answer("An answer."));

        let envelope = dispatch(
            &test.app_state(),
            Handler::Prompt,
            json!({"body": "{\"query\": \"What is Lambda?\"}"}),
        )
        .await;

        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body_json().unwrap(), json!({"response": "An answer."}));
    }

    #[tokio::test]
    async fn test_dispatch_without_body_is_400() {
        let test = TestState::new();

        let envelope = dispatch(&test.app_state(), Handler::Retrieve, json!({})).await;
        assert_eq!(envelope.status_code, 400);
    }

    #[test]
    fn test_read_event_from_missing_file() {
        let err = read_event(Some(&PathBuf::from("/nonexistent/event.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/event.json"));
    }
}
