//! Bedrock RAG lab
//!
//! Retrieval-augmented generation as orchestration over managed AWS services:
//! - Knowledge base ingestion triggered by new documents
//! - Direct retrieve-and-generate answers
//! - Retrieval followed by guarded Converse generation
//! - One-shot vector index bootstrap on OpenSearch Serverless

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::ParameterSource;
use domain::{ParameterStore, ParameterStoreConfiguration};
use infrastructure::{
    bedrock::{BedrockConverseClient, BedrockIngestionClient, BedrockKnowledgeBaseClient},
    parameters::{EnvParameterStore, SsmParameterStore},
};
use tracing::info;

/// Load the AWS SDK configuration for `region` from the default provider chain
pub async fn load_aws_config(region: &str) -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await
}

/// Create the application state with all service clients initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let sdk_config = load_aws_config(&config.aws.region).await;

    let store: Arc<dyn ParameterStore> = match config.parameters.source {
        ParameterSource::Ssm => Arc::new(SsmParameterStore::from_config(&sdk_config)),
        ParameterSource::Env => Arc::new(EnvParameterStore::new()),
    };

    info!(
        region = %config.aws.region,
        parameter_store = store.store_name(),
        "Initializing service clients"
    );

    let configuration =
        ParameterStoreConfiguration::new(store, config.parameters.names.clone());

    Ok(AppState::new(
        Arc::new(configuration),
        Arc::new(BedrockKnowledgeBaseClient::new(&sdk_config)),
        Arc::new(BedrockIngestionClient::new(&sdk_config)),
        Arc::new(BedrockConverseClient::new(&sdk_config)),
    )
    .with_generation(config.generation.clone()))
}
