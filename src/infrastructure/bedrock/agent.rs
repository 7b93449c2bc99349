//! AWS Bedrock agent control plane (knowledge base ingestion jobs)

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_bedrockagent::Client as BedrockAgentClient;
use aws_sdk_bedrockagent::operation::start_ingestion_job::StartIngestionJobError;

use crate::domain::{DomainError, IngestionClient, IngestionJob};

/// Ingestion client on top of the Bedrock agent API
#[derive(Clone)]
pub struct BedrockIngestionClient {
    client: BedrockAgentClient,
}

impl Debug for BedrockIngestionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockIngestionClient").finish()
    }
}

impl BedrockIngestionClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: BedrockAgentClient::new(config),
        }
    }
}

#[async_trait]
impl IngestionClient for BedrockIngestionClient {
    async fn start_ingestion_job(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
    ) -> Result<IngestionJob, DomainError> {
        let response = self
            .client
            .start_ingestion_job()
            .knowledge_base_id(knowledge_base_id)
            .data_source_id(data_source_id)
            .send()
            .await
            .map_err(|e| map_start_error(e.into_service_error()))?;

        let job = response.ingestion_job().ok_or_else(|| {
            DomainError::provider("bedrock-agent", "Response contained no ingestion job")
        })?;

        Ok(IngestionJob::new(
            job.ingestion_job_id(),
            job.status().as_str(),
        ))
    }
}

fn map_start_error(error: StartIngestionJobError) -> DomainError {
    match &error {
        StartIngestionJobError::ValidationException(e) => {
            DomainError::validation(e.message().unwrap_or("request rejected").to_string())
        }
        StartIngestionJobError::ResourceNotFoundException(e) => {
            DomainError::not_found(e.message().unwrap_or("resource does not exist").to_string())
        }
        _ => DomainError::provider("bedrock-agent", error.to_string()),
    }
}
