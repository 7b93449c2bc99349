//! One-shot (re)creation of the knowledge base vector index

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{DomainError, IndexSchema, ReadinessPolicy, SearchIndexClient};

/// Outcome of a bootstrap run
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub index: String,
    /// Whether an index with the same name existed and was dropped
    pub deleted_existing: bool,
    pub create_response: serde_json::Value,
    pub index_info: serde_json::Value,
    pub all_indices: Vec<serde_json::Value>,
}

/// Drops and recreates a vector index, waiting for each change to propagate
#[derive(Debug, Clone)]
pub struct IndexBootstrapService {
    client: Arc<dyn SearchIndexClient>,
    schema: IndexSchema,
    readiness: ReadinessPolicy,
}

impl IndexBootstrapService {
    pub fn new(client: Arc<dyn SearchIndexClient>) -> Self {
        Self {
            client,
            schema: IndexSchema::default(),
            readiness: ReadinessPolicy::default(),
        }
    }

    pub fn with_schema(mut self, schema: IndexSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_readiness(mut self, readiness: ReadinessPolicy) -> Self {
        self.readiness = readiness;
        self
    }

    /// Recreate `index` from the schema.
    ///
    /// Destructive: an existing index of that name is deleted with all its
    /// documents.
    pub async fn run(&self, index: &str) -> Result<BootstrapReport, DomainError> {
        let deleted_existing = if self.client.exists(index).await? {
            warn!(index = %index, "Deleting existing index");
            self.client.delete(index).await?;

            let polls = self
                .readiness
                .wait_until("index deletion", || async {
                    Ok::<_, DomainError>(!self.client.exists(index).await?)
                })
                .await?;
            info!(index = %index, polls, "Existing index deleted");
            true
        } else {
            false
        };

        let create_response = self
            .client
            .create(index, &self.schema.to_definition())
            .await?;
        info!(index = %index, response = %create_response, "Index creation requested");

        let polls = self
            .readiness
            .wait_until("index creation", || async { self.client.exists(index).await })
            .await?;
        info!(index = %index, polls, "Index is ready");

        let index_info = self.client.get(index).await?;
        info!(index = %index, info = %index_info, "Index info");

        let all_indices = self.client.list().await?;
        info!(count = all_indices.len(), "Listed indices in collection");

        Ok(BootstrapReport {
            index: index.to_string(),
            deleted_existing,
            create_response,
            index_info,
            all_indices,
        })
    }
}
