use async_trait::async_trait;
use std::fmt::Debug;

use super::types::{
    GeneratedAnswer, IngestionJob, RetrieveAndGenerateRequest, RetrieveRequest, RetrievedPassage,
};
use crate::domain::DomainError;

/// Runtime operations on a managed knowledge base
#[async_trait]
pub trait KnowledgeBaseClient: Send + Sync + Debug {
    /// Semantic retrieval, results in the order the service ranked them
    async fn retrieve(&self, request: RetrieveRequest)
        -> Result<Vec<RetrievedPassage>, DomainError>;

    /// Retrieval and answer generation in a single managed call
    async fn retrieve_and_generate(
        &self,
        request: RetrieveAndGenerateRequest,
    ) -> Result<GeneratedAnswer, DomainError>;
}

/// Control-plane operations that (re)index a data source into a knowledge base
#[async_trait]
pub trait IngestionClient: Send + Sync + Debug {
    /// Start an asynchronous ingestion job.
    ///
    /// Service-side validation failures surface as [`DomainError::Validation`],
    /// unknown knowledge bases or data sources as [`DomainError::NotFound`].
    async fn start_ingestion_job(
        &self,
        knowledge_base_id: &str,
        data_source_id: &str,
    ) -> Result<IngestionJob, DomainError>;
}
