//! Knowledge base domain - managed retrieval, generation and ingestion

mod client;
mod types;

pub use client::{IngestionClient, KnowledgeBaseClient};
pub use types::{
    GeneratedAnswer, IngestionJob, RetrieveAndGenerateRequest, RetrieveRequest, RetrievedPassage,
    DEFAULT_TOP_K,
};

#[cfg(test)]
pub use client::mock;
