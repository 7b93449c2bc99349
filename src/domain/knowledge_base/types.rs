use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of passages retrieved when the caller does not ask for a specific count
pub const DEFAULT_TOP_K: u32 = 5;

/// Semantic retrieval request against a knowledge base
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieveRequest {
    pub knowledge_base_id: String,
    pub query: String,
    pub top_k: u32,
}

impl RetrieveRequest {
    pub fn new(knowledge_base_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            knowledge_base_id: knowledge_base_id.into(),
            query: query.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}

/// A passage returned by retrieval, in ranking order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl RetrievedPassage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score: None,
            source_uri: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_source(mut self, uri: impl Into<String>) -> Self {
        self.source_uri = Some(uri.into());
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Combined retrieval + generation request
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieveAndGenerateRequest {
    pub knowledge_base_id: String,
    pub query: String,
    pub model_arn: String,
}

/// Answer produced by the managed retrieve-and-generate operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub citation_count: usize,
}

impl GeneratedAnswer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            session_id: None,
            citation_count: 0,
        }
    }
}

/// Ingestion job as reported when it was started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionJob {
    pub ingestion_job_id: String,
    pub status: String,
}

impl IngestionJob {
    pub fn new(ingestion_job_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            ingestion_job_id: ingestion_job_id.into(),
            status: status.into(),
        }
    }
}
