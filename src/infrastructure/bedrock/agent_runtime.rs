//! AWS Bedrock knowledge base runtime (retrieve, retrieve-and-generate)

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::Client as BedrockAgentRuntimeClient;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration, KnowledgeBaseRetrievalResult,
    KnowledgeBaseRetrieveAndGenerateConfiguration, KnowledgeBaseVectorSearchConfiguration,
    RetrieveAndGenerateConfiguration, RetrieveAndGenerateInput, RetrieveAndGenerateType,
};
use aws_smithy_types::Document as SmithyDocument;
use tracing::warn;

use crate::domain::{
    DomainError, GeneratedAnswer, KnowledgeBaseClient, RetrieveAndGenerateRequest,
    RetrieveRequest, RetrievedPassage,
};

/// Knowledge base client on top of the Bedrock agent runtime API
#[derive(Clone)]
pub struct BedrockKnowledgeBaseClient {
    client: BedrockAgentRuntimeClient,
}

impl Debug for BedrockKnowledgeBaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockKnowledgeBaseClient").finish()
    }
}

impl BedrockKnowledgeBaseClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: BedrockAgentRuntimeClient::new(config),
        }
    }
}

#[async_trait]
impl KnowledgeBaseClient for BedrockKnowledgeBaseClient {
    async fn retrieve(
        &self,
        request: RetrieveRequest,
    ) -> Result<Vec<RetrievedPassage>, DomainError> {
        let vector_config = KnowledgeBaseVectorSearchConfiguration::builder()
            .number_of_results(request.top_k as i32)
            .build();

        let retrieval_config = KnowledgeBaseRetrievalConfiguration::builder()
            .vector_search_configuration(vector_config)
            .build();

        let query = KnowledgeBaseQuery::builder().text(request.query).build();

        let response = self
            .client
            .retrieve()
            .knowledge_base_id(&request.knowledge_base_id)
            .retrieval_query(query)
            .retrieval_configuration(retrieval_config)
            .send()
            .await
            .map_err(|e| {
                DomainError::provider(
                    "bedrock-agent-runtime",
                    format!("Retrieve failed: {}", e.into_service_error()),
                )
            })?;

        let results = response.retrieval_results();
        let passages = to_passages(results);

        if passages.len() < results.len() {
            warn!(
                dropped = results.len() - passages.len(),
                returned = results.len(),
                "Dropped retrieval results without text content"
            );
        }

        Ok(passages)
    }

    async fn retrieve_and_generate(
        &self,
        request: RetrieveAndGenerateRequest,
    ) -> Result<GeneratedAnswer, DomainError> {
        let build_error = |e: aws_smithy_types::error::operation::BuildError| {
            DomainError::internal(format!("Failed to build retrieve-and-generate request: {}", e))
        };

        let input = RetrieveAndGenerateInput::builder()
            .text(request.query)
            .build()
            .map_err(build_error)?;

        let knowledge_base_config = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(request.knowledge_base_id)
            .model_arn(request.model_arn)
            .build()
            .map_err(build_error)?;

        let configuration = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(knowledge_base_config)
            .build()
            .map_err(build_error)?;

        let response = self
            .client
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(configuration)
            .send()
            .await
            .map_err(|e| {
                DomainError::provider(
                    "bedrock-agent-runtime",
                    format!("RetrieveAndGenerate failed: {}", e.into_service_error()),
                )
            })?;

        let text = response
            .output()
            .map(|o| o.text().to_string())
            .ok_or_else(|| {
                DomainError::provider("bedrock-agent-runtime", "Response contained no output")
            })?;

        Ok(GeneratedAnswer {
            text,
            session_id: Some(response.session_id().to_string()),
            citation_count: response.citations().len(),
        })
    }
}

fn to_passages(results: &[KnowledgeBaseRetrievalResult]) -> Vec<RetrievedPassage> {
    results.iter().filter_map(to_passage).collect()
}

fn to_passage(result: &KnowledgeBaseRetrievalResult) -> Option<RetrievedPassage> {
    let mut passage = RetrievedPassage::new(result.content()?.text());

    if let Some(score) = result.score() {
        passage = passage.with_score(score);
    }

    if let Some(uri) = result
        .location()
        .and_then(|l| l.s3_location())
        .and_then(|s3| s3.uri())
    {
        passage = passage.with_source(uri);
    }

    if let Some(metadata) = result.metadata() {
        let metadata: HashMap<String, serde_json::Value> = metadata
            .iter()
            .filter_map(|(key, doc)| doc_to_json(doc).map(|v| (key.clone(), v)))
            .collect();
        passage = passage.with_metadata(metadata);
    }

    Some(passage)
}

/// Convert AWS Smithy Document to serde_json::Value
fn doc_to_json(doc: &SmithyDocument) -> Option<serde_json::Value> {
    match doc {
        SmithyDocument::String(s) => Some(serde_json::Value::String(s.clone())),
        SmithyDocument::Number(n) => Some(serde_json::json!(n.to_f64_lossy())),
        SmithyDocument::Bool(b) => Some(serde_json::Value::Bool(*b)),
        SmithyDocument::Null => Some(serde_json::Value::Null),
        SmithyDocument::Array(arr) => Some(serde_json::Value::Array(
            arr.iter().filter_map(doc_to_json).collect(),
        )),
        SmithyDocument::Object(obj) => Some(serde_json::Value::Object(
            obj.iter()
                .filter_map(|(k, v)| doc_to_json(v).map(|val| (k.clone(), val)))
                .collect(),
        )),
    }
}
