//! AWS Bedrock adapters

mod agent;
mod agent_runtime;
mod runtime;

pub use agent::BedrockIngestionClient;
pub use agent_runtime::BedrockKnowledgeBaseClient;
pub use runtime::BedrockConverseClient;
