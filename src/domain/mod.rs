//! Domain layer - Core entities and the service seams the handlers depend on

pub mod error;
pub mod knowledge_base;
pub mod llm;
pub mod parameters;
pub mod prompt;
pub mod search_index;

pub use error::DomainError;
pub use knowledge_base::{
    GeneratedAnswer, IngestionClient, IngestionJob, KnowledgeBaseClient,
    RetrieveAndGenerateRequest, RetrieveRequest, RetrievedPassage,
};
pub use llm::{
    ConverseClient, ConverseRequest, ConverseResponse, GuardrailConfig, GuardrailTrace,
    InferenceSettings, Message, MessageRole, StopReason, Usage,
};
pub use parameters::{
    ConfigurationProvider, GuardrailSettings, IngestionSettings, KnowledgeBaseSettings,
    ParameterNames, ParameterStore, ParameterStoreConfiguration,
};
pub use prompt::{PromptTemplate, RagPrompt};
pub use search_index::{IndexSchema, ReadinessPolicy, SearchIndexClient};
