//! Application state for shared services

use std::sync::Arc;

use crate::config::GenerationConfig;
use crate::domain::{ConfigurationProvider, ConverseClient, IngestionClient, KnowledgeBaseClient};

/// Services the handlers depend on.
///
/// Clients are stateless and shared; identifiers are resolved through
/// `configuration` on every invocation.
#[derive(Clone, Debug)]
pub struct AppState {
    pub configuration: Arc<dyn ConfigurationProvider>,
    pub knowledge_base: Arc<dyn KnowledgeBaseClient>,
    pub ingestion: Arc<dyn IngestionClient>,
    pub converse: Arc<dyn ConverseClient>,
    pub generation: GenerationConfig,
}

impl AppState {
    pub fn new(
        configuration: Arc<dyn ConfigurationProvider>,
        knowledge_base: Arc<dyn KnowledgeBaseClient>,
        ingestion: Arc<dyn IngestionClient>,
        converse: Arc<dyn ConverseClient>,
    ) -> Self {
        Self {
            configuration,
            knowledge_base,
            ingestion,
            converse,
            generation: GenerationConfig::default(),
        }
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;

    use crate::domain::knowledge_base::mock::{MockIngestionClient, MockKnowledgeBaseClient};
    use crate::domain::llm::MockConverseClient;
    use crate::domain::parameters::mock::StaticParameterStore;
    use crate::domain::{ParameterNames, ParameterStoreConfiguration};

    pub const KNOWLEDGE_BASE_ID: &str = "KB123";
    pub const DATA_SOURCE_ID: &str = "DS456";
    pub const GUARDRAIL_ID: &str = "gr-abc";
    pub const GUARDRAIL_VERSION: &str = "3";

    /// Handler state over mocks, keeping handles for assertions
    pub struct TestState {
        pub store: Arc<StaticParameterStore>,
        pub knowledge_base: Arc<MockKnowledgeBaseClient>,
        pub ingestion: Arc<MockIngestionClient>,
        pub converse: Arc<MockConverseClient>,
    }

    impl TestState {
        pub fn new() -> Self {
            Self::with_store(populated_store())
        }

        pub fn with_store(store: StaticParameterStore) -> Self {
            Self {
                store: Arc::new(store),
                knowledge_base: Arc::new(MockKnowledgeBaseClient::new()),
                ingestion: Arc::new(MockIngestionClient::new()),
                converse: Arc::new(MockConverseClient::new()),
            }
        }

        pub fn knowledge_base(mut self, client: MockKnowledgeBaseClient) -> Self {
            self.knowledge_base = Arc::new(client);
            self
        }

        pub fn ingestion(mut self, client: MockIngestionClient) -> Self {
            self.ingestion = Arc::new(client);
            self
        }

        pub fn converse(mut self, client: MockConverseClient) -> Self {
            self.converse = Arc::new(client);
            self
        }

        pub fn app_state(&self) -> AppState {
            let configuration =
                ParameterStoreConfiguration::new(self.store.clone(), ParameterNames::default());

            AppState::new(
                Arc::new(configuration),
                self.knowledge_base.clone(),
                self.ingestion.clone(),
                self.converse.clone(),
            )
        }
    }

    pub fn populated_store() -> StaticParameterStore {
        let names = ParameterNames::default();

        StaticParameterStore::new()
            .with_value(names.knowledge_base_id, KNOWLEDGE_BASE_ID)
            .with_value(
                names.data_source_id,
                format!("{}|{}", KNOWLEDGE_BASE_ID, DATA_SOURCE_ID),
            )
            .with_value(names.guardrail_id, GUARDRAIL_ID)
            .with_value(names.guardrail_version, GUARDRAIL_VERSION)
    }
}
