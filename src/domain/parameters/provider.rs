use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use serde::Deserialize;

use super::settings::{
    extract_data_source_id, GuardrailSettings, IngestionSettings, KnowledgeBaseSettings,
};
use super::store::ParameterStore;
use crate::domain::DomainError;

/// Resolves typed runtime settings.
///
/// Implementations must not cache: every call reflects the backing store
/// at the time of the call.
#[async_trait]
pub trait ConfigurationProvider: Send + Sync + Debug {
    async fn knowledge_base(&self) -> Result<KnowledgeBaseSettings, DomainError>;

    async fn ingestion(&self) -> Result<IngestionSettings, DomainError>;

    async fn guardrail(&self) -> Result<GuardrailSettings, DomainError>;
}

/// Names of the parameters backing each setting
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParameterNames {
    pub knowledge_base_id: String,
    pub data_source_id: String,
    pub guardrail_id: String,
    pub guardrail_version: String,
}

impl Default for ParameterNames {
    fn default() -> Self {
        Self {
            knowledge_base_id: "/rag-lab/knowledgebase/id".to_string(),
            data_source_id: "/rag-lab/datasource/id".to_string(),
            guardrail_id: "/rag-lab/bedrock/guardrail-id".to_string(),
            guardrail_version: "/rag-lab/bedrock/guardrail-version".to_string(),
        }
    }
}

/// Configuration provider reading every setting from a parameter store
#[derive(Debug, Clone)]
pub struct ParameterStoreConfiguration {
    store: Arc<dyn ParameterStore>,
    names: ParameterNames,
}

impl ParameterStoreConfiguration {
    pub fn new(store: Arc<dyn ParameterStore>, names: ParameterNames) -> Self {
        Self { store, names }
    }

    async fn fetch(&self, name: &str) -> Result<String, DomainError> {
        let value = self.store.get_parameter(name).await?;

        tracing::debug!(
            store = self.store.store_name(),
            parameter = %name,
            "Resolved parameter"
        );

        Ok(value)
    }
}

#[async_trait]
impl ConfigurationProvider for ParameterStoreConfiguration {
    async fn knowledge_base(&self) -> Result<KnowledgeBaseSettings, DomainError> {
        Ok(KnowledgeBaseSettings {
            knowledge_base_id: self.fetch(&self.names.knowledge_base_id).await?,
        })
    }

    async fn ingestion(&self) -> Result<IngestionSettings, DomainError> {
        let knowledge_base_id = self.fetch(&self.names.knowledge_base_id).await?;
        let descriptor = self.fetch(&self.names.data_source_id).await?;
        let data_source_id = extract_data_source_id(&descriptor)?;

        Ok(IngestionSettings {
            knowledge_base_id,
            data_source_id,
        })
    }

    async fn guardrail(&self) -> Result<GuardrailSettings, DomainError> {
        Ok(GuardrailSettings {
            identifier: self.fetch(&self.names.guardrail_id).await?,
            version: self.fetch(&self.names.guardrail_version).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameters::store::{mock::StaticParameterStore, MockParameterStore};
    use mockall::predicate::eq;

    fn configuration(store: impl ParameterStore + 'static) -> ParameterStoreConfiguration {
        ParameterStoreConfiguration::new(Arc::new(store), ParameterNames::default())
    }

    #[tokio::test]
    async fn test_ingestion_settings_split_descriptor() {
        let store = StaticParameterStore::new()
            .with_value("/rag-lab/knowledgebase/id", "KB123")
            .with_value("/rag-lab/datasource/id", "KB123|DS456");

        let settings = configuration(store).ingestion().await.unwrap();
        assert_eq!(settings.knowledge_base_id, "KB123");
        assert_eq!(settings.data_source_id, "DS456");
    }

    #[tokio::test]
    async fn test_ingestion_settings_reject_plain_descriptor() {
        let store = StaticParameterStore::new()
            .with_value("/rag-lab/knowledgebase/id", "KB123")
            .with_value("/rag-lab/datasource/id", "DS456");

        let err = configuration(store).ingestion().await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_guardrail_settings() {
        let store = StaticParameterStore::new()
            .with_value("/rag-lab/bedrock/guardrail-id", "gr-1")
            .with_value("/rag-lab/bedrock/guardrail-version", "3");

        let settings = configuration(store).guardrail().await.unwrap();
        assert_eq!(
            settings,
            GuardrailSettings {
                identifier: "gr-1".to_string(),
                version: "3".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_every_call_reads_the_store() {
        let mut store = MockParameterStore::new();
        store
            .expect_get_parameter()
            .with(eq("/rag-lab/knowledgebase/id"))
            .times(2)
            .returning(|_| Ok("KB123".to_string()));
        store.expect_store_name().return_const("mock");

        let configuration = configuration(store);
        configuration.knowledge_base().await.unwrap();
        configuration.knowledge_base().await.unwrap();
    }

    #[tokio::test]
    async fn test_updates_are_visible_on_next_call() {
        let store = Arc::new(
            StaticParameterStore::new().with_value("/rag-lab/knowledgebase/id", "KB-old"),
        );
        let configuration =
            ParameterStoreConfiguration::new(store.clone(), ParameterNames::default());

        assert_eq!(
            configuration.knowledge_base().await.unwrap().knowledge_base_id,
            "KB-old"
        );

        store.set("/rag-lab/knowledgebase/id", "KB-new");
        assert_eq!(
            configuration.knowledge_base().await.unwrap().knowledge_base_id,
            "KB-new"
        );
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let err = configuration(StaticParameterStore::failing("throttled"))
            .knowledge_base()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("throttled"));
    }
}
