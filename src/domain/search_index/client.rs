use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Index administration on a search collection
#[async_trait]
pub trait SearchIndexClient: Send + Sync + Debug {
    async fn exists(&self, index: &str) -> Result<bool, DomainError>;

    async fn create(
        &self,
        index: &str,
        definition: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    async fn delete(&self, index: &str) -> Result<(), DomainError>;

    /// Settings and mappings of one index
    async fn get(&self, index: &str) -> Result<serde_json::Value, DomainError>;

    /// Summary rows for every index in the collection
    async fn list(&self) -> Result<Vec<serde_json::Value>, DomainError>;
}
