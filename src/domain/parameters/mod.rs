//! Runtime configuration resolved from a parameter store

mod provider;
mod settings;
mod store;

pub use provider::{ConfigurationProvider, ParameterNames, ParameterStoreConfiguration};
pub use settings::{
    extract_data_source_id, GuardrailSettings, IngestionSettings, KnowledgeBaseSettings,
    DATA_SOURCE_SEPARATOR,
};
pub use store::ParameterStore;

#[cfg(test)]
pub use store::mock;
#[cfg(test)]
pub use store::MockParameterStore;
