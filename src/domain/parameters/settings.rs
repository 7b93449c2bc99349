use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Separator used by the composite data source descriptor (`<knowledge-base-id>|<data-source-id>`)
pub const DATA_SOURCE_SEPARATOR: char = '|';

/// Knowledge base the query handlers retrieve from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseSettings {
    pub knowledge_base_id: String,
}

/// Identifiers needed to start an ingestion job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionSettings {
    pub knowledge_base_id: String,
    pub data_source_id: String,
}

/// Guardrail policy applied to the converse call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailSettings {
    pub identifier: String,
    pub version: String,
}

/// Extract the data source id from its composite descriptor.
///
/// The descriptor is split on `|` and the second segment is used, so
/// `"kb-123|ds-456"` yields `"ds-456"`. A descriptor without a second
/// segment is a configuration error.
pub fn extract_data_source_id(descriptor: &str) -> Result<String, DomainError> {
    descriptor
        .split(DATA_SOURCE_SEPARATOR)
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| {
            DomainError::configuration(format!(
                "Data source descriptor '{}' has no '{}' separated data source id",
                descriptor, DATA_SOURCE_SEPARATOR
            ))
        })
}
