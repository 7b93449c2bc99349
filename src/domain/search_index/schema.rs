use serde::{Deserialize, Serialize};
use serde_json::json;

/// Dimensionality of the embedding model feeding the index
pub const VECTOR_DIMENSION: u32 = 1024;

/// Approximate-nearest-neighbour method descriptor of the vector field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnnMethod {
    pub name: String,
    pub engine: String,
    pub space_type: String,
}

impl Default for KnnMethod {
    fn default() -> Self {
        Self {
            name: "hnsw".to_string(),
            engine: "faiss".to_string(),
            space_type: "l2".to_string(),
        }
    }
}

/// Fixed vector index layout used by the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSchema {
    pub vector_field: String,
    pub dimension: u32,
    pub method: KnnMethod,
    pub text_field: String,
    pub metadata_field: String,
    pub shards: u32,
    pub replicas: u32,
    pub ef_search: u32,
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self {
            vector_field: "vector".to_string(),
            dimension: VECTOR_DIMENSION,
            method: KnnMethod::default(),
            text_field: "text".to_string(),
            metadata_field: "text-metadata".to_string(),
            shards: 1,
            replicas: 0,
            ef_search: 512,
        }
    }
}

impl IndexSchema {
    /// Index definition body as sent to the create-index API
    pub fn to_definition(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        properties.insert(
            self.vector_field.clone(),
            json!({
                "type": "knn_vector",
                "dimension": self.dimension,
                "method": {
                    "name": self.method.name,
                    "engine": self.method.engine,
                    "space_type": self.method.space_type,
                },
            }),
        );
        properties.insert(self.text_field.clone(), json!({ "type": "text" }));
        properties.insert(self.metadata_field.clone(), json!({ "type": "text" }));

        json!({
            "settings": {
                "index": {
                    "knn": true,
                    "number_of_shards": self.shards,
                    "number_of_replicas": self.replicas,
                    "knn.algo_param.ef_search": self.ef_search,
                }
            },
            "mappings": {
                "properties": properties,
            }
        })
    }
}
