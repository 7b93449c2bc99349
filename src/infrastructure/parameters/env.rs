use async_trait::async_trait;
use std::collections::HashMap;
use std::env;

use crate::domain::{DomainError, ParameterStore};

/// Parameter store that reads parameters from environment variables.
///
/// A parameter name maps to a variable by upper-casing it and replacing every
/// non-alphanumeric character with `_`, so `/rag-lab/knowledgebase/id`
/// becomes `RAG_LAB_KNOWLEDGEBASE_ID`. Explicit overrides take precedence.
#[derive(Debug, Default)]
pub struct EnvParameterStore {
    overrides: HashMap<String, String>,
}

impl EnvParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `parameter_name` from `env_var` instead of the derived variable
    pub fn with_mapping(
        mut self,
        parameter_name: impl Into<String>,
        env_var: impl Into<String>,
    ) -> Self {
        self.overrides.insert(parameter_name.into(), env_var.into());
        self
    }

    pub fn variable_name(&self, parameter_name: &str) -> String {
        if let Some(var) = self.overrides.get(parameter_name) {
            return var.clone();
        }

        parameter_name
            .trim_matches('/')
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[async_trait]
impl ParameterStore for EnvParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String, DomainError> {
        let var = self.variable_name(name);

        env::var(&var).map_err(|_| {
            DomainError::not_found(format!(
                "Parameter {} not found (environment variable {})",
                name, var
            ))
        })
    }

    fn store_name(&self) -> &'static str {
        "env"
    }
}
