use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Key/value parameter source (SSM Parameter Store, environment, ...)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ParameterStore: Send + Sync + Debug {
    /// Fetch the current value of a parameter by its full name
    async fn get_parameter(&self, name: &str) -> Result<String, DomainError>;

    /// Store name for logging/debugging
    fn store_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Fixed-value parameter store for handler tests
    #[derive(Debug, Default)]
    pub struct StaticParameterStore {
        values: RwLock<HashMap<String, String>>,
        failure: Option<String>,
    }

    impl StaticParameterStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
            self.values.write().unwrap().insert(name.into(), value.into());
            self
        }

        pub fn failing(message: impl Into<String>) -> Self {
            Self {
                values: RwLock::new(HashMap::new()),
                failure: Some(message.into()),
            }
        }

        /// Replace a value, as an operator updating the store would
        pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
            self.values.write().unwrap().insert(name.into(), value.into());
        }
    }

    #[async_trait]
    impl ParameterStore for StaticParameterStore {
        async fn get_parameter(&self, name: &str) -> Result<String, DomainError> {
            if let Some(message) = &self.failure {
                return Err(DomainError::provider("static", message.clone()));
            }

            self.values
                .read()
                .unwrap()
                .get(name)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("Parameter {} not found", name)))
        }

        fn store_name(&self) -> &'static str {
            "static"
        }
    }
}
