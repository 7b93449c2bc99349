use async_trait::async_trait;
use aws_sdk_ssm::Client as SsmClient;

use crate::domain::{DomainError, ParameterStore};

/// Trait for SSM client operations (for mocking)
#[async_trait]
pub trait SsmClientTrait: Send + Sync + std::fmt::Debug {
    /// Returns `Ok(None)` when the parameter does not exist
    async fn get_parameter(&self, name: &str) -> Result<Option<String>, DomainError>;
}

/// Real AWS SSM client wrapper
#[derive(Debug, Clone)]
pub struct RealSsmClient {
    client: SsmClient,
}

impl RealSsmClient {
    pub fn new(client: SsmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SsmClientTrait for RealSsmClient {
    async fn get_parameter(&self, name: &str) -> Result<Option<String>, DomainError> {
        let response = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await;

        match response {
            Ok(output) => Ok(output
                .parameter()
                .and_then(|p| p.value())
                .map(str::to_string)),
            Err(e) => {
                let service_error = e.into_service_error();

                if service_error.is_parameter_not_found() {
                    Ok(None)
                } else {
                    Err(DomainError::provider(
                        "ssm",
                        format!("GetParameter {} failed: {}", name, service_error),
                    ))
                }
            }
        }
    }
}

/// Parameter store backed by AWS Systems Manager Parameter Store
#[derive(Debug)]
pub struct SsmParameterStore<C: SsmClientTrait> {
    client: C,
}

impl SsmParameterStore<RealSsmClient> {
    pub fn from_config(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: RealSsmClient::new(SsmClient::new(config)),
        }
    }
}

impl<C: SsmClientTrait> SsmParameterStore<C> {
    pub fn with_client(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: SsmClientTrait> ParameterStore for SsmParameterStore<C> {
    async fn get_parameter(&self, name: &str) -> Result<String, DomainError> {
        self.client
            .get_parameter(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Parameter {} not found", name)))
    }

    fn store_name(&self) -> &'static str {
        "ssm"
    }
}
