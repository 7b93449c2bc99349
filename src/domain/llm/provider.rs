use async_trait::async_trait;
use std::fmt::Debug;

use super::{ConverseRequest, ConverseResponse};
use crate::domain::DomainError;

/// Chat-style generation backend
#[async_trait]
pub trait ConverseClient: Send + Sync + Debug {
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseResponse, DomainError>;

    /// Get provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}
