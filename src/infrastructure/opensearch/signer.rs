//! SigV4 request signing for OpenSearch Serverless

use std::fmt::Debug;
use std::time::SystemTime;

use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{
    sign, PayloadChecksumKind, SignableBody, SignableRequest, SigningParams, SigningSettings,
};
use aws_sigv4::sign::v4;

use crate::domain::DomainError;

/// Signs HTTP requests for one AWS service in one region
#[derive(Clone)]
pub struct SigV4Signer {
    credentials: SharedCredentialsProvider,
    region: String,
    service: String,
}

impl Debug for SigV4Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigV4Signer")
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}

impl SigV4Signer {
    pub fn new(
        credentials: SharedCredentialsProvider,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            region: region.into(),
            service: service.into(),
        }
    }

    /// Use the credential chain of a loaded SDK config
    pub fn from_config(
        config: &aws_config::SdkConfig,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let credentials = config.credentials_provider().ok_or_else(|| {
            DomainError::configuration("No AWS credentials provider is configured")
        })?;

        Ok(Self::new(credentials, region, service))
    }

    /// Compute the signing headers for a request.
    ///
    /// The returned headers (`authorization`, `x-amz-date`,
    /// `x-amz-content-sha256`, and `x-amz-security-token` for session
    /// credentials) must be added to the request as-is.
    pub async fn sign(
        &self,
        method: &str,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<Vec<(String, String)>, DomainError> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|e| DomainError::configuration(format!("Failed to load credentials: {}", e)))?;
        let identity = credentials.into();

        let mut settings = SigningSettings::default();
        // OpenSearch Serverless requires the payload hash header
        settings.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;

        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(&self.service)
            .time(SystemTime::now())
            .settings(settings)
            .build()
            .map_err(|e| DomainError::internal(format!("Invalid signing parameters: {}", e)))?
            .into();

        let signable = SignableRequest::new(
            method,
            url,
            headers.iter().copied(),
            SignableBody::Bytes(body),
        )
        .map_err(|e| DomainError::internal(format!("Request cannot be signed: {}", e)))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| DomainError::internal(format!("Signing failed: {}", e)))?
            .into_parts();

        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}
