use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::signer::SigV4Signer;
use crate::domain::{DomainError, SearchIndexClient};

/// OpenSearch (Serverless) index administration over HTTP
#[derive(Debug, Clone)]
pub struct OpenSearchIndexClient {
    endpoint: String,
    http_client: reqwest::Client,
    signer: Option<SigV4Signer>,
}

impl OpenSearchIndexClient {
    /// Unsigned client; collections behind IAM need [`Self::with_signer`]
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint),
            http_client: reqwest::Client::new(),
            signer: None,
        }
    }

    pub fn with_signer(mut self, signer: SigV4Signer) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, DomainError> {
        let url = format!("{}/{}", self.endpoint, path);
        let body = body.unwrap_or_default();

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .header("content-type", "application/json");

        if let Some(signer) = &self.signer {
            let headers = signer
                .sign(
                    method.as_str(),
                    &url,
                    &[("content-type", "application/json")],
                    &body,
                )
                .await?;

            for (name, value) in headers {
                request = request.header(name, value);
            }
        }

        if !body.is_empty() {
            request = request.body(body);
        }

        tracing::debug!(method = %method, url = %url, "Sending index request");

        request.send().await.map_err(|e| {
            DomainError::provider("opensearch", format!("{} {} failed: {}", method, url, e))
        })
    }

    async fn json(response: reqwest::Response) -> Result<serde_json::Value, DomainError> {
        response.json().await.map_err(|e| {
            DomainError::provider("opensearch", format!("Failed to parse response: {}", e))
        })
    }
}

/// Fail on non-success statuses, keeping the service's error body in the message
async fn ensure_success(
    response: reqwest::Response,
    action: &str,
) -> Result<reqwest::Response, DomainError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = format!("{} returned {}: {}", action, status, body);

    Err(match status {
        StatusCode::NOT_FOUND => DomainError::not_found(message),
        StatusCode::BAD_REQUEST => DomainError::validation(message),
        _ => DomainError::provider("opensearch", message),
    })
}

/// Collection endpoints are often configured as a bare host
fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');

    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}

#[async_trait]
impl SearchIndexClient for OpenSearchIndexClient {
    async fn exists(&self, index: &str) -> Result<bool, DomainError> {
        let response = self.send(Method::HEAD, index, None).await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(DomainError::provider(
                "opensearch",
                format!("Index existence check returned {}", status),
            )),
        }
    }

    async fn create(
        &self,
        index: &str,
        definition: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let body = serde_json::to_vec(definition)
            .map_err(|e| DomainError::internal(format!("Invalid index definition: {}", e)))?;

        let response = self.send(Method::PUT, index, Some(body)).await?;
        let response = ensure_success(response, "Index creation").await?;

        Self::json(response).await
    }

    async fn delete(&self, index: &str) -> Result<(), DomainError> {
        let response = self.send(Method::DELETE, index, None).await?;
        ensure_success(response, "Index deletion").await?;

        Ok(())
    }

    async fn get(&self, index: &str) -> Result<serde_json::Value, DomainError> {
        let response = self.send(Method::GET, index, None).await?;
        let response = ensure_success(response, "Index lookup").await?;

        Self::json(response).await
    }

    async fn list(&self) -> Result<Vec<serde_json::Value>, DomainError> {
        let response = self
            .send(Method::GET, "_cat/indices?format=json", None)
            .await?;
        let response = ensure_success(response, "Index listing").await?;

        match Self::json(response).await? {
            serde_json::Value::Array(rows) => Ok(rows),
            other => Err(DomainError::provider(
                "opensearch",
                format!("Expected an array of indices, got {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::provider::SharedCredentialsProvider;
    use aws_credential_types::Credentials;
    use serde_json::json;
    use wiremock::matchers::{body_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(
            normalize_endpoint("abc.eu-central-1.aoss.amazonaws.com"),
            "https://abc.eu-central-1.aoss.amazonaws.com"
        );
        assert_eq!(
            normalize_endpoint("https://abc.eu-central-1.aoss.amazonaws.com/"),
            "https://abc.eu-central-1.aoss.amazonaws.com"
        );
        assert_eq!(normalize_endpoint("http://localhost:9200"), "http://localhost:9200");
    }

    #[tokio::test]
    async fn test_exists_maps_status() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/present"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/absent"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = OpenSearchIndexClient::new(&server.uri());
        assert!(client.exists("present").await.unwrap());
        assert!(!client.exists("absent").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_sends_definition() {
        let server = MockServer::start().await;
        let definition = json!({"settings": {"index": {"knn": true}}});

        Mock::given(method("PUT"))
            .and(path("/88-busta"))
            .and(body_json(&definition))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "acknowledged": true,
                "shards_acknowledged": true,
                "index": "88-busta"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenSearchIndexClient::new(&server.uri());
        let response = client.create("88-busta", &definition).await.unwrap();

        assert_eq!(response["acknowledged"], true);
        assert_eq!(response["index"], "88-busta");
    }

    #[tokio::test]
    async fn test_create_conflict_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/88-busta"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"error":{"type":"resource_already_exists_exception"}}"#),
            )
            .mount(&server)
            .await;

        let client = OpenSearchIndexClient::new(&server.uri());
        let err = client.create("88-busta", &json!({})).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(err.to_string().contains("resource_already_exists_exception"));
    }

    #[tokio::test]
    async fn test_delete_missing_index_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = OpenSearchIndexClient::new(&server.uri());
        let err = client.delete("gone").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_reads_cat_indices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_cat/indices"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"index": "88-busta", "health": "green"},
                {"index": "other", "health": "green"}
            ])))
            .mount(&server)
            .await;

        let client = OpenSearchIndexClient::new(&server.uri());
        let rows = client.list().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["index"], "88-busta");
    }

    #[tokio::test]
    async fn test_signed_requests_carry_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/88-busta"))
            .and(header_exists("authorization"))
            .and(header_exists("x-amz-date"))
            .and(header_exists("x-amz-content-sha256"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"88-busta": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = Credentials::new("AKIDEXAMPLE", "secret", None, None, "test");
        let signer = SigV4Signer::new(
            SharedCredentialsProvider::new(credentials),
            "eu-central-1",
            "aoss",
        );

        let client = OpenSearchIndexClient::new(&server.uri()).with_signer(signer);
        let info = client.get("88-busta").await.unwrap();
        assert!(info.get("88-busta").is_some());
    }
}
