//! Inbound event shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Message returned for any request without a usable query
pub const MISSING_QUERY_MESSAGE: &str = "Missing user query.";

/// HTTP-style invocation event; `body` carries a JSON document as a string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    #[serde(default)]
    pub body: Option<String>,
}

impl HttpEvent {
    pub fn from_body(body: impl Into<String>) -> Self {
        let body = body.into();

        Self {
            body: (!body.is_empty()).then_some(body),
        }
    }

    /// The `query` field of the body.
    ///
    /// A missing or unparsable body, a missing or non-string `query`, and an
    /// empty query are all rejected the same way. Whitespace is passed through.
    pub fn query(&self) -> Result<String, ApiError> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| ApiError::bad_request(MISSING_QUERY_MESSAGE))?;

        let payload: serde_json::Value = serde_json::from_str(body)
            .map_err(|_| ApiError::bad_request(MISSING_QUERY_MESSAGE))?;

        match payload.get("query").and_then(serde_json::Value::as_str) {
            Some(query) if !query.is_empty() => Ok(query.to_string()),
            _ => Err(ApiError::bad_request(MISSING_QUERY_MESSAGE)),
        }
    }
}

/// S3 object-created notification
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records")]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
    #[serde(default)]
    pub size: Option<u64>,
}

impl S3Event {
    /// Interpret an arbitrary payload as an S3 notification, if it is one
    pub fn from_payload(payload: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }
}
