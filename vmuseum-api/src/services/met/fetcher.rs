//! JSON HTTP fetcher
//!
//! One GET per call, full body read, parsed as JSON. No retries.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Upstream catalog errors
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Connection could not be established, was reset, or the body was cut short
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Body is not valid JSON or does not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Deadline elapsed before the call settled
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The seed search of an aggregation failed outright
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),
}

/// Source of JSON documents addressed by URL
///
/// Production code uses [`HttpJsonFetcher`]; tests substitute scripted fetchers.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &Url) -> Result<Value, UpstreamError>;
}

/// reqwest-backed fetcher
pub struct HttpJsonFetcher {
    http_client: reqwest::Client,
}

impl HttpJsonFetcher {
    pub fn new(user_agent: &str, request_timeout: Duration) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(request_timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, UpstreamError> {
        tracing::debug!(url = %url, "GET upstream");

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}
