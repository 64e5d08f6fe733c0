use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::Client;
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::debug;

use crate::error::UpstreamError;

/// Search sent to the provider on every request.
pub const QUERY: &str = "tesla";
pub const FROM_DATE: &str = "2024-10-26";
pub const SORT_BY: &str = "publishedAt";

/// Source of the raw provider payload relayed by the proxy. Implementations
/// hand back the body bytes exactly as received, already checked to be JSON.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn tesla_news(&self) -> Result<Bytes, UpstreamError>;
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    articles: Vec<IgnoredAny>,
}

/// Fails unless `body` is a JSON object; returns its article count.
pub fn check_body(body: &[u8]) -> Result<usize, UpstreamError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    Ok(envelope.articles.len())
}

/// NewsAPI `everything` endpoint client.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("news-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn tesla_news(&self) -> Result<Bytes, UpstreamError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", QUERY),
                ("from", FROM_DATE),
                ("sortBy", SORT_BY),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let articles = check_body(&bytes)?;
        debug!(articles, bytes = bytes.len(), "provider responded");
        Ok(bytes)
    }
}
