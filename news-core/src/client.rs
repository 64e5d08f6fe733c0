use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};
use url::Url;

use crate::article::{Article, NewsResponse};
use crate::error::FetchError;

/// Path of the relay endpoint on the proxy.
pub const NEWS_PATH: &str = "/api/tesla-news";

/// Anything that can produce the full article list in one call.
#[async_trait]
pub trait ArticleFeed: Send + Sync {
    async fn fetch_articles(&self) -> Result<Vec<Article>, FetchError>;
}

/// Fetches articles from the proxy service.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    endpoint: Url,
    bearer: Option<String>,
}

impl ProxyClient {
    pub fn new(client: Client, base_url: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(base_url)?.join(NEWS_PATH)?;
        Ok(Self {
            client,
            endpoint,
            bearer: None,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn fetch_news(&self) -> Result<NewsResponse, FetchError> {
        let mut request = self.client.get(self.endpoint.clone());
        if let Some(token) = &self.bearer {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.endpoint, %status, "proxy returned an error status");
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        let news: NewsResponse = serde_json::from_slice(&bytes)?;
        debug!(count = news.articles.len(), total = ?news.total_results(), "fetched articles");
        Ok(news)
    }
}

#[async_trait]
impl ArticleFeed for ProxyClient {
    async fn fetch_articles(&self) -> Result<Vec<Article>, FetchError> {
        Ok(self.fetch_news().await?.articles)
    }
}
