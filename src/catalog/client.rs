//! Catalog REST API Client
//!
//! HTTP client for the catalog backend's read endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{ApiError, ApiResult, CatalogSource, MovieQuery, MovieRecord, OverviewMetrics};

/// Catalog REST API client
pub struct CatalogClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the catalog client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Bearer token sent with every request, if set
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 30_000,
            token: None,
        }
    }
}

impl CatalogClient {
    /// Create a new catalog client with the given configuration
    pub fn new(mut config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::from_transport)?;

        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn movies_url(&self, page: u32, size: u32, query: &MovieQuery) -> String {
        format!(
            "{}/api/movies?page={}&size={}{}",
            self.config.base_url,
            page,
            size,
            query.to_query_suffix()
        )
    }

    /// GET a URL and decode its JSON body
    ///
    /// Bodies that are not JSON are `Decode` errors; JSON that does not fit
    /// `T` is `UnexpectedShape`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(ApiError::from_transport)?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        serde_json::from_value(value).map_err(|e| ApiError::UnexpectedShape(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn overview(&self) -> ApiResult<OverviewMetrics> {
        let url = format!("{}/api/metrics/overview", self.config.base_url);
        tracing::debug!(url = %url, "Fetching overview metrics");
        self.get_json(&url).await
    }

    async fn movies_page(
        &self,
        page: u32,
        size: u32,
        query: &MovieQuery,
    ) -> ApiResult<Vec<MovieRecord>> {
        let url = self.movies_url(page, size, query);
        tracing::debug!(page, size, url = %url, "Fetching movie page");
        self.get_json(&url).await
    }
}
