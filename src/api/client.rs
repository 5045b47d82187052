//! reqwest-backed implementation of [`WatchlistApi`].

use super::{
    AddStockRequest, ApiError, DashboardSummary, DetailResponse, ErrorBody, HistoryFilter,
    MessageResponse, NoticeRequest, StockWatchEntry, WatchStatus, WatchlistApi,
};
use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the watchlist backend.
///
/// Endpoint paths are appended to the base URL's own path, and each dynamic
/// segment (stock codes, record ids) is percent-encoded on the way.
pub struct HttpApiClient {
    base_url: Url,
    health_path: String,
    client: Client,
}

impl HttpApiClient {
    /// Create a client from configuration, applying the optional request timeout.
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;
        Self::with_client(config, client)
    }

    /// Create a client around an existing reqwest client (for testing).
    pub fn with_client(config: &BackendConfig, client: Client) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::Configuration(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Configuration(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        Ok(Self {
            base_url,
            health_path: config.health_path.clone(),
            client,
        })
    }

    /// Build an absolute URL from path segments.
    pub fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from_reqwest)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail_text());
            tracing::debug!(status = status.as_u16(), ?detail, "Backend returned error status");
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WatchlistApi for HttpApiClient {
    async fn health(&self) -> Result<(), ApiError> {
        let url = self.endpoint(self.health_path.split('/').filter(|s| !s.is_empty()));
        tracing::debug!(url = %url, "Checking backend health");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Http {
                status: response.status().as_u16(),
                detail: None,
            })
        }
    }

    async fn summary(&self) -> Result<DashboardSummary, ApiError> {
        let url = self.endpoint(["api", "dashboard", "summary"]);
        self.execute(self.client.get(url)).await
    }

    async fn watchlist(&self, status: Option<WatchStatus>) -> Result<Vec<StockWatchEntry>, ApiError> {
        let url = self.endpoint(["api", "watchlist"]);
        let mut request = self.client.get(url);
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }
        self.execute(request).await
    }

    async fn history(&self, filter: HistoryFilter) -> Result<Vec<StockWatchEntry>, ApiError> {
        let url = self.endpoint(["api", "dashboard", "history"]);
        let mut request = self.client.get(url);
        if let Some(status) = filter.query_status() {
            request = request.query(&[("status", status)]);
        }
        self.execute(request).await
    }

    async fn detail(&self, stock_code: &str) -> Result<DetailResponse, ApiError> {
        let url = self.endpoint(["api", "watchlist", stock_code]);
        self.execute(self.client.get(url)).await
    }

    async fn add_stock(&self, stock_name: &str) -> Result<StockWatchEntry, ApiError> {
        let url = self.endpoint(["api", "watchlist"]);
        let body = AddStockRequest {
            stock_name: stock_name.to_string(),
        };
        self.execute(self.client.post(url).json(&body)).await
    }

    async fn remove_stock(&self, stock_code: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(["api", "watchlist", stock_code]);
        self.execute(self.client.delete(url)).await
    }

    async fn delete_history(&self, record_id: i64) -> Result<MessageResponse, ApiError> {
        let id = record_id.to_string();
        let url = self.endpoint(["api", "history", id.as_str()]);
        self.execute(self.client.delete(url)).await
    }

    async fn send_notice(&self, message: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(["api", "telegram", "notice"]);
        let body = NoticeRequest {
            message: message.to_string(),
        };
        self.execute(self.client.post(url).json(&body)).await
    }
}
