//! Watchlist backend API: wire types, errors and the client abstraction.
//!
//! [`WatchlistApi`] is the seam between the dashboard and the network. The
//! production implementation is [`HttpApiClient`]; tests substitute in-memory
//! fakes.

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod types;

pub use client::HttpApiClient;
pub use error::ApiError;
pub use types::{
    AddStockRequest, DailyPrice, DashboardSummary, DetailResponse, ErrorBody, HistoryFilter,
    MessageResponse, NoticeRequest, StockWatchEntry, WatchStatus,
};

/// Operations offered by the watchlist backend.
///
/// # Errors
///
/// Every method returns [`ApiError::Network`] when the request cannot be sent,
/// [`ApiError::Http`] for non-2xx answers (carrying the `detail` text when the
/// backend provides one) and [`ApiError::InvalidResponse`] for bodies that do
/// not decode.
#[async_trait]
pub trait WatchlistApi: Send + Sync + 'static {
    /// Liveness probe; any 2xx answer counts as healthy.
    async fn health(&self) -> Result<(), ApiError>;

    /// `GET /api/dashboard/summary`
    async fn summary(&self) -> Result<DashboardSummary, ApiError>;

    /// `GET /api/watchlist?status=`
    async fn watchlist(&self, status: Option<WatchStatus>) -> Result<Vec<StockWatchEntry>, ApiError>;

    /// `GET /api/dashboard/history?status=`
    async fn history(&self, filter: HistoryFilter) -> Result<Vec<StockWatchEntry>, ApiError>;

    /// `GET /api/watchlist/{code}`
    async fn detail(&self, stock_code: &str) -> Result<DetailResponse, ApiError>;

    /// `POST /api/watchlist`
    async fn add_stock(&self, stock_name: &str) -> Result<StockWatchEntry, ApiError>;

    /// `DELETE /api/watchlist/{code}`
    async fn remove_stock(&self, stock_code: &str) -> Result<MessageResponse, ApiError>;

    /// `DELETE /api/history/{id}`
    async fn delete_history(&self, record_id: i64) -> Result<MessageResponse, ApiError>;

    /// `POST /api/telegram/notice`
    async fn send_notice(&self, message: &str) -> Result<MessageResponse, ApiError>;
}
