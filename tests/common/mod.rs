//! Shared test utilities for watchdash integration tests.
//!
//! Provides an in-memory [`FakeApi`] with per-endpoint responses, delays and
//! a call log, a [`RecordingPrompter`], and entry builders.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use watchdash::api::{
    ApiError, DailyPrice, DashboardSummary, DetailResponse, HistoryFilter, MessageResponse,
    StockWatchEntry, WatchStatus, WatchlistApi,
};
use watchdash::client::{DashboardClient, Prompter};
use watchdash::config::DisplayConfig;

// =============================================================================
// Entry Builders
// =============================================================================

/// Create a watching entry with sensible defaults.
pub fn make_entry(code: &str, name: &str) -> StockWatchEntry {
    StockWatchEntry {
        id: None,
        stock_code: code.to_string(),
        stock_name: name.to_string(),
        status: WatchStatus::Watching,
        enrolled_date: Some("2024-03-15".to_string()),
        d0_low_price: Some(71_500.0),
        peak_rate: Some(12.34),
        alert_day: None,
        ..Default::default()
    }
}

/// Create a history record with an id and a status.
pub fn make_record(id: i64, code: &str, name: &str, status: WatchStatus) -> StockWatchEntry {
    StockWatchEntry {
        id: Some(id),
        status,
        ..make_entry(code, name)
    }
}

pub fn make_price(day_index: i64, close: f64) -> DailyPrice {
    DailyPrice {
        trade_date: Some("2024-03-18".to_string()),
        open_price: Some(close - 500.0),
        high_price: Some(close + 1_000.0),
        low_price: Some(close - 1_000.0),
        close_price: Some(close),
        volume: Some(1_234_567),
        change_rate: Some(1.5),
        day_index: Some(day_index),
    }
}

pub fn not_found(detail: &str) -> ApiError {
    ApiError::Http {
        status: 404,
        detail: Some(detail.to_string()),
    }
}

// =============================================================================
// Fake API
// =============================================================================

/// Canned responses for every endpoint.
#[derive(Debug, Clone)]
pub struct FakeState {
    pub healthy: bool,
    pub summary: Result<DashboardSummary, ApiError>,
    pub watching: Result<Vec<StockWatchEntry>, ApiError>,
    pub history: HashMap<HistoryFilter, Result<Vec<StockWatchEntry>, ApiError>>,
    pub history_delay: HashMap<HistoryFilter, Duration>,
    pub detail: Result<DetailResponse, ApiError>,
    /// Per-code overrides of `detail`
    pub detail_by_code: HashMap<String, Result<DetailResponse, ApiError>>,
    pub detail_delay: HashMap<String, Duration>,
    pub add: Result<StockWatchEntry, ApiError>,
    pub add_delay: Duration,
    pub remove: Result<MessageResponse, ApiError>,
    pub delete_history: Result<MessageResponse, ApiError>,
    pub notice: Result<MessageResponse, ApiError>,
}

impl Default for FakeState {
    fn default() -> Self {
        let ok = || {
            Ok(MessageResponse {
                message: Some("ok".to_string()),
            })
        };
        Self {
            healthy: true,
            summary: Ok(DashboardSummary::default()),
            watching: Ok(Vec::new()),
            history: HashMap::new(),
            history_delay: HashMap::new(),
            detail: Err(not_found("stock not found")),
            detail_by_code: HashMap::new(),
            detail_delay: HashMap::new(),
            add: Ok(StockWatchEntry::default()),
            add_delay: Duration::ZERO,
            remove: ok(),
            delete_history: ok(),
            notice: ok(),
        }
    }
}

/// In-memory [`WatchlistApi`] that records every call it receives.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Change canned responses in place.
    pub fn configure(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }

    /// Every call so far, as `endpoint` or `endpoint:argument`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn snapshot(&self) -> FakeState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl WatchlistApi for FakeApi {
    async fn health(&self) -> Result<(), ApiError> {
        self.record("health");
        if self.snapshot().healthy {
            Ok(())
        } else {
            Err(ApiError::Network("connection refused".to_string()))
        }
    }

    async fn summary(&self) -> Result<DashboardSummary, ApiError> {
        self.record("summary");
        self.snapshot().summary
    }

    async fn watchlist(&self, status: Option<WatchStatus>) -> Result<Vec<StockWatchEntry>, ApiError> {
        let status = status.map(|s| s.to_string()).unwrap_or_default();
        self.record(format!("watchlist:{}", status));
        self.snapshot().watching
    }

    async fn history(&self, filter: HistoryFilter) -> Result<Vec<StockWatchEntry>, ApiError> {
        self.record(format!("history:{}", filter));
        let state = self.snapshot();
        if let Some(delay) = state.history_delay.get(&filter) {
            tokio::time::sleep(*delay).await;
        }
        state.history.get(&filter).cloned().unwrap_or(Ok(Vec::new()))
    }

    async fn detail(&self, stock_code: &str) -> Result<DetailResponse, ApiError> {
        self.record(format!("detail:{}", stock_code));
        let state = self.snapshot();
        if let Some(delay) = state.detail_delay.get(stock_code) {
            tokio::time::sleep(*delay).await;
        }
        state
            .detail_by_code
            .get(stock_code)
            .cloned()
            .unwrap_or(state.detail)
    }

    async fn add_stock(&self, stock_name: &str) -> Result<StockWatchEntry, ApiError> {
        self.record(format!("add:{}", stock_name));
        let state = self.snapshot();
        if !state.add_delay.is_zero() {
            tokio::time::sleep(state.add_delay).await;
        }
        state.add
    }

    async fn remove_stock(&self, stock_code: &str) -> Result<MessageResponse, ApiError> {
        self.record(format!("remove:{}", stock_code));
        self.snapshot().remove
    }

    async fn delete_history(&self, record_id: i64) -> Result<MessageResponse, ApiError> {
        self.record(format!("delete_history:{}", record_id));
        self.snapshot().delete_history
    }

    async fn send_notice(&self, message: &str) -> Result<MessageResponse, ApiError> {
        self.record(format!("notice:{}", message));
        self.snapshot().notice
    }
}

// =============================================================================
// Prompter
// =============================================================================

/// Answers every confirmation with a fixed value and records both channels.
#[derive(Debug, Default)]
pub struct RecordingPrompter {
    answer: bool,
    confirms: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingPrompter {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Default::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Prompter for RecordingPrompter {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

// =============================================================================
// Client Builders
// =============================================================================

/// Client over `api` with default display settings.
pub fn make_client(
    api: &Arc<FakeApi>,
    prompter: &Arc<RecordingPrompter>,
) -> DashboardClient<FakeApi> {
    make_client_with(api, prompter, &DisplayConfig::default())
}

pub fn make_client_with(
    api: &Arc<FakeApi>,
    prompter: &Arc<RecordingPrompter>,
    display: &DisplayConfig,
) -> DashboardClient<FakeApi> {
    let prompter: Arc<dyn Prompter> = prompter.clone();
    DashboardClient::new(Arc::clone(api), prompter, display)
}
