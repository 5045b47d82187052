//! Dashboard client: the operations behind every control on the page.
//!
//! [`DashboardClient`] owns the [`Document`] and drives it from the backend
//! through a [`WatchlistApi`]. API failures never escape as panics or hard
//! errors: reads degrade to placeholders, empty states or an error region,
//! the add form shows a banner, and confirmed mutations report through the
//! [`Prompter`].

mod message;
pub mod prompt;

pub use prompt::{AutoConfirm, NonInteractive, Prompter};

use crate::api::{
    ApiError, DashboardSummary, DetailResponse, HistoryFilter, StockWatchEntry, WatchStatus,
    WatchlistApi,
};
use crate::config::{DisplayConfig, SuccessRateSource};
use crate::dom::{Action, Control, Document, EventRegistry, Flash, PageId, Region, UiEvent};
use crate::format::{Formatter, PLACEHOLDER};
use crate::view::render;
use crate::view::Markup;
use message::FlashMessages;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const CONNECTIVITY_ERROR: &str = "Could not reach the server.";

const STAT_REGIONS: [Region; 5] = [
    Region::StatWatching,
    Region::StatAlerted,
    Region::StatExpired,
    Region::StatRate,
    Region::StatAvgPeak,
];

/// Behaviour knobs taken from `[display]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub success_rate: SuccessRateSource,
    pub message_display: Duration,
    pub recent_limit: usize,
    pub alert_threshold_rate: f64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for ClientSettings {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            success_rate: config.success_rate,
            message_display: Duration::from_secs(config.message_display_seconds),
            recent_limit: config.recent_limit,
            alert_threshold_rate: config.alert_threshold_rate,
        }
    }
}

/// Result of a read operation.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    /// The request failed; the region shows its degraded state
    Failed(ApiError),
    /// A newer request for the same region started; the response was dropped
    Stale,
}

impl<T> LoadOutcome<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    pub fn loaded(self) -> Option<T> {
        match self {
            LoadOutcome::Loaded(value) => Some(value),
            _ => None,
        }
    }

    fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => LoadOutcome::Loaded(value),
            Err(e) => LoadOutcome::Failed(e),
        }
    }
}

/// Result of submitting the add-stock form.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Empty input; nothing was sent
    Rejected,
    /// A submission is already in flight
    Busy,
    Added(StockWatchEntry),
    Failed(ApiError),
}

/// Result of a confirmed mutation (remove, delete history, notice).
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Empty input; nothing was sent
    Rejected,
    /// The user declined the confirmation
    Declined,
    Done,
    Failed(ApiError),
}

/// Counts reported by [`DashboardClient::load_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub connected: bool,
    pub summary: bool,
    pub watching: bool,
    pub history: bool,
}

/// Client behind the dashboard page.
pub struct DashboardClient<A: WatchlistApi> {
    api: Arc<A>,
    document: Arc<Mutex<Document>>,
    prompter: Arc<dyn Prompter>,
    formatter: Formatter,
    settings: ClientSettings,
    registry: Arc<EventRegistry>,
    messages: FlashMessages,
    history_generation: Arc<AtomicU64>,
    detail_generation: Arc<AtomicU64>,
}

impl<A: WatchlistApi> Clone for DashboardClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            document: Arc::clone(&self.document),
            prompter: Arc::clone(&self.prompter),
            formatter: self.formatter.clone(),
            settings: self.settings.clone(),
            registry: Arc::clone(&self.registry),
            messages: self.messages.clone(),
            history_generation: Arc::clone(&self.history_generation),
            detail_generation: Arc::clone(&self.detail_generation),
        }
    }
}

impl<A: WatchlistApi> DashboardClient<A> {
    pub fn new(api: Arc<A>, prompter: Arc<dyn Prompter>, display: &DisplayConfig) -> Self {
        let document = Arc::new(Mutex::new(Document::new()));
        let settings = ClientSettings::from(display);
        let messages = FlashMessages::new(Arc::clone(&document), settings.message_display);
        Self {
            api,
            document,
            prompter,
            formatter: Formatter::from_config(display),
            settings,
            registry: Arc::new(EventRegistry::standard()),
            messages,
            history_generation: Arc::new(AtomicU64::new(0)),
            detail_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Snapshot of the current document.
    pub fn document(&self) -> Document {
        self.doc().clone()
    }

    /// Type into an input control.
    pub fn set_input(&self, control: Control, value: impl Into<String>) {
        self.doc().set_input(control, value);
    }

    /// Set the active page and filter tab without loading anything.
    pub fn restore_view(&self, page: PageId, filter: HistoryFilter) {
        let mut doc = self.doc();
        doc.set_active_page(page);
        doc.set_active_filter(filter);
    }

    fn doc(&self) -> MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ----- reads -----

    /// Probe the backend and update the connection indicator.
    pub async fn check_health(&self) -> bool {
        let connected = match self.api.health().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed");
                false
            }
        };

        let mut doc = self.doc();
        doc.set_connected(connected);
        doc.set_region(Region::ServerStatus, render::server_status(connected));
        connected
    }

    /// Populate the summary counters.
    ///
    /// On failure the counters keep their values; counters that were never
    /// filled show the placeholder.
    pub async fn load_summary(&self) -> LoadOutcome<DashboardSummary> {
        let result = self.api.summary().await;
        match &result {
            Ok(summary) => {
                let view =
                    render::summary_view(summary, &self.formatter, self.settings.success_rate);
                let mut doc = self.doc();
                doc.set_region(Region::StatWatching, Markup::text(&view.watching));
                doc.set_region(Region::StatAlerted, Markup::text(&view.alerted));
                doc.set_region(Region::StatExpired, Markup::text(&view.expired));
                doc.set_region(Region::StatRate, Markup::text(&view.success_rate));
                doc.set_region(Region::StatAvgPeak, Markup::text(&view.avg_peak_rate));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load dashboard summary");
                let mut doc = self.doc();
                for region in STAT_REGIONS {
                    if doc.region(region).is_none() {
                        doc.set_region(region, Markup::text(PLACEHOLDER));
                    }
                }
            }
        }
        LoadOutcome::from_result(result)
    }

    /// Load watching entries into the list and the recent registrations panel.
    pub async fn load_watching(&self) -> LoadOutcome<Vec<StockWatchEntry>> {
        let result = self.api.watchlist(Some(WatchStatus::Watching)).await;
        let entries = match &result {
            Ok(entries) => entries.as_slice(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load watching list");
                &[]
            }
        };

        let rows = render::watching_rows(entries, &self.formatter);
        let recent = render::recent_cards(entries, self.settings.recent_limit, &self.formatter);
        {
            let mut doc = self.doc();
            doc.set_region(Region::WatchingList, rows);
            doc.set_region(Region::RecentList, recent);
        }
        LoadOutcome::from_result(result)
    }

    /// Load the history list. A response superseded by a later call is dropped.
    pub async fn load_history(&self, filter: HistoryFilter) -> LoadOutcome<Vec<StockWatchEntry>> {
        let generation = self.history_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.history(filter).await;

        let mut doc = self.doc();
        if self.history_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(filter = %filter, "Discarding stale history response");
            return LoadOutcome::Stale;
        }

        let entries = match &result {
            Ok(entries) => entries.as_slice(),
            Err(e) => {
                tracing::warn!(error = %e, filter = %filter, "Failed to load history");
                &[]
            }
        };
        doc.set_region(
            Region::HistoryList,
            render::history_rows(entries, &self.formatter),
        );
        drop(doc);
        LoadOutcome::from_result(result)
    }

    /// Switch to the detail page and load one entry.
    pub async fn show_detail(&self, stock_code: &str) -> LoadOutcome<DetailResponse> {
        let generation = self.detail_generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut doc = self.doc();
            doc.set_active_page(PageId::Detail);
            doc.set_region(Region::Detail, render::detail_loading());
        }

        let result = self.api.detail(stock_code).await;

        let mut doc = self.doc();
        if self.detail_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(stock_code, "Discarding stale detail response");
            return LoadOutcome::Stale;
        }

        let markup = match &result {
            Ok(detail) => {
                render::detail_view(detail, &self.formatter, self.settings.alert_threshold_rate)
            }
            Err(e) => {
                tracing::warn!(error = %e, stock_code, "Failed to load stock detail");
                render::detail_error(&e.user_message(CONNECTIVITY_ERROR))
            }
        };
        doc.set_region(Region::Detail, markup);
        drop(doc);
        LoadOutcome::from_result(result)
    }

    /// Run every read view concurrently and mark the document loaded.
    pub async fn load_all(&self) -> LoadReport {
        let filter = self.doc().active_filter();
        let (connected, summary, watching, history) = tokio::join!(
            self.check_health(),
            self.load_summary(),
            self.load_watching(),
            self.load_history(filter),
        );

        self.doc().mark_loaded();
        let report = LoadReport {
            connected,
            summary: summary.is_loaded(),
            watching: watching.is_loaded(),
            history: history.is_loaded(),
        };
        tracing::debug!(?report, "Dashboard loaded");
        report
    }

    /// Initial page load.
    pub async fn initialize(&self) -> LoadReport {
        tracing::info!("Initializing dashboard");
        self.load_all().await
    }

    /// The manual refresh control.
    pub async fn refresh(&self) -> LoadReport {
        self.load_all().await
    }

    /// Switch pages; the dashboard and history pages reload their views.
    pub async fn navigate(&self, page: PageId) {
        let filter = {
            let mut doc = self.doc();
            doc.set_active_page(page);
            doc.active_filter()
        };

        match page {
            PageId::Dashboard => {
                tokio::join!(self.load_summary(), self.load_watching());
            }
            PageId::History => {
                self.load_history(filter).await;
            }
            PageId::Detail => {}
        }
    }

    /// Activate a history filter tab and reload the list.
    pub async fn select_filter(&self, filter: HistoryFilter) -> LoadOutcome<Vec<StockWatchEntry>> {
        self.doc().set_active_filter(filter);
        self.load_history(filter).await
    }

    // ----- writes -----

    /// Submit the add-stock form.
    pub async fn add_stock(&self, stock_name: &str) -> AddOutcome {
        let name = stock_name.trim();
        if name.is_empty() {
            return AddOutcome::Rejected;
        }

        {
            let mut doc = self.doc();
            if doc.is_disabled(Control::AddStockButton) {
                return AddOutcome::Busy;
            }
            doc.set_disabled(Control::AddStockButton, true);
        }
        self.messages.clear();

        let result = self.api.add_stock(name).await;
        self.doc().set_disabled(Control::AddStockButton, false);

        match result {
            Ok(entry) => {
                let shown = if entry.stock_name.is_empty() {
                    name
                } else {
                    entry.stock_name.as_str()
                };
                tracing::info!(stock_name = shown, stock_code = %entry.stock_code, "Added stock");
                self.doc().set_input(Control::StockNameInput, "");
                self.messages
                    .show(Flash::success(format!("Added {} to the watchlist.", shown)));
                self.load_all().await;
                AddOutcome::Added(entry)
            }
            Err(e) => {
                tracing::warn!(error = %e, stock_name = name, "Failed to add stock");
                self.messages
                    .show(Flash::error(e.user_message(CONNECTIVITY_ERROR)));
                AddOutcome::Failed(e)
            }
        }
    }

    /// Submit the add-stock form with the current input value.
    pub async fn submit_add_stock(&self) -> AddOutcome {
        let name = self.doc().input(Control::StockNameInput).to_string();
        self.add_stock(&name).await
    }

    /// Remove a watched stock after confirmation.
    pub async fn remove_stock(&self, stock_code: &str, stock_name: &str) -> MutationOutcome {
        let label = if stock_name.is_empty() {
            stock_code
        } else {
            stock_name
        };
        if !self
            .prompter
            .confirm(&format!("Remove \"{}\" from the watchlist?", label))
        {
            return MutationOutcome::Declined;
        }

        match self.api.remove_stock(stock_code).await {
            Ok(_) => {
                tracing::info!(stock_code, "Removed stock");
                self.prompter.alert(&format!("{} was removed.", label));
                self.load_all().await;
                MutationOutcome::Done
            }
            Err(e) => {
                tracing::warn!(error = %e, stock_code, "Failed to remove stock");
                self.prompter
                    .alert(&e.user_message("Failed to remove the stock."));
                MutationOutcome::Failed(e)
            }
        }
    }

    /// Delete a history record after confirmation.
    pub async fn delete_history_record(&self, record_id: i64, stock_name: &str) -> MutationOutcome {
        let prompt = if stock_name.is_empty() {
            format!("Delete history record #{}?", record_id)
        } else {
            format!("Delete the history record for \"{}\"?", stock_name)
        };
        if !self.prompter.confirm(&prompt) {
            return MutationOutcome::Declined;
        }

        match self.api.delete_history(record_id).await {
            Ok(_) => {
                tracing::info!(record_id, "Deleted history record");
                self.prompter.alert("History record deleted.");
                self.load_all().await;
                MutationOutcome::Done
            }
            Err(e) => {
                tracing::warn!(error = %e, record_id, "Failed to delete history record");
                self.prompter
                    .alert(&e.user_message("Failed to delete the history record."));
                MutationOutcome::Failed(e)
            }
        }
    }

    // ----- notice modal -----

    pub fn open_notice(&self) {
        let mut doc = self.doc();
        doc.set_input(Control::NoticeInput, "");
        doc.set_notice_open(true);
    }

    pub fn close_notice(&self) {
        self.doc().set_notice_open(false);
    }

    /// Broadcast a notice after confirmation.
    pub async fn send_notice(&self, message: &str) -> MutationOutcome {
        let message = message.trim();
        if message.is_empty() {
            self.prompter.alert("Please enter a notice message.");
            return MutationOutcome::Rejected;
        }
        if !self.prompter.confirm("Send this notice to all subscribers?") {
            return MutationOutcome::Declined;
        }

        match self.api.send_notice(message).await {
            Ok(_) => {
                tracing::info!("Notice sent");
                self.prompter.alert("Notice sent.");
                let mut doc = self.doc();
                doc.set_input(Control::NoticeInput, "");
                doc.set_notice_open(false);
                MutationOutcome::Done
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to send notice");
                self.prompter
                    .alert(&e.user_message("Failed to send the notice."));
                MutationOutcome::Failed(e)
            }
        }
    }

    /// Send the notice with the current textarea value.
    pub async fn submit_notice(&self) -> MutationOutcome {
        let message = self.doc().input(Control::NoticeInput).to_string();
        self.send_notice(&message).await
    }

    // ----- events -----

    /// Resolve an event and run its action. Returns the action that ran.
    pub async fn dispatch(&self, event: &UiEvent) -> Option<Action> {
        let action = self.registry.resolve(event)?;
        tracing::debug!(?action, "Dispatching UI action");
        self.run(&action).await;
        Some(action)
    }

    async fn run(&self, action: &Action) {
        match action {
            Action::Refresh => {
                self.refresh().await;
            }
            Action::Navigate(page) => self.navigate(*page).await,
            Action::SelectFilter(filter) => {
                self.select_filter(*filter).await;
            }
            Action::SubmitAddStock => {
                self.submit_add_stock().await;
            }
            Action::ShowDetail { code } => {
                self.show_detail(code).await;
            }
            Action::RemoveStock { code, name } => {
                self.remove_stock(code, name).await;
            }
            Action::DeleteHistory { id, name } => {
                self.delete_history_record(*id, name).await;
            }
            Action::OpenNotice => self.open_notice(),
            Action::CloseNotice => self.close_notice(),
            Action::SubmitNotice => {
                self.submit_notice().await;
            }
        }
    }
}
