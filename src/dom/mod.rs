//! In-process document model for the dashboard.
//!
//! A [`Document`] is the set of named regions, controls and flags the client
//! renders into. Each [`Region`] is written by exactly one rendering function;
//! the page shell in [`crate::view::page`] lays the regions out as HTML.

pub mod events;

pub use events::{Action, EventKind, EventRegistry, UiEvent};

use crate::api::HistoryFilter;
use crate::view::Markup;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Top-level pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageId {
    #[default]
    Dashboard,
    History,
    Detail,
}

impl PageId {
    pub const ALL: [PageId; 3] = [PageId::Dashboard, PageId::History, PageId::Detail];

    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Dashboard => "dashboard",
            PageId::History => "history",
            PageId::Detail => "detail",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageId::Dashboard => "Dashboard",
            PageId::History => "History",
            PageId::Detail => "Detail",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named areas of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    ServerStatus,
    StatWatching,
    StatAlerted,
    StatExpired,
    StatRate,
    StatAvgPeak,
    WatchingList,
    RecentList,
    HistoryList,
    Detail,
}

impl Region {
    pub fn id(self) -> &'static str {
        match self {
            Region::ServerStatus => "server-status",
            Region::StatWatching => "stat-watching",
            Region::StatAlerted => "stat-alerted",
            Region::StatExpired => "stat-expired",
            Region::StatRate => "stat-rate",
            Region::StatAvgPeak => "stat-avg-peak",
            Region::WatchingList => "watchlist-body",
            Region::RecentList => "recent-registrations",
            Region::HistoryList => "history-body",
            Region::Detail => "detail-body",
        }
    }
}

/// Interactive controls that events can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    StockNameInput,
    AddStockButton,
    RefreshButton,
    BackToDashboard,
    NoticeOpenButton,
    NoticeCloseButton,
    NoticeCancelButton,
    NoticeSendButton,
    NoticeInput,
    NoticeOverlay,
    FilterTab(HistoryFilter),
    Nav(PageId),
}

impl Control {
    pub fn id(self) -> String {
        match self {
            Control::StockNameInput => "input-stock-name".to_string(),
            Control::AddStockButton => "btn-add-stock".to_string(),
            Control::RefreshButton => "btn-refresh".to_string(),
            Control::BackToDashboard => "btn-back-dashboard".to_string(),
            Control::NoticeOpenButton => "btn-open-notice".to_string(),
            Control::NoticeCloseButton => "btn-close-notice".to_string(),
            Control::NoticeCancelButton => "btn-cancel-notice".to_string(),
            Control::NoticeSendButton => "btn-send-notice".to_string(),
            Control::NoticeInput => "notice-message".to_string(),
            Control::NoticeOverlay => "notice-modal".to_string(),
            Control::FilterTab(filter) => format!("filter-{}", filter.as_str()),
            Control::Nav(page) => format!("nav-{}", page.as_str()),
        }
    }
}

/// Tone of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// Transient message shown under the add-stock form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }
}

/// Current state of everything on screen.
#[derive(Debug, Clone, Default)]
pub struct Document {
    regions: HashMap<Region, Markup>,
    connected: Option<bool>,
    disabled: HashSet<Control>,
    inputs: HashMap<Control, String>,
    active_page: PageId,
    active_filter: HistoryFilter,
    notice_open: bool,
    flash: Option<Flash>,
    loaded: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self, region: Region) -> Option<&Markup> {
        self.regions.get(&region)
    }

    /// Rendered HTML of a region, empty if it was never rendered.
    pub fn region_html(&self, region: Region) -> &str {
        self.regions.get(&region).map(Markup::as_str).unwrap_or("")
    }

    pub fn set_region(&mut self, region: Region, markup: Markup) {
        self.regions.insert(region, markup);
    }

    /// `None` until the first health check resolves.
    pub fn connected(&self) -> Option<bool> {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = Some(connected);
    }

    pub fn is_disabled(&self, control: Control) -> bool {
        self.disabled.contains(&control)
    }

    pub fn set_disabled(&mut self, control: Control, disabled: bool) {
        if disabled {
            self.disabled.insert(control);
        } else {
            self.disabled.remove(&control);
        }
    }

    pub fn input(&self, control: Control) -> &str {
        self.inputs.get(&control).map(String::as_str).unwrap_or("")
    }

    pub fn set_input(&mut self, control: Control, value: impl Into<String>) {
        self.inputs.insert(control, value.into());
    }

    pub fn active_page(&self) -> PageId {
        self.active_page
    }

    pub fn set_active_page(&mut self, page: PageId) {
        self.active_page = page;
    }

    pub fn active_filter(&self) -> HistoryFilter {
        self.active_filter
    }

    pub fn set_active_filter(&mut self, filter: HistoryFilter) {
        self.active_filter = filter;
    }

    pub fn notice_open(&self) -> bool {
        self.notice_open
    }

    pub fn set_notice_open(&mut self, open: bool) {
        self.notice_open = open;
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn set_flash(&mut self, flash: Option<Flash>) {
        self.flash = flash;
    }

    /// True once the initial load has resolved.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }
}
