//! Wire types exchanged with the watchlist backend.
//!
//! Decoding is lenient: missing or null fields fall back to
//! `None`/defaults and an unrecognised status decodes to
//! [`WatchStatus::Unknown`], so one malformed field never fails a whole list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a watch entry, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum WatchStatus {
    Watching,
    Alerted,
    Expired,
    /// Any value outside the known three, kept verbatim for display
    Unknown(String),
    /// Status absent from the payload
    #[default]
    Missing,
}

impl WatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            WatchStatus::Watching => "watching",
            WatchStatus::Alerted => "alerted",
            WatchStatus::Expired => "expired",
            WatchStatus::Unknown(raw) => raw,
            WatchStatus::Missing => "",
        }
    }

    /// Display label; unmapped values fall back to the raw value, or `None`
    /// when there is nothing to show.
    pub fn label(&self) -> Option<&str> {
        match self {
            WatchStatus::Watching => Some("Watching"),
            WatchStatus::Alerted => Some("Alerted"),
            WatchStatus::Expired => Some("Expired"),
            WatchStatus::Unknown(raw) if !raw.is_empty() => Some(raw),
            WatchStatus::Unknown(_) | WatchStatus::Missing => None,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "badge-watching",
            WatchStatus::Alerted => "badge-alerted",
            WatchStatus::Expired => "badge-expired",
            WatchStatus::Unknown(_) | WatchStatus::Missing => "badge-unknown",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "●",
            WatchStatus::Alerted => "▲",
            WatchStatus::Expired => "■",
            WatchStatus::Unknown(_) | WatchStatus::Missing => "?",
        }
    }
}

impl From<String> for WatchStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "watching" => WatchStatus::Watching,
            "alerted" => WatchStatus::Alerted,
            "expired" => WatchStatus::Expired,
            "" => WatchStatus::Missing,
            _ => WatchStatus::Unknown(value),
        }
    }
}

impl From<Option<String>> for WatchStatus {
    fn from(value: Option<String>) -> Self {
        value.map(WatchStatus::from).unwrap_or_default()
    }
}

impl From<WatchStatus> for String {
    fn from(status: WatchStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter tabs of the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryFilter {
    #[default]
    All,
    Alerted,
    Expired,
}

impl HistoryFilter {
    pub const ALL: [HistoryFilter; 3] = [
        HistoryFilter::All,
        HistoryFilter::Alerted,
        HistoryFilter::Expired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HistoryFilter::All => "all",
            HistoryFilter::Alerted => "alerted",
            HistoryFilter::Expired => "expired",
        }
    }

    /// Value for the `status` query parameter; `None` means unfiltered.
    pub fn query_status(self) -> Option<&'static str> {
        match self {
            HistoryFilter::All => None,
            other => Some(other.as_str()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HistoryFilter::All => "All",
            HistoryFilter::Alerted => "Alerted",
            HistoryFilter::Expired => "Expired",
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "alerted" => Ok(HistoryFilter::Alerted),
            "expired" => Ok(HistoryFilter::Expired),
            _ => Err(format!("Invalid history filter: {}", s)),
        }
    }
}

impl fmt::Display for HistoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked stock.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockWatchEntry {
    /// History record id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub stock_code: String,
    pub stock_name: String,
    pub status: WatchStatus,
    /// Kept as the raw string so unparseable dates can be shown verbatim
    pub enrolled_date: Option<String>,
    pub d0_low_price: Option<f64>,
    pub peak_rate: Option<f64>,
    pub alert_day: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerted_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One trading day of price data for a watched stock.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyPrice {
    pub trade_date: Option<String>,
    pub open_price: Option<f64>,
    pub high_price: Option<f64>,
    pub low_price: Option<f64>,
    pub close_price: Option<f64>,
    pub volume: Option<i64>,
    pub change_rate: Option<f64>,
    pub day_index: Option<i64>,
}

/// Dashboard counters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub watching_count: u64,
    pub alerted_count: u64,
    pub expired_count: u64,
    pub total_count: Option<u64>,
    pub avg_peak_rate: Option<f64>,
    /// Server-computed success rate in percent, absent when nothing finished
    pub alert_success_rate: Option<f64>,
}

impl DashboardSummary {
    /// Success rate computed client-side as alerted / (alerted + expired).
    pub fn derived_success_rate(&self) -> Option<f64> {
        let finished = self.alerted_count + self.expired_count;
        if finished == 0 {
            return None;
        }
        Some(self.alerted_count as f64 / finished as f64 * 100.0)
    }
}

/// Entry detail with its daily price series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailResponse {
    pub watchlist: StockWatchEntry,
    #[serde(default)]
    pub daily_prices: Vec<DailyPrice>,
}

/// Body of `POST /api/watchlist`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddStockRequest {
    pub stock_name: String,
}

/// Body of `POST /api/telegram/notice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeRequest {
    pub message: String,
}

/// Acknowledgement returned by deletes and notices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: Option<String>,
}

/// Error body carried by non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// User-facing detail text; non-string details use their JSON text.
    pub fn detail_text(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_known_values() {
        let status: WatchStatus = serde_json::from_str("\"alerted\"").unwrap();
        assert_eq!(status, WatchStatus::Alerted);
        assert_eq!(status.label(), Some("Alerted"));
        assert_eq!(status.badge_class(), "badge-alerted");
    }

    #[test]
    fn test_status_unknown_value_does_not_fail() {
        let status: WatchStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, WatchStatus::Unknown("paused".to_string()));
        assert_eq!(status.label(), Some("paused"));
        assert_eq!(status.badge_class(), "badge-unknown");
    }

    #[test]
    fn test_status_null_is_missing() {
        let entry: StockWatchEntry = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert_eq!(entry.status, WatchStatus::Missing);
    }

    #[test]
    fn test_status_serializes_back_to_raw() {
        let json = serde_json::to_string(&WatchStatus::Unknown("paused".into())).unwrap();
        assert_eq!(json, "\"paused\"");
        let json = serde_json::to_string(&WatchStatus::Expired).unwrap();
        assert_eq!(json, "\"expired\"");
    }

    #[test]
    fn test_entry_missing_fields_default() {
        let entry: StockWatchEntry =
            serde_json::from_str(r#"{"stock_name": "Samsung", "peak_rate": null}"#).unwrap();
        assert_eq!(entry.stock_name, "Samsung");
        assert!(entry.stock_code.is_empty());
        assert_eq!(entry.status, WatchStatus::Missing);
        assert!(entry.peak_rate.is_none());
        assert!(entry.status.label().is_none());
    }

    #[test]
    fn test_entry_full_payload() {
        let json = r#"{
            "id": 7,
            "stock_code": "005930",
            "stock_name": "Samsung Electronics",
            "enrolled_date": "2024-03-04",
            "d0_low_price": 71200,
            "status": "watching",
            "alerted_at": null,
            "alert_day": null,
            "peak_rate": 12.34,
            "created_at": "2024-03-04T09:12:00",
            "updated_at": null
        }"#;
        let entry: StockWatchEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, Some(7));
        assert_eq!(entry.d0_low_price, Some(71200.0));
        assert_eq!(entry.status, WatchStatus::Watching);
        assert_eq!(entry.enrolled_date.as_deref(), Some("2024-03-04"));
    }

    #[test]
    fn test_detail_without_prices() {
        let detail: DetailResponse =
            serde_json::from_str(r#"{"watchlist": {"stock_code": "000660"}}"#).unwrap();
        assert!(detail.daily_prices.is_empty());
        assert_eq!(detail.watchlist.stock_code, "000660");
    }

    #[test]
    fn test_derived_success_rate() {
        let summary = DashboardSummary {
            alerted_count: 3,
            expired_count: 1,
            ..Default::default()
        };
        assert_eq!(summary.derived_success_rate(), Some(75.0));
        assert_eq!(DashboardSummary::default().derived_success_rate(), None);
    }

    #[test]
    fn test_history_filter_parse() {
        assert_eq!("ALERTED".parse::<HistoryFilter>().unwrap(), HistoryFilter::Alerted);
        assert!("watching".parse::<HistoryFilter>().is_err());
        assert_eq!(HistoryFilter::All.query_status(), None);
        assert_eq!(HistoryFilter::Expired.query_status(), Some("expired"));
    }

    #[test]
    fn test_error_body_detail_text() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "not found"}"#).unwrap();
        assert_eq!(body.detail_text().as_deref(), Some("not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail": [{"loc": ["body"]}]}"#).unwrap();
        assert!(body.detail_text().unwrap().contains("loc"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail": null}"#).unwrap();
        assert!(body.detail_text().is_none());
    }
}
