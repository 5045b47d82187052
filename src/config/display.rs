//! Display and formatting configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which success rate the summary shows.
///
/// The two derivations are never mixed: `server` shows the backend's
/// `alert_success_rate` as-is (dash when absent), `derived` computes
/// alerted / (alerted + expired) from the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuccessRateSource {
    #[default]
    Server,
    Derived,
}

impl FromStr for SuccessRateSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "server" => Ok(SuccessRateSource::Server),
            "derived" => Ok(SuccessRateSource::Derived),
            _ => Err(format!("Invalid success rate source: {}", s)),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Page title for rendered dashboards
    pub title: String,
    pub currency_symbol: String,
    /// Decimal places for percentage rates (1 or 2)
    pub rate_precision: u8,
    /// strftime pattern for dates
    pub date_format: String,
    pub success_rate: SuccessRateSource,
    /// How long the add-stock success message stays visible
    pub message_display_seconds: u64,
    /// Number of cards in the recent registrations panel
    pub recent_limit: usize,
    /// Gain in percent at which an entry is considered alerted; drives the
    /// target price on the detail view
    pub alert_threshold_rate: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Stock Watchlist".to_string(),
            currency_symbol: "₩".to_string(),
            rate_precision: 1,
            date_format: "%Y.%m.%d".to_string(),
            success_rate: SuccessRateSource::Server,
            message_display_seconds: 5,
            recent_limit: 5,
            alert_threshold_rate: 50.0,
        }
    }
}
