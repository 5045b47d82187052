//! Rendering of backend data into document regions.
//!
//! Every function here is pure: it takes data plus the [`Formatter`] and
//! returns [`Markup`]. Rows that need interaction carry `data-action` and
//! `data-*` attributes resolved by [`crate::dom::events`].

use super::html::Markup;
use crate::api::{DailyPrice, DashboardSummary, DetailResponse, StockWatchEntry, WatchStatus};
use crate::config::SuccessRateSource;
use crate::dom::events::{DELETE_HISTORY, REMOVE_STOCK, SHOW_DETAIL};
use crate::dom::{Flash, FlashKind};
use crate::format::{rate_class, Formatter, PLACEHOLDER};
use leptos::prelude::*;

pub const EMPTY_WATCHING: &str = "No stocks are being watched.";
pub const EMPTY_RECENT: &str = "No recent registrations.";
pub const EMPTY_HISTORY: &str = "No history records.";
pub const EMPTY_PRICES: &str = "No price data available.";
pub const LOADING: &str = "Loading…";
pub const DETAIL_ERROR: &str = "Failed to load stock details.";

const WATCHING_COLUMNS: usize = 7;
const HISTORY_COLUMNS: usize = 9;
const PRICE_COLUMNS: usize = 8;
const PRICE_HEADERS: [&str; PRICE_COLUMNS] =
    ["Day", "Date", "Open", "High", "Low", "Close", "Volume", "Change"];

/// Join class names, skipping empty ones.
pub(crate) fn class_list(names: &[&str]) -> String {
    names
        .iter()
        .filter(|name| !name.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Connection indicator in the header.
pub fn server_status(connected: bool) -> Markup {
    let (class, label) = if connected {
        ("connected", "Connected")
    } else {
        ("disconnected", "Disconnected")
    };
    Markup::render(view! {
        <span class={class_list(&["status-indicator", class])}>
            <span class="status-dot"></span>
            {label}
        </span>
    })
}

/// Text of the five summary counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub watching: String,
    pub alerted: String,
    pub expired: String,
    pub success_rate: String,
    pub avg_peak_rate: String,
}

pub fn summary_view(
    summary: &DashboardSummary,
    fmt: &Formatter,
    source: SuccessRateSource,
) -> SummaryView {
    let rate = match source {
        SuccessRateSource::Server => summary.alert_success_rate,
        SuccessRateSource::Derived => summary.derived_success_rate(),
    };
    SummaryView {
        watching: summary.watching_count.to_string(),
        alerted: summary.alerted_count.to_string(),
        expired: summary.expired_count.to_string(),
        success_rate: fmt.success_rate(rate),
        avg_peak_rate: fmt.rate(summary.avg_peak_rate),
    }
}

/// Badge for a status; unmapped values show their raw text.
#[component]
pub fn StatusBadge(status: WatchStatus) -> impl IntoView {
    let class = class_list(&["badge", status.badge_class()]);
    let icon = status.icon();
    let label = status.label().unwrap_or(PLACEHOLDER).to_string();

    view! {
        <span class=class>
            <span class="badge-icon">{icon}</span>
            {label}
        </span>
    }
}

#[component]
fn InfoItem(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="info-item">
            <span class="info-label">{label}</span>
            <span class="info-value">{children()}</span>
        </div>
    }
}

fn rate_cell(fmt: &Formatter, rate: Option<f64>) -> impl IntoView {
    view! { <td class={class_list(&["rate", rate_class(rate)])}>{fmt.rate(rate)}</td> }
}

fn empty_row(columns: usize, message: &'static str) -> Markup {
    Markup::render(view! {
        <tr class="empty-row">
            <td class="empty-state" colspan={columns.to_string()}>{message}</td>
        </tr>
    })
}

fn code_text(code: &str) -> String {
    if code.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        code.to_string()
    }
}

fn detail_link(entry: &StockWatchEntry) -> AnyView {
    if entry.stock_code.is_empty() {
        return view! { <td>{PLACEHOLDER}</td> }.into_any();
    }
    view! {
        <td>
            <button
                class="btn-link"
                type="button"
                data-action=SHOW_DETAIL
                data-code={entry.stock_code.clone()}
            >
                "Detail"
            </button>
        </td>
    }
    .into_any()
}

/// Rows of the watching table.
pub fn watching_rows(entries: &[StockWatchEntry], fmt: &Formatter) -> Markup {
    if entries.is_empty() {
        return empty_row(WATCHING_COLUMNS, EMPTY_WATCHING);
    }

    Markup::concat(entries.iter().map(|entry| {
        let remove = if entry.stock_code.is_empty() {
            view! { <td></td> }.into_any()
        } else {
            view! {
                <td>
                    <button
                        class="btn-danger btn-small"
                        type="button"
                        data-action=REMOVE_STOCK
                        data-code={entry.stock_code.clone()}
                        data-name={entry.stock_name.clone()}
                    >
                        "Remove"
                    </button>
                </td>
            }
            .into_any()
        };

        Markup::render(view! {
            <tr>
                <td class="stock-name">{entry.stock_name.clone()}</td>
                <td class="stock-code">{code_text(&entry.stock_code)}</td>
                <td class="price">{fmt.price(entry.d0_low_price)}</td>
                {rate_cell(fmt, entry.peak_rate)}
                <td>{fmt.date(entry.enrolled_date.as_deref())}</td>
                {detail_link(entry)}
                {remove}
            </tr>
        })
    }))
}

/// Cards for the most recent registrations.
pub fn recent_cards(entries: &[StockWatchEntry], limit: usize, fmt: &Formatter) -> Markup {
    if entries.is_empty() || limit == 0 {
        return Markup::render(view! { <p class="empty-state">{EMPTY_RECENT}</p> });
    }

    Markup::concat(entries.iter().take(limit).map(|entry| {
        let code = (!entry.stock_code.is_empty()).then(|| entry.stock_code.clone());
        let action = code.as_ref().map(|_| SHOW_DETAIL);
        let meta = format!(
            "{} · {}",
            code_text(&entry.stock_code),
            fmt.date(entry.enrolled_date.as_deref())
        );

        Markup::render(view! {
            <div class="recent-card" data-action=action data-code=code>
                <div class="recent-name">{entry.stock_name.clone()}</div>
                <div class="recent-meta">{meta}</div>
                <div class="recent-price">{fmt.price(entry.d0_low_price)}</div>
            </div>
        })
    }))
}

/// Rows of the history table.
pub fn history_rows(entries: &[StockWatchEntry], fmt: &Formatter) -> Markup {
    if entries.is_empty() {
        return empty_row(HISTORY_COLUMNS, EMPTY_HISTORY);
    }

    Markup::concat(entries.iter().map(|entry| {
        let alert_day = entry
            .alert_day
            .map(|day| format!("D+{}", day))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let delete = match entry.id {
            Some(id) => view! {
                <td>
                    <button
                        class="btn-danger btn-small"
                        type="button"
                        data-action=DELETE_HISTORY
                        data-id={id.to_string()}
                        data-name={entry.stock_name.clone()}
                    >
                        "Delete"
                    </button>
                </td>
            }
            .into_any(),
            None => view! { <td></td> }.into_any(),
        };

        Markup::render(view! {
            <tr>
                <td class="stock-name">{entry.stock_name.clone()}</td>
                <td class="stock-code">{code_text(&entry.stock_code)}</td>
                <td>{fmt.date(entry.enrolled_date.as_deref())}</td>
                <td class="price">{fmt.price(entry.d0_low_price)}</td>
                {rate_cell(fmt, entry.peak_rate)}
                <td><StatusBadge status={entry.status.clone()} /></td>
                <td>{alert_day}</td>
                {detail_link(entry)}
                {delete}
            </tr>
        })
    }))
}

/// Price at which an entry counts as alerted.
///
/// Absent or zero low prices have no target.
pub fn target_price(d0_low_price: Option<f64>, alert_threshold_rate: f64) -> Option<f64> {
    d0_low_price
        .filter(|price| price.is_finite() && *price != 0.0)
        .map(|price| price * (1.0 + alert_threshold_rate / 100.0))
}

pub fn detail_loading() -> Markup {
    Markup::render(view! {
        <div class="detail-loading">
            <span class="spinner"></span>
            {LOADING}
        </div>
    })
}

pub fn detail_error(message: &str) -> Markup {
    let message = message.to_string();
    Markup::render(view! {
        <div class="detail-error">
            <p class="error-title">{DETAIL_ERROR}</p>
            <p class="error-detail">{message}</p>
        </div>
    })
}

/// Entry header and daily price table.
pub fn detail_view(detail: &DetailResponse, fmt: &Formatter, alert_threshold_rate: f64) -> Markup {
    let entry = &detail.watchlist;
    let peak_class = rate_class(entry.peak_rate);
    let peak = fmt.rate(entry.peak_rate);
    let low = fmt.price(entry.d0_low_price);
    let enrolled = fmt.date(entry.enrolled_date.as_deref());
    let target = fmt.price(target_price(entry.d0_low_price, alert_threshold_rate));
    let headers = PRICE_HEADERS
        .into_iter()
        .map(|label| view! { <th>{label}</th> })
        .collect::<Vec<_>>();
    let rows = price_rows(&detail.daily_prices, fmt).into_string();

    Markup::render(view! {
        <div class="detail-view">
            <div class="detail-header">
                <h2>
                    <span class="stock-name">{entry.stock_name.clone()}</span>
                    <span class="stock-code">{code_text(&entry.stock_code)}</span>
                </h2>
                <StatusBadge status={entry.status.clone()} />
            </div>
            <div class="detail-info">
                <InfoItem label="Peak rate">
                    <span class=peak_class>{peak}</span>
                </InfoItem>
                <InfoItem label="D-0 low">{low}</InfoItem>
                <InfoItem label="Enrolled">{enrolled}</InfoItem>
                <InfoItem label="Target price">{target}</InfoItem>
            </div>
            <table class="price-table">
                <thead>
                    <tr>{headers}</tr>
                </thead>
                <tbody inner_html=rows></tbody>
            </table>
        </div>
    })
}

/// Daily price rows in the order received.
pub fn price_rows(prices: &[DailyPrice], fmt: &Formatter) -> Markup {
    if prices.is_empty() {
        return empty_row(PRICE_COLUMNS, EMPTY_PRICES);
    }

    Markup::concat(prices.iter().map(|day| {
        let index = day
            .day_index
            .map(|i| format!("D+{}", i))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        Markup::render(view! {
            <tr>
                <td>{index}</td>
                <td>{fmt.date(day.trade_date.as_deref())}</td>
                <td class="price">{fmt.price(day.open_price)}</td>
                <td class="price">{fmt.price(day.high_price)}</td>
                <td class="price">{fmt.price(day.low_price)}</td>
                <td class="price">{fmt.price(day.close_price)}</td>
                <td class="volume">{fmt.volume(day.volume)}</td>
                {rate_cell(fmt, day.change_rate)}
            </tr>
        })
    }))
}

/// Banner under the add-stock form.
pub fn flash_message(flash: &Flash) -> Markup {
    let class = match flash.kind {
        FlashKind::Success => "message message-success",
        FlashKind::Error => "message message-error",
    };
    let text = flash.text.clone();
    Markup::render(view! { <div class=class role="status">{text}</div> })
}
