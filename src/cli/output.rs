//! Output formatting helpers for CLI commands

use crate::api::{DashboardSummary, DetailResponse, StockWatchEntry, WatchStatus};
use crate::format::{Formatter, PLACEHOLDER};
use crate::view::render::{target_price, SummaryView, EMPTY_PRICES};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Colored status label
pub fn status_text(status: &WatchStatus) -> String {
    let label = status.label().unwrap_or(PLACEHOLDER);
    match status {
        WatchStatus::Watching => label.cyan().to_string(),
        WatchStatus::Alerted => label.green().to_string(),
        WatchStatus::Expired => label.dimmed().to_string(),
        WatchStatus::Unknown(_) | WatchStatus::Missing => label.yellow().to_string(),
    }
}

/// Colored signed rate
pub fn rate_text(fmt: &Formatter, rate: Option<f64>) -> String {
    let text = fmt.rate(rate);
    match rate {
        Some(r) if r >= 0.0 => text.red().to_string(),
        Some(r) if r < 0.0 => text.blue().to_string(),
        _ => text,
    }
}

/// Format summary counters as a table
pub fn format_summary_table(view: &SummaryView) -> String {
    let mut table = new_table(vec!["Watching", "Alerted", "Expired", "Success rate", "Avg peak"]);
    table.add_row(vec![
        Cell::new(&view.watching),
        Cell::new(&view.alerted),
        Cell::new(&view.expired),
        Cell::new(&view.success_rate),
        Cell::new(&view.avg_peak_rate),
    ]);
    table.to_string()
}

/// Format summary as JSON, including the success rate actually displayed
pub fn format_summary_json(
    summary: &DashboardSummary,
    success_rate: Option<f64>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "summary": summary,
        "success_rate": success_rate,
    }))
}

/// Format watch entries as a table
pub fn format_entries_table(entries: &[StockWatchEntry], fmt: &Formatter) -> String {
    let mut table = new_table(vec![
        "ID", "Name", "Code", "Status", "Enrolled", "D-0 low", "Peak", "Alert day",
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&entry.stock_name),
            Cell::new(if entry.stock_code.is_empty() {
                PLACEHOLDER
            } else {
                entry.stock_code.as_str()
            }),
            Cell::new(status_text(&entry.status)),
            Cell::new(fmt.date(entry.enrolled_date.as_deref())),
            Cell::new(fmt.price(entry.d0_low_price)),
            Cell::new(rate_text(fmt, entry.peak_rate)),
            Cell::new(
                entry
                    .alert_day
                    .map(|day| format!("D+{}", day))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            ),
        ]);
    }

    table.to_string()
}

/// Format watch entries as JSON
pub fn format_entries_json(entries: &[StockWatchEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "entries": entries
    }))
}

/// Format an entry with its daily prices
pub fn format_detail(detail: &DetailResponse, fmt: &Formatter, alert_threshold_rate: f64) -> String {
    let entry = &detail.watchlist;
    let mut info = new_table(vec!["Field", "Value"]);
    info.add_row(vec![Cell::new("Name"), Cell::new(&entry.stock_name)]);
    info.add_row(vec![Cell::new("Code"), Cell::new(&entry.stock_code)]);
    info.add_row(vec![Cell::new("Status"), Cell::new(status_text(&entry.status))]);
    info.add_row(vec![
        Cell::new("Peak rate"),
        Cell::new(rate_text(fmt, entry.peak_rate)),
    ]);
    info.add_row(vec![
        Cell::new("D-0 low"),
        Cell::new(fmt.price(entry.d0_low_price)),
    ]);
    info.add_row(vec![
        Cell::new("Enrolled"),
        Cell::new(fmt.date(entry.enrolled_date.as_deref())),
    ]);
    info.add_row(vec![
        Cell::new("Target price"),
        Cell::new(fmt.price(target_price(entry.d0_low_price, alert_threshold_rate))),
    ]);

    if detail.daily_prices.is_empty() {
        return format!("{}\n{}", info, EMPTY_PRICES.dimmed());
    }

    let mut prices = new_table(vec![
        "Day", "Date", "Open", "High", "Low", "Close", "Volume", "Change",
    ]);
    for day in &detail.daily_prices {
        prices.add_row(vec![
            Cell::new(
                day.day_index
                    .map(|i| format!("D+{}", i))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            ),
            Cell::new(fmt.date(day.trade_date.as_deref())),
            Cell::new(fmt.price(day.open_price)),
            Cell::new(fmt.price(day.high_price)),
            Cell::new(fmt.price(day.low_price)),
            Cell::new(fmt.price(day.close_price)),
            Cell::new(fmt.volume(day.volume)),
            Cell::new(rate_text(fmt, day.change_rate)),
        ]);
    }

    format!("{}\n{}", info, prices)
}

/// Format an entry with its daily prices as JSON
pub fn format_detail_json(detail: &DetailResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(detail)
}
