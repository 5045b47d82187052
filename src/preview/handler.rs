//! HTTP handlers for preview routes

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::sync::Arc;

use super::PreviewState;
use crate::api::{HistoryFilter, WatchlistApi};
use crate::client::{DashboardClient, NonInteractive};
use crate::dom::PageId;
use crate::view::render_page;

/// Embedded dashboard assets from dashboard/ directory
#[derive(RustEmbed)]
#[folder = "dashboard/"]
struct DashboardAssets;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub filter: Option<String>,
}

fn preview_client<A: WatchlistApi>(state: &PreviewState<A>) -> DashboardClient<A> {
    DashboardClient::new(
        Arc::clone(&state.api),
        Arc::new(NonInteractive),
        &state.config.display,
    )
}

fn page_response<A: WatchlistApi>(client: &DashboardClient<A>, state: &PreviewState<A>) -> Response {
    let html = render_page(&client.document(), &state.config.display.title);
    Html(html.into_string()).into_response()
}

/// Serves the dashboard page
pub async fn dashboard_handler<A: WatchlistApi>(
    State(state): State<Arc<PreviewState<A>>>,
) -> Response {
    let client = preview_client(&state);
    client.initialize().await;
    page_response(&client, &state)
}

/// Serves the history page with the requested filter tab active
pub async fn history_handler<A: WatchlistApi>(
    State(state): State<Arc<PreviewState<A>>>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let filter = match query.filter.as_deref() {
        None | Some("") => HistoryFilter::All,
        Some(raw) => match raw.parse::<HistoryFilter>() {
            Ok(filter) => filter,
            Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
        },
    };

    let client = preview_client(&state);
    client.restore_view(PageId::History, filter);
    client.initialize().await;
    page_response(&client, &state)
}

/// Serves the detail page for one stock code
pub async fn detail_handler<A: WatchlistApi>(
    State(state): State<Arc<PreviewState<A>>>,
    Path(code): Path<String>,
) -> Response {
    let client = preview_client(&state);
    client.restore_view(PageId::Detail, HistoryFilter::All);
    tokio::join!(client.initialize(), client.show_detail(&code));
    page_response(&client, &state)
}

/// Serves static assets (CSS, etc.)
pub async fn assets_handler(Path(path): Path<String>) -> Response {
    match DashboardAssets::get(&path) {
        Some(content) => {
            let body = content.data;
            let mime_type = mime_guess::from_path(&path).first_or_octet_stream();

            ([(header::CONTENT_TYPE, mime_type.as_ref())], body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assets_handler_serves_stylesheet() {
        let response = assets_handler(Path("dashboard.css".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );
    }

    #[tokio::test]
    async fn test_assets_handler_not_found() {
        let response = assets_handler(Path("nonexistent.js".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
