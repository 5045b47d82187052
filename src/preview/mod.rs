//! Read-only preview server
//!
//! Renders the dashboard on the server for each request and serves it as a
//! static page, together with the embedded stylesheet:
//!
//! - `GET /` dashboard page
//! - `GET /history?filter=` history page with a filter tab active
//! - `GET /detail/:code` detail page for one entry
//! - `GET /assets/*path` embedded assets
//!
//! The preview never issues mutations against the backend.

pub mod handler;

pub use handler::{assets_handler, dashboard_handler, detail_handler, history_handler};

use crate::api::WatchlistApi;
use crate::config::DashboardConfig;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Requests are GETs; bodies are never read.
const MAX_BODY_SIZE: usize = 16 * 1024;

/// Shared state for preview handlers.
pub struct PreviewState<A: WatchlistApi> {
    pub api: Arc<A>,
    pub config: Arc<DashboardConfig>,
}

impl<A: WatchlistApi> PreviewState<A> {
    pub fn new(api: Arc<A>, config: Arc<DashboardConfig>) -> Self {
        Self { api, config }
    }
}

/// Build the preview router.
pub fn create_router<A: WatchlistApi>(state: Arc<PreviewState<A>>) -> Router {
    Router::new()
        .route("/", get(dashboard_handler::<A>))
        .route("/history", get(history_handler::<A>))
        .route("/detail/:code", get(detail_handler::<A>))
        .route("/assets/*path", get(assets_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
