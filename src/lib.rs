//! watchdash - Stock watchlist dashboard client
//!
//! This library provides a typed client for the watchlist backend, the
//! dashboard state machine that drives the page, and HTML rendering for it.
//!
//! - [`api`]: wire types and the [`api::WatchlistApi`] seam, with a reqwest implementation
//! - [`client`]: [`client::DashboardClient`], the operations behind every control
//! - [`dom`]: document regions, controls and event bindings
//! - [`view`]: server-rendered leptos views for the page and its regions
//! - [`format`]: price, rate, date and volume formatting
//! - [`preview`]: read-only axum preview server
//! - [`cli`]: command-line interface

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod dom;
pub mod format;
pub mod logging;
pub mod preview;
pub mod view;
