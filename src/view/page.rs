//! Full-page HTML shell around the document regions.

use super::html::Markup;
use super::render::{class_list, flash_message};
use crate::api::HistoryFilter;
use crate::dom::{Control, Document, PageId, Region};
use leptos::prelude::*;

/// Path of the embedded stylesheet.
pub const STYLESHEET_PATH: &str = "/assets/dashboard.css";

fn region_html(doc: &Document, region: Region) -> String {
    doc.region_html(region).to_string()
}

fn button(control: Control, class: &'static str, label: &'static str) -> impl IntoView {
    view! { <button class=class id={control.id()} type="button">{label}</button> }
}

#[component]
fn StatCard(label: &'static str, region: Region, html: String) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-label">{label}</div>
            <div class="stat-value" id={region.id()} inner_html=html></div>
        </div>
    }
}

#[component]
fn PageSection(page: PageId, active: PageId, children: Children) -> impl IntoView {
    let class = if active == page { "page active" } else { "page" };
    view! {
        <section class=class id={format!("page-{}", page.as_str())} hidden={active != page}>
            {children()}
        </section>
    }
}

fn header_row(labels: &'static [&'static str]) -> impl IntoView {
    let cells = labels
        .iter()
        .map(|label| view! { <th>{*label}</th> })
        .collect::<Vec<_>>();
    view! { <tr>{cells}</tr> }
}

fn header(doc: &Document, title: &str) -> impl IntoView {
    let links = PageId::ALL
        .into_iter()
        .map(|page| {
            let class = if doc.active_page() == page {
                "nav-link active"
            } else {
                "nav-link"
            };
            button(Control::Nav(page), class, page.label())
        })
        .collect::<Vec<_>>();
    let title = title.to_string();
    let status = region_html(doc, Region::ServerStatus);

    view! {
        <header class="header">
            <h1>{title}</h1>
            <nav class="nav">{links}</nav>
            <div class="header-actions">
                <div id={Region::ServerStatus.id()} inner_html=status></div>
                {button(Control::NoticeOpenButton, "btn-secondary", "Send notice")}
                {button(Control::RefreshButton, "btn-primary", "Refresh")}
            </div>
        </header>
    }
}

fn dashboard_page(doc: &Document) -> impl IntoView {
    let stat = |label, region| {
        view! { <StatCard label=label region=region html={region_html(doc, region)} /> }
    };
    let stats = vec![
        stat("Watching", Region::StatWatching),
        stat("Alerted", Region::StatAlerted),
        stat("Expired", Region::StatExpired),
        stat("Success rate", Region::StatRate),
        stat("Avg peak", Region::StatAvgPeak),
    ];
    let value = doc.input(Control::StockNameInput).to_string();
    let add_disabled = doc.is_disabled(Control::AddStockButton);
    let message = doc
        .flash()
        .map(|flash| flash_message(flash).into_string())
        .unwrap_or_default();
    let watching = region_html(doc, Region::WatchingList);
    let recent = region_html(doc, Region::RecentList);

    view! {
        <PageSection page=PageId::Dashboard active={doc.active_page()}>
            <div class="stats-grid">{stats}</div>
            <div class="add-form">
                <input
                    id={Control::StockNameInput.id()}
                    type="text"
                    placeholder="Stock name"
                    value=value
                />
                <button
                    class="btn-primary"
                    id={Control::AddStockButton.id()}
                    type="button"
                    disabled=add_disabled
                >
                    "Add"
                </button>
                <div id="add-message" inner_html=message></div>
            </div>
            <div class="dashboard-grid">
                <div class="panel">
                    <h2>"Watching"</h2>
                    <table class="data-table">
                        <thead>
                            {header_row(&["Name", "Code", "D-0 low", "Peak", "Enrolled", "", ""])}
                        </thead>
                        <tbody id={Region::WatchingList.id()} inner_html=watching></tbody>
                    </table>
                </div>
                <div class="panel">
                    <h2>"Recent registrations"</h2>
                    <div class="recent-list" id={Region::RecentList.id()} inner_html=recent></div>
                </div>
            </div>
        </PageSection>
    }
}

fn history_page(doc: &Document) -> impl IntoView {
    let tabs = HistoryFilter::ALL
        .into_iter()
        .map(|filter| {
            let class = if doc.active_filter() == filter {
                "filter-tab active"
            } else {
                "filter-tab"
            };
            button(Control::FilterTab(filter), class, filter.label())
        })
        .collect::<Vec<_>>();
    let rows = region_html(doc, Region::HistoryList);

    view! {
        <PageSection page=PageId::History active={doc.active_page()}>
            <div class="filter-tabs">{tabs}</div>
            <table class="data-table">
                <thead>
                    {header_row(
                        &["Name", "Code", "Enrolled", "D-0 low", "Peak", "Status", "Alert day", "", ""],
                    )}
                </thead>
                <tbody id={Region::HistoryList.id()} inner_html=rows></tbody>
            </table>
        </PageSection>
    }
}

fn detail_page(doc: &Document) -> impl IntoView {
    let detail = region_html(doc, Region::Detail);
    view! {
        <PageSection page=PageId::Detail active={doc.active_page()}>
            {button(Control::BackToDashboard, "btn-link", "← Back")}
            <div id={Region::Detail.id()} inner_html=detail></div>
        </PageSection>
    }
}

fn notice_modal(doc: &Document) -> impl IntoView {
    let open = doc.notice_open();
    let class = class_list(&["modal", if open { "open" } else { "" }]);
    let message = doc.input(Control::NoticeInput).to_string();

    view! {
        <div class=class id={Control::NoticeOverlay.id()} hidden={!open}>
            <div class="modal-content">
                <div class="modal-header">
                    <h3>"Broadcast notice"</h3>
                    {button(Control::NoticeCloseButton, "btn-close", "×")}
                </div>
                <textarea id={Control::NoticeInput.id()} rows="4">{message}</textarea>
                <div class="modal-actions">
                    {button(Control::NoticeCancelButton, "btn-secondary", "Cancel")}
                    {button(Control::NoticeSendButton, "btn-primary", "Send")}
                </div>
            </div>
        </div>
    }
}

/// Render the whole document as a standalone HTML page.
pub fn render_page(doc: &Document, title: &str) -> Markup {
    let page_title = title.to_string();

    Markup::concat([
        Markup::doctype(),
        Markup::render(view! {
            <html lang="en">
                <head>
                    <meta charset="utf-8" />
                    <meta name="viewport" content="width=device-width, initial-scale=1" />
                    <title>{page_title}</title>
                    <link rel="stylesheet" href=STYLESHEET_PATH />
                </head>
                <body data-page={doc.active_page().as_str()}>
                    {header(doc, title)}
                    <main>
                        {dashboard_page(doc)}
                        {history_page(doc)}
                        {detail_page(doc)}
                    </main>
                    {notice_modal(doc)}
                </body>
            </html>
        }),
    ])
}
