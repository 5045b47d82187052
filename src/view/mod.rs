//! HTML rendering for the dashboard.

pub mod html;
pub mod page;
pub mod render;

pub use html::Markup;
pub use page::render_page;
pub use render::{StatusBadge, SummaryView};
