//! Server-rendered markup fragments.
//!
//! Views are written with leptos `view!` and rendered to strings; text and
//! attribute values are escaped by the renderer. [`Markup`] carries the
//! rendered HTML into document regions, where the page shell splices it back
//! in through `inner_html`.

use leptos::prelude::*;
use std::fmt;

/// Rendered, safe-to-embed HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Render a view to HTML.
    pub fn render(view: impl RenderHtml) -> Self {
        Markup(view.to_html())
    }

    /// Escaped text.
    pub fn text(text: &str) -> Self {
        Self::render(text.to_string())
    }

    /// Concatenate several fragments.
    pub fn concat<I: IntoIterator<Item = Markup>>(parts: I) -> Self {
        Markup(parts.into_iter().map(|m| m.0).collect())
    }

    pub(crate) fn doctype() -> Self {
        Markup("<!DOCTYPE html>".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
