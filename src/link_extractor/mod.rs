//! Link extraction interface consumed by the traversal engine.
//!
//! A [`LinkMatcher`] is the capability a rule is scoped by: it decides
//! whether a URL is in scope and extracts the in-scope links from a
//! downloaded page. The engine only consumes this interface; the
//! [`PatternLinkExtractor`] in this module is one shipped
//! implementation, and hosts are free to supply their own.

pub mod pattern;

pub use pattern::PatternLinkExtractor;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::response::PageResponse;

/// A link discovered on a page: target URL plus anchor text.
///
/// Transient: links only live between extraction and follow-request
/// construction, they are never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub text: String,
}

impl Link {
    #[must_use]
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// Decides whether a URL is in scope for a rule and extracts the
/// in-scope links from a response.
pub trait LinkMatcher: Send + Sync {
    /// Whether `url` falls inside this matcher's scope.
    fn matches(&self, url: &str) -> bool;

    /// The ordered sequence of in-scope links found on `response`.
    ///
    /// # Errors
    ///
    /// Extraction failures propagate to the caller; the engine never
    /// catches them internally.
    fn extract_links(&self, response: &PageResponse) -> Result<Vec<Link>>;
}
