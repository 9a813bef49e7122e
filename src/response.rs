//! Fetched-page surface consumed by the traversal engine.
//!
//! The engine never fetches anything itself. The external fetch engine
//! downloads a page and delivers it here as a `PageResponse`; all the
//! engine needs is the final URL (for rule scoping) and the body (for
//! link extraction and rule callbacks).

use serde::{Deserialize, Serialize};

/// A downloaded page as delivered by the external fetch engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub(crate) url: String,
    pub(crate) body: String,
}

impl PageResponse {
    #[must_use]
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    /// The URL this response was downloaded from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The page body handed to link extraction and rule callbacks.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}
