//! Engine configuration.
//!
//! Settings are threaded into `CrawlEngine` explicitly at construction;
//! the engine never reads configuration ambiently.

use serde::{Deserialize, Serialize};

/// Configuration for the traversal engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Global kill-switch for link following.
    ///
    /// When false, no follow requests are produced for any response,
    /// regardless of the per-rule `follow` flags. Default: true.
    pub(crate) follow_links_enabled: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            follow_links_enabled: true,
        }
    }
}

impl CrawlConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable link following engine-wide.
    #[must_use]
    pub fn with_follow_links(mut self, enabled: bool) -> Self {
        self.follow_links_enabled = enabled;
        self
    }

    #[must_use]
    pub fn follow_links_enabled(&self) -> bool {
        self.follow_links_enabled
    }
}
