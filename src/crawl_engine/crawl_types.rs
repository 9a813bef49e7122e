//! Core types for the traversal engine.
//!
//! This module contains the engine's error and result types, the output
//! values handed back to the external scheduler, and the callable
//! aliases rules are built from.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::link_extractor::Link;
use crate::response::PageResponse;

/// Error type for traversal operations.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// A rule callback failed while processing a response.
    ///
    /// Callback failures propagate to the caller uncaught; isolating a
    /// bad page is the dispatching host's responsibility.
    #[error("Callback failed for {url}")]
    Callback {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    /// A rule's matcher failed to extract links from a response.
    #[error("Link extraction failed for {url}")]
    Extract {
        url: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience alias for Result with `CrawlError`.
pub type CrawlResult<T> = Result<T, CrawlError>;

/// Named arguments handed to a rule callback.
///
/// Always present, never optional: a rule without declared arguments
/// carries an empty map, so callbacks can unpack unconditionally.
pub type CallbackArgs = serde_json::Map<String, serde_json::Value>;

/// A bound rule callback: parses a response body and returns extracted
/// items and/or further requests.
pub type Callback =
    Arc<dyn Fn(&PageResponse, &CallbackArgs) -> anyhow::Result<Vec<CrawlOutput>> + Send + Sync>;

/// A bound link post-processor: filters or rewrites the links one rule
/// matched before they become follow requests.
pub type LinkProcessor = Arc<dyn Fn(Vec<Link>) -> Vec<Link> + Send + Sync>;

/// Rule-derived metadata attached to a follow request.
///
/// When the scheduler eventually redelivers the response for that
/// request, the continuation governs how it is processed, so the
/// originating rule's behavior survives across crawl hops instead of
/// falling back to a global default.
#[derive(Clone)]
pub struct Continuation {
    pub(crate) callback: Option<Callback>,
    pub(crate) cb_args: CallbackArgs,
    pub(crate) follow: bool,
}

impl Continuation {
    #[must_use]
    pub fn callback(&self) -> Option<&Callback> {
        self.callback.as_ref()
    }

    #[must_use]
    pub fn cb_args(&self) -> &CallbackArgs {
        &self.cb_args
    }

    /// Whether links should be followed from the request's response.
    #[must_use]
    pub fn follow(&self) -> bool {
        self.follow
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("has_callback", &self.callback.is_some())
            .field("cb_args", &self.cb_args)
            .field("follow", &self.follow)
            .finish()
    }
}

/// An outgoing request produced by the link collector, to be fetched by
/// the external scheduler and redelivered with its continuation intact.
#[derive(Debug, Clone)]
pub struct FollowRequest {
    pub url: String,
    pub text: String,
    pub continuation: Continuation,
}

/// One element of the batch handed back to the scheduler: a request to
/// follow, or an extracted item opaque to this engine.
#[derive(Debug, Clone)]
pub enum CrawlOutput {
    Request(FollowRequest),
    Item(serde_json::Value),
}

impl CrawlOutput {
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    #[must_use]
    pub fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }
}
