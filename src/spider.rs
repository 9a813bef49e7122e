//! The `Spider` trait: crawling rules plus the named methods they
//! reference.

use crate::crawl_engine::crawl_types::{Callback, CrawlOutput, LinkProcessor};
use crate::crawl_engine::rule::Rule;
use crate::response::PageResponse;

/// Defines the contract for a rule-driven spider.
///
/// A spider declares its crawling rules and supplies the named
/// callbacks and link processors those rules reference. Rules are
/// templates: every [`CrawlEngine`](crate::crawl_engine::CrawlEngine)
/// compiles its own independent copy at construction, so one spider can
/// back many engine instances without them affecting each other.
pub trait Spider: Send + Sync {
    /// The rule templates for this spider, in priority order.
    fn rules(&self) -> Vec<Rule>;

    /// Resolve a rule callback declared by name.
    ///
    /// Returning `None` for an unknown name is not an error: the rule
    /// compiles without a callback and its pages are crawled but not
    /// parsed.
    fn resolve_callback(&self, _name: &str) -> Option<Callback> {
        None
    }

    /// Resolve a link post-processor declared by name. Same leniency as
    /// [`Spider::resolve_callback`].
    fn resolve_link_processor(&self, _name: &str) -> Option<LinkProcessor> {
        None
    }

    /// Last-chance rewrite of callback results before they are handed
    /// back to the scheduler, e.g. to stamp provenance onto items.
    /// Follow requests do not pass through this hook. Identity by
    /// default.
    fn process_results(
        &self,
        results: Vec<CrawlOutput>,
        _response: &PageResponse,
    ) -> Vec<CrawlOutput> {
        results
    }
}
