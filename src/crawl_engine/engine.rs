//! The traversal engine: callback dispatch, link collection, and result
//! assembly for one spider instance.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace};

use crate::config::CrawlConfig;
use crate::crawl_engine::crawl_types::{
    Callback, CallbackArgs, Continuation, CrawlError, CrawlOutput, CrawlResult, FollowRequest,
};
use crate::crawl_engine::rule::{CompiledRule, compile_rules};
use crate::response::PageResponse;
use crate::spider::Spider;

/// The decision layer of a crawler: routes each downloaded page to at
/// most one rule callback and turns the page's in-scope links into
/// follow requests for the external scheduler.
///
/// Construction compiles the spider's rule templates into an
/// engine-owned rule set; the rules are read-only from then on. The
/// engine performs no I/O and keeps no per-response state, so a single
/// instance can serve many in-flight responses concurrently.
pub struct CrawlEngine {
    spider: Arc<dyn Spider>,
    rules: Vec<CompiledRule>,
    config: CrawlConfig,
}

impl CrawlEngine {
    #[must_use]
    pub fn new(spider: Arc<dyn Spider>, config: CrawlConfig) -> Self {
        let rules = compile_rules(spider.as_ref());
        debug!(target: "linktrail::engine", "Compiled {} crawling rules", rules.len());
        Self {
            spider,
            rules,
            config,
        }
    }

    /// The compiled working rule set, in priority order.
    #[must_use]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Entry point for every top-level response.
    ///
    /// Scans the rules in declared order and dispatches to the first
    /// one that has a callback and whose matcher claims the response
    /// URL; rule order is a priority order, not a union. A response no
    /// rule claims is still crawled for links, just not parsed. Link
    /// following is always attempted at the entry point, subject to the
    /// per-rule follow flags and the global kill-switch.
    ///
    /// # Errors
    ///
    /// Propagates callback and link-extraction failures.
    pub fn parse(&self, response: &PageResponse) -> CrawlResult<Vec<CrawlOutput>> {
        for rule in &self.rules {
            if let Some(callback) = &rule.callback
                && rule.matcher.matches(response.url())
            {
                trace!(
                    target: "linktrail::engine",
                    "Dispatching {} to its rule callback",
                    response.url()
                );
                return self.handle_response(
                    response,
                    Some(callback.clone()),
                    rule.cb_args.clone(),
                    true,
                );
            }
        }

        trace!(
            target: "linktrail::engine",
            "No rule claims {}; crawling without a callback",
            response.url()
        );
        self.handle_response(response, None, CallbackArgs::new(), true)
    }

    /// Re-enter the engine with a response whose originating request
    /// carried `continuation`, so the producing rule's callback, args
    /// and follow flag govern this hop.
    ///
    /// # Errors
    ///
    /// Propagates callback and link-extraction failures.
    pub fn handle_followed(
        &self,
        response: &PageResponse,
        continuation: &Continuation,
    ) -> CrawlResult<Vec<CrawlOutput>> {
        self.handle_response(
            response,
            continuation.callback().cloned(),
            continuation.cb_args().clone(),
            continuation.follow(),
        )
    }

    /// Assemble the result batch for one response: follow requests
    /// first, then callback output as rewritten by the spider's
    /// `process_results` hook. An empty batch is a normal outcome.
    ///
    /// # Errors
    ///
    /// Callback and extraction failures propagate uncaught; isolating a
    /// bad page is the dispatching host's responsibility.
    pub fn handle_response(
        &self,
        response: &PageResponse,
        callback: Option<Callback>,
        cb_args: CallbackArgs,
        follow: bool,
    ) -> CrawlResult<Vec<CrawlOutput>> {
        let mut batch = Vec::new();

        if follow && self.config.follow_links_enabled() {
            batch.extend(
                self.follow_requests(response)?
                    .into_iter()
                    .map(CrawlOutput::Request),
            );
        }

        if let Some(callback) = callback {
            let results = callback(response, &cb_args).map_err(|source| CrawlError::Callback {
                url: response.url().to_string(),
                source,
            })?;
            batch.extend(self.spider.process_results(results, response));
        }

        Ok(batch)
    }

    /// Walk all rules over one response and build deduplicated follow
    /// requests, each carrying its rule's continuation.
    ///
    /// The seen-set spans the whole rule loop but never outlives the
    /// call: a link matched by two rules belongs to the earlier one,
    /// and repeating the call yields the same sequence again. Each
    /// rule's link processor receives only the links that survived the
    /// dedup filter, and its output is what enters the seen-set.
    ///
    /// # Errors
    ///
    /// Propagates link-extraction failures.
    pub fn follow_requests(&self, response: &PageResponse) -> CrawlResult<Vec<FollowRequest>> {
        let mut requests = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for rule in &self.rules {
            let extracted =
                rule.matcher
                    .extract_links(response)
                    .map_err(|source| CrawlError::Extract {
                        url: response.url().to_string(),
                        source,
                    })?;
            let found = extracted.len();

            let fresh: Vec<_> = extracted
                .into_iter()
                .filter(|link| !seen.contains(&link.url))
                .collect();

            let links = match &rule.link_processor {
                Some(processor) if !fresh.is_empty() => processor(fresh),
                _ => fresh,
            };

            debug!(
                target: "linktrail::links",
                "Found {} links on {}, {} kept for this rule",
                found,
                response.url(),
                links.len()
            );

            for link in links {
                seen.insert(link.url.clone());
                requests.push(FollowRequest {
                    url: link.url,
                    text: link.text,
                    continuation: Continuation {
                        callback: rule.callback.clone(),
                        cb_args: rule.cb_args.clone(),
                        follow: rule.follow,
                    },
                });
            }
        }

        trace!(
            target: "linktrail::links",
            "{} follow requests for {}",
            requests.len(),
            response.url()
        );
        Ok(requests)
    }
}
