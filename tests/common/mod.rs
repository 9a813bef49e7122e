//! Test utilities and fixtures shared across the linktrail test suite

use std::sync::{Arc, Mutex};

use anyhow::Result;
use linktrail::{Callback, CallbackArgs, CrawlOutput, Link, LinkMatcher, PageResponse};

/// Initializes test logging once; safe to call from every test.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Matcher scoped by URL prefix that reads one link per body line
/// ("url anchor-text"), standing in for a real HTML extractor in
/// decision-layer tests.
#[allow(dead_code)]
pub struct LineMatcher {
    prefix: String,
}

impl LineMatcher {
    #[allow(dead_code)]
    pub fn new(prefix: &str) -> Arc<Self> {
        Arc::new(Self {
            prefix: prefix.to_string(),
        })
    }
}

impl LinkMatcher for LineMatcher {
    fn matches(&self, url: &str) -> bool {
        url.starts_with(&self.prefix)
    }

    fn extract_links(&self, response: &PageResponse) -> Result<Vec<Link>> {
        Ok(response
            .body()
            .lines()
            .filter_map(|line| {
                let (url, text) = line.split_once(' ').unwrap_or((line, ""));
                (!url.is_empty() && self.matches(url)).then(|| Link::new(url, text))
            })
            .collect())
    }
}

/// Matcher whose extraction always fails, for error propagation tests.
#[allow(dead_code)]
pub struct FailingMatcher;

impl LinkMatcher for FailingMatcher {
    fn matches(&self, _url: &str) -> bool {
        true
    }

    fn extract_links(&self, _response: &PageResponse) -> Result<Vec<Link>> {
        anyhow::bail!("extractor exploded")
    }
}

/// Creates a page whose body lists its links one per line.
#[allow(dead_code)]
pub fn link_page(url: &str, links: &[&str]) -> PageResponse {
    PageResponse::new(url, links.join("\n"))
}

/// Callback producing a single item tagged with `tag`, handy for
/// observing which rule fired.
#[allow(dead_code)]
pub fn item_callback(tag: &str) -> Callback {
    let tag = tag.to_string();
    Arc::new(move |_response, _args| {
        Ok(vec![CrawlOutput::Item(serde_json::json!({ "tag": tag }))])
    })
}

/// Callback recording the args of every invocation and returning
/// nothing.
#[allow(dead_code)]
pub fn recording_callback(seen: Arc<Mutex<Vec<CallbackArgs>>>) -> Callback {
    Arc::new(move |_response, args| {
        seen.lock().expect("args mutex poisoned").push(args.clone());
        Ok(Vec::new())
    })
}

/// Extracts the item tags produced by `item_callback` from a batch.
#[allow(dead_code)]
pub fn item_tags(batch: &[CrawlOutput]) -> Vec<String> {
    batch
        .iter()
        .filter_map(|output| match output {
            CrawlOutput::Item(value) => value
                .get("tag")
                .and_then(|tag| tag.as_str())
                .map(str::to_string),
            CrawlOutput::Request(_) => None,
        })
        .collect()
}
