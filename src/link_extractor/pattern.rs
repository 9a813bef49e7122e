//! Regex-scoped link extractor.
//!
//! Extracts anchors from a page body and keeps the ones whose resolved
//! URL passes the allow/deny pattern lists. Patterns are compiled once
//! at construction to keep regex compilation out of the per-response
//! hot path.

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::{Link, LinkMatcher};
use crate::response::PageResponse;

/// [`LinkMatcher`] backed by allow/deny regex lists.
///
/// Deny patterns are checked first; an empty allow list places every
/// URL in scope. Relative hrefs are resolved against the response URL,
/// fragments are stripped so one resource yields one URL, and
/// `mailto:`/`javascript:`/fragment-only hrefs are skipped along with
/// anything that is not http(s).
pub struct PatternLinkExtractor {
    allow: Vec<Regex>,
    deny: Vec<Regex>,
    anchors: Selector,
}

impl PatternLinkExtractor {
    /// Build an extractor from allow/deny pattern lists.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is not a valid regex.
    pub fn new(allow: &[&str], deny: &[&str]) -> Result<Self> {
        Ok(Self {
            allow: compile_patterns(allow)?,
            deny: compile_patterns(deny)?,
            anchors: Selector::parse("a[href]")
                .map_err(|e| anyhow::anyhow!("Invalid anchor selector: {e:?}"))?,
        })
    }

    /// An extractor that keeps every http(s) link on the page.
    ///
    /// # Errors
    ///
    /// Never fails in practice; kept fallible for signature symmetry
    /// with [`PatternLinkExtractor::new`].
    pub fn unscoped() -> Result<Self> {
        Self::new(&[], &[])
    }
}

fn compile_patterns(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("Invalid link pattern '{p}'")))
        .collect()
}

impl LinkMatcher for PatternLinkExtractor {
    fn matches(&self, url: &str) -> bool {
        if self.deny.iter().any(|re| re.is_match(url)) {
            return false;
        }
        self.allow.is_empty() || self.allow.iter().any(|re| re.is_match(url))
    }

    fn extract_links(&self, response: &PageResponse) -> Result<Vec<Link>> {
        let base = Url::parse(response.url())
            .with_context(|| format!("Response URL is not absolute: {}", response.url()))?;
        let document = Html::parse_document(response.body());

        let mut links = Vec::new();
        let mut found = 0usize;
        for anchor in document.select(&self.anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            found += 1;

            // Fragment-only, mailto and javascript hrefs are client-side
            // navigation, not crawlable resources.
            if href.is_empty()
                || href.starts_with('#')
                || href.starts_with("mailto:")
                || href.starts_with("javascript:")
            {
                continue;
            }

            let Ok(mut resolved) = base.join(href) else {
                continue;
            };
            if resolved.scheme() != "http" && resolved.scheme() != "https" {
                continue;
            }

            // One resource, one URL: fragments don't name distinct pages.
            resolved.set_fragment(None);
            let url = resolved.to_string();
            if !self.matches(&url) {
                continue;
            }

            let text = anchor.text().collect::<String>().trim().to_string();
            links.push(Link::new(url, text));
        }

        debug!(
            target: "linktrail::links",
            "Found {} anchors on {}, {} in scope",
            found,
            response.url(),
            links.len()
        );
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_wins_over_allow() {
        let extractor =
            PatternLinkExtractor::new(&[r"/docs/"], &[r"\.pdf$"]).expect("valid patterns");
        assert!(extractor.matches("https://example.com/docs/intro"));
        assert!(!extractor.matches("https://example.com/docs/manual.pdf"));
    }

    #[test]
    fn empty_allow_matches_everything() {
        let extractor = PatternLinkExtractor::unscoped().expect("valid patterns");
        assert!(extractor.matches("https://example.com/anything"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(PatternLinkExtractor::new(&["["], &[]).is_err());
    }
}
