//! Crawling rules and their compilation.
//!
//! A [`Rule`] is a template: its callback and link processor may be
//! bound values or names of spider methods. Compilation resolves every
//! name against the owning spider exactly once, producing the
//! [`CompiledRule`] set an engine instance works from.

use std::sync::Arc;

use log::warn;

use crate::crawl_engine::crawl_types::{Callback, CallbackArgs, LinkProcessor};
use crate::link_extractor::LinkMatcher;
use crate::spider::Spider;

/// A callback reference as declared on a rule template: absent, bound
/// directly, or named after a spider method to be resolved at compile
/// time.
#[derive(Clone)]
pub enum CallbackRef {
    Unset,
    Named(String),
    Bound(Callback),
}

/// Same shape as [`CallbackRef`], for link post-processors.
#[derive(Clone)]
pub enum ProcessorRef {
    Unset,
    Named(String),
    Bound(LinkProcessor),
}

/// A declarative crawling rule: which links are in scope, which
/// callback (if any) parses the pages they lead to, and whether to keep
/// following links from those pages.
///
/// The follow flag is fixed when the rule is declared: an explicit
/// [`Rule::with_follow`] wins; otherwise it defaults to `false` when a
/// callback is declared and `true` when the rule only traverses. Pages
/// you explicitly parse are leaf content unless told otherwise; pages
/// you only traverse are assumed to lead further. Declaring a callback
/// by name counts as having one even if the name later fails to
/// resolve; compilation never recomputes the flag.
#[derive(Clone)]
pub struct Rule {
    pub(crate) matcher: Arc<dyn LinkMatcher>,
    pub(crate) callback: CallbackRef,
    pub(crate) cb_args: CallbackArgs,
    pub(crate) follow: Option<bool>,
    pub(crate) link_processor: ProcessorRef,
}

impl Rule {
    /// A rule that follows every link its matcher yields and parses
    /// nothing.
    #[must_use]
    pub fn new(matcher: Arc<dyn LinkMatcher>) -> Self {
        Self {
            matcher,
            callback: CallbackRef::Unset,
            cb_args: CallbackArgs::new(),
            follow: None,
            link_processor: ProcessorRef::Unset,
        }
    }

    /// Attach a bound callback.
    #[must_use]
    pub fn with_callback(mut self, callback: Callback) -> Self {
        self.callback = CallbackRef::Bound(callback);
        self
    }

    /// Reference a callback by spider method name, resolved at compile
    /// time.
    #[must_use]
    pub fn with_callback_name(mut self, name: impl Into<String>) -> Self {
        self.callback = CallbackRef::Named(name.into());
        self
    }

    /// Named arguments passed to the callback on every invocation.
    #[must_use]
    pub fn with_args(mut self, cb_args: CallbackArgs) -> Self {
        self.cb_args = cb_args;
        self
    }

    /// Override the computed follow default.
    #[must_use]
    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = Some(follow);
        self
    }

    /// Attach a bound link post-processor.
    #[must_use]
    pub fn with_link_processor(mut self, processor: LinkProcessor) -> Self {
        self.link_processor = ProcessorRef::Bound(processor);
        self
    }

    /// Reference a link post-processor by spider method name.
    #[must_use]
    pub fn with_link_processor_name(mut self, name: impl Into<String>) -> Self {
        self.link_processor = ProcessorRef::Named(name.into());
        self
    }

    fn follow_or_default(&self) -> bool {
        match self.follow {
            Some(explicit) => explicit,
            None => matches!(self.callback, CallbackRef::Unset),
        }
    }
}

/// A rule after name resolution: callback and link processor are bound
/// or definitively absent, and the follow flag is concrete. Never
/// mutated after compilation.
#[derive(Clone)]
pub struct CompiledRule {
    pub(crate) matcher: Arc<dyn LinkMatcher>,
    pub(crate) callback: Option<Callback>,
    pub(crate) cb_args: CallbackArgs,
    pub(crate) follow: bool,
    pub(crate) link_processor: Option<LinkProcessor>,
}

impl CompiledRule {
    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    #[must_use]
    pub fn has_link_processor(&self) -> bool {
        self.link_processor.is_some()
    }

    #[must_use]
    pub fn cb_args(&self) -> &CallbackArgs {
        &self.cb_args
    }

    #[must_use]
    pub fn follow(&self) -> bool {
        self.follow
    }
}

/// Resolve every rule template against `spider`, producing the working
/// rule set one engine instance owns. Runs exactly once per instance.
///
/// An unresolvable name compiles to no callback / no processor rather
/// than failing: the rule still traverses, it just stops parsing. The
/// miss is logged so the misconfiguration is visible.
pub(crate) fn compile_rules(spider: &dyn Spider) -> Vec<CompiledRule> {
    spider
        .rules()
        .into_iter()
        .map(|rule| {
            let follow = rule.follow_or_default();

            let callback = match rule.callback {
                CallbackRef::Unset => None,
                CallbackRef::Bound(callback) => Some(callback),
                CallbackRef::Named(name) => {
                    let resolved = spider.resolve_callback(&name);
                    if resolved.is_none() {
                        warn!(
                            target: "linktrail::rules",
                            "Callback '{name}' not found on spider; rule compiled without one"
                        );
                    }
                    resolved
                }
            };

            let link_processor = match rule.link_processor {
                ProcessorRef::Unset => None,
                ProcessorRef::Bound(processor) => Some(processor),
                ProcessorRef::Named(name) => {
                    let resolved = spider.resolve_link_processor(&name);
                    if resolved.is_none() {
                        warn!(
                            target: "linktrail::rules",
                            "Link processor '{name}' not found on spider; rule compiled without one"
                        );
                    }
                    resolved
                }
            };

            CompiledRule {
                matcher: rule.matcher,
                callback,
                cb_args: rule.cb_args,
                follow,
                link_processor,
            }
        })
        .collect()
}
