pub mod config;
pub mod crawl_engine;
pub mod link_extractor;
pub mod response;
pub mod spider;

pub use config::CrawlConfig;
pub use crawl_engine::{
    Callback, CallbackArgs, CallbackRef, CompiledRule, Continuation, CrawlEngine, CrawlError,
    CrawlOutput, CrawlResult, FollowRequest, LinkProcessor, ProcessorRef, Rule,
};
pub use link_extractor::{Link, LinkMatcher, PatternLinkExtractor};
pub use response::PageResponse;
pub use spider::Spider;
