//! Traversal Engine Module
//!
//! This module contains the core decision logic: rule representation
//! and compilation, per-response callback dispatch, link collection
//! with cross-rule dedup, and result assembly.

// Sub-modules
pub mod crawl_types;
pub mod engine;
pub mod rule;

// Re-exports for public API
pub use engine::CrawlEngine;

// Re-export rule types
pub use rule::{CallbackRef, CompiledRule, ProcessorRef, Rule};

// Re-export core value and error types
pub use crawl_types::{
    Callback, CallbackArgs, Continuation, CrawlError, CrawlOutput, CrawlResult, FollowRequest,
    LinkProcessor,
};
