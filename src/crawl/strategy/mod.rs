// src/crawl/strategy/mod.rs
// =============================================================================
// Execution strategies and the registry that picks one by name.
//
// Every strategy implements the same contract (see traversal.rs):
// same dedup, same depth bound, same cancellation, same totals. They only
// differ in how the elements of a page are processed:
//
//   sequential  one after another, in page order, on the calling task
//   concurrent  all at once, interleaved on the calling task
//   parallel    split in halves down to single elements, each element on
//               its own tokio task (runs on all runtime worker threads)
//
// The registry is a plain table of name -> constructor, resolved once at
// startup from the config.
// =============================================================================

mod concurrent;
mod parallel;
mod sequential;

use std::sync::Arc;

use futures::future::BoxFuture;

use super::CrawlContext;
use crate::error::{CrawlError, Result};

/// A way of executing the recursive crawl.
pub trait CrawlStrategy: Send + Sync {
    /// Registry name of the strategy.
    fn name(&self) -> &'static str;

    /// Crawls `uri` at `depth` and returns the number of successful
    /// transform applications in that subtree.
    fn perform_crawl(
        &self,
        ctx: Arc<CrawlContext>,
        uri: String,
        depth: usize,
    ) -> BoxFuture<'static, Result<usize>>;
}

type StrategyFactory = fn() -> Box<dyn CrawlStrategy>;

fn sequential() -> Box<dyn CrawlStrategy> {
    Box::new(sequential::SequentialCrawler)
}

fn concurrent() -> Box<dyn CrawlStrategy> {
    Box::new(concurrent::ConcurrentCrawler)
}

fn parallel() -> Box<dyn CrawlStrategy> {
    Box::new(parallel::ParallelCrawler)
}

const STRATEGIES: &[(&str, StrategyFactory)] = &[
    ("sequential", sequential),
    ("concurrent", concurrent),
    ("parallel", parallel),
];

/// Names accepted by [`resolve_strategy`].
pub fn strategy_names() -> impl Iterator<Item = &'static str> {
    STRATEGIES.iter().map(|(name, _)| *name)
}

/// Builds the strategy registered under `name`.
pub fn resolve_strategy(name: &str) -> Result<Box<dyn CrawlStrategy>> {
    STRATEGIES
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, factory)| factory())
        .ok_or_else(|| CrawlError::UnknownStrategy(name.to_string()))
}
