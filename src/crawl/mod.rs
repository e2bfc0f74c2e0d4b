// src/crawl/mod.rs
// =============================================================================
// This module handles the image crawl.
//
// Features:
// - Depth-first, recursive crawling starting from a root URI
// - Every page URI is fetched at most once (VisitedSet)
// - Every transform runs at most once per image (TransformCache)
// - Configurable depth limit (the root page is depth 1)
// - Pluggable execution strategies that all give the same totals
// - Cancellation that aborts the whole crawl, never a partial "success"
//
// Submodules:
// - traversal: the shared filter/fetch steps of perform_crawl
// - pipeline: process_image / transform_image
// - strategy: sequential, concurrent and parallel crawlers + registry
// - report: outcome counters and the final report
// =============================================================================

mod pipeline;
mod report;
mod strategy;
mod traversal;

#[cfg(test)]
mod testing;

pub use pipeline::{process_image, transform_image};
pub use report::{CrawlReport, CrawlStats, Outcome, StatsSnapshot};
pub use strategy::{resolve_strategy, strategy_names, CrawlStrategy};
pub use traversal::ROOT_DEPTH;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cache::{TransformCache, VisitedSet};
use crate::error::{CrawlError, Result};
use crate::image::{ImageSource, OutputStore, Transform};
use crate::page::PageFetcher;
use crate::sequence::GrowableSequence;

/// Everything a crawl shares between its recursive calls and tasks.
pub struct CrawlContext {
    max_depth: usize,
    pages: Arc<dyn PageFetcher>,
    images: Arc<dyn ImageSource>,
    transforms: GrowableSequence<Arc<dyn Transform>>,
    visited: VisitedSet,
    transform_cache: TransformCache,
    output: Option<OutputStore>,
    cancel: CancellationToken,
    stats: CrawlStats,
}

impl CrawlContext {
    /// Creates a context with a fresh session-scoped transform cache and
    /// its own cancellation token.
    pub fn new(
        pages: Arc<dyn PageFetcher>,
        images: Arc<dyn ImageSource>,
        transforms: GrowableSequence<Arc<dyn Transform>>,
        max_depth: usize,
    ) -> Self {
        Self {
            max_depth,
            pages,
            images,
            transforms,
            visited: VisitedSet::new(),
            transform_cache: TransformCache::new(),
            output: None,
            cancel: CancellationToken::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Uses `cache` instead of an empty one (e.g. loaded from disk).
    pub fn with_transform_cache(mut self, cache: TransformCache) -> Self {
        self.transform_cache = cache;
        self
    }

    /// Writes every transformed image to `store`.
    pub fn with_output(mut self, store: OutputStore) -> Self {
        self.output = Some(store);
        self
    }

    /// Ties the crawl to an outside cancellation signal.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn pages(&self) -> &dyn PageFetcher {
        self.pages.as_ref()
    }

    pub fn images(&self) -> &dyn ImageSource {
        self.images.as_ref()
    }

    pub fn transforms(&self) -> &GrowableSequence<Arc<dyn Transform>> {
        &self.transforms
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn transform_cache(&self) -> &TransformCache {
        &self.transform_cache
    }

    pub fn output(&self) -> Option<&OutputStore> {
        self.output.as_ref()
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fails with `Cancelled` once the cancellation signal is raised.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(CrawlError::Cancelled);
        }
        Ok(())
    }
}

// Crawls from `root` with `strategy` and summarizes the result
//
// Returns: the report, or CrawlError::Cancelled if the signal was raised
// at any point during the crawl
pub async fn run_crawl(
    ctx: Arc<CrawlContext>,
    strategy: &dyn CrawlStrategy,
    root: &str,
) -> Result<CrawlReport> {
    info!(root = %root, strategy = strategy.name(), max_depth = ctx.max_depth(), "Starting crawl");

    let images_transformed = strategy
        .perform_crawl(Arc::clone(&ctx), root.to_string(), ROOT_DEPTH)
        .await?;

    let stats = ctx.stats().snapshot();
    info!(
        images_transformed,
        pages = stats.pages_fetched,
        "Crawl finished"
    );

    Ok(CrawlReport {
        root: root.to_string(),
        strategy: strategy.name().to_string(),
        max_depth: ctx.max_depth(),
        images_transformed,
        stats,
    })
}
