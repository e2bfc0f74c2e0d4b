// src/crawl/strategy/concurrent.rs
// =============================================================================
// All elements of a page run concurrently on the calling task.
//
// try_join_all drives every element future at once; the first error (in
// practice, Cancelled) drops the sibling futures and is returned right away.
// =============================================================================

use std::sync::Arc;

use futures::future::{try_join_all, BoxFuture, FutureExt};

use super::CrawlStrategy;
use crate::crawl::traversal::{admit, fetch_elements, visit_element};
use crate::crawl::CrawlContext;
use crate::error::Result;

pub struct ConcurrentCrawler;

impl CrawlStrategy for ConcurrentCrawler {
    fn name(&self) -> &'static str {
        "concurrent"
    }

    fn perform_crawl(
        &self,
        ctx: Arc<CrawlContext>,
        uri: String,
        depth: usize,
    ) -> BoxFuture<'static, Result<usize>> {
        crawl(ctx, uri, depth)
    }
}

fn crawl(ctx: Arc<CrawlContext>, uri: String, depth: usize) -> BoxFuture<'static, Result<usize>> {
    async move {
        if !admit(&ctx, &uri, depth)? {
            return Ok(0);
        }
        let Some(elements) = fetch_elements(&ctx, &uri, depth).await else {
            return Ok(0);
        };

        let visits = elements
            .iter()
            .map(|element| visit_element(&ctx, element, depth, crawl));
        let counts = try_join_all(visits).await?;
        Ok(counts.into_iter().sum())
    }
    .boxed()
}
