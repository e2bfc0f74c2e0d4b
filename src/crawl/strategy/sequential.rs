// src/crawl/strategy/sequential.rs
// One element at a time, in page order, on the calling task.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use super::CrawlStrategy;
use crate::crawl::traversal::{admit, fetch_elements, visit_element};
use crate::crawl::CrawlContext;
use crate::error::Result;

pub struct SequentialCrawler;

impl CrawlStrategy for SequentialCrawler {
    fn name(&self) -> &'static str {
        "sequential"
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

        let mut total = 0;
        for element in &elements {
            total += visit_element(&ctx, element, depth, crawl).await?;
        }
        Ok(total)
    }
    .boxed()
}
