// src/crawl/strategy/parallel.rs
// =============================================================================
// Divide and conquer over a page's elements, one tokio task per element.
//
// How it works:
// 1. Take a SplitCursor over the page's element sequence
// 2. Split it in halves until each range holds at most one element
// 3. Each single element is crawled on its own task in a JoinSet, so work
//    spreads over all worker threads of the runtime
// 4. Join every task, then return the sum or the first error
//
// A panic in a task comes back as CrawlError::Task. Cancelled from any task
// fails the whole crawl, but only after every task of the page has stopped,
// so nothing touches the caches once the crawl has returned.
// =============================================================================

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::task::JoinSet;

use super::CrawlStrategy;
use crate::crawl::traversal::{admit, fetch_elements, visit_element};
use crate::crawl::CrawlContext;
use crate::error::{CrawlError, Result};
use crate::page::PageElement;
use crate::sequence::SplitCursor;

pub struct ParallelCrawler;

impl CrawlStrategy for ParallelCrawler {
    fn name(&self) -> &'static str {
        "parallel"
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

        let mut tasks = JoinSet::new();
        spawn_leaves(&ctx, elements.split_cursor(), depth, &mut tasks);
        join_leaves(tasks).await
    }
    .boxed()
}

// Splits the range in halves down to single elements and spawns one task
// per element into `tasks`.
fn spawn_leaves(
    ctx: &Arc<CrawlContext>,
    mut cursor: SplitCursor<'_, PageElement>,
    depth: usize,
    tasks: &mut JoinSet<Result<usize>>,
) {
    if let Some(lower) = cursor.try_split() {
        spawn_leaves(ctx, lower, depth, tasks);
        spawn_leaves(ctx, cursor, depth, tasks);
        return;
    }

    for element in cursor {
        let ctx = Arc::clone(ctx);
        let element = element.clone();
        tasks.spawn(async move { visit_element(&ctx, &element, depth, crawl).await });
    }
}

// Waits for every task, even after one has failed, and returns the sum or
// the first error. No task is left running once this returns.
async fn join_leaves(mut tasks: JoinSet<Result<usize>>) -> Result<usize> {
    let mut total = 0;
    let mut first_error = None;

    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(CrawlError::from).and_then(|count| count) {
            Ok(count) => total += count,
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::testing::{transform_list, StaticImages, StaticSite, TestTransform};
    use crate::crawl::run_crawl;
    use crate::image::ImageSource;
    use crate::page::PageFetcher;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cancelled_crawl_leaves_no_running_tasks() {
        let cancel = CancellationToken::new();
        // B raises the signal while I1 is still being downloaded
        let site = Arc::new(
            StaticSite::new()
                .page("A", vec![PageElement::image("I1"), PageElement::page("B")])
                .page("B", vec![PageElement::page("C")])
                .cancel_on_fetch("B", cancel.clone()),
        );
        let images = Arc::new(StaticImages::all().with_delay(Duration::from_millis(200)));
        let transform = TestTransform::succeeding("t1");
        let ctx = Arc::new(
            CrawlContext::new(
                Arc::clone(&site) as Arc<dyn PageFetcher>,
                Arc::clone(&images) as Arc<dyn ImageSource>,
                transform_list(&[&transform]),
                3,
            )
            .with_cancellation(cancel),
        );

        let result = run_crawl(Arc::clone(&ctx), &ParallelCrawler, "A").await;
        assert!(matches!(result, Err(CrawlError::Cancelled)));
        let at_return = (ctx.transform_cache().len(), transform.calls());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(at_return, (0, 0));
        assert_eq!((ctx.transform_cache().len(), transform.calls()), (0, 0));
    }
}
