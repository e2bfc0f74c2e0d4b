// src/crawl/traversal.rs
// =============================================================================
// The steps of perform_crawl that every strategy shares.
//
// How it works:
// 1. admit(): stop if cancelled, reject URIs that are too deep or already
//    visited (the VisitedSet is the ONLY dedup gate)
// 2. fetch_elements(): fetch the page and list its image/page elements
// 3. visit_element(): an image goes to the pipeline, a page is crawled
//    one level deeper with the strategy's own recursive function
//
// The strategies only differ in HOW they run step 3 over a page's
// elements: one at a time, all at once on one task, or spread over tasks.
// =============================================================================

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, trace};

use super::pipeline::process_image;
use super::{CrawlContext, Outcome};
use crate::error::Result;
use crate::page::{ElementKind, PageElement};
use crate::sequence::GrowableSequence;

/// Depth of the root page. A crawl with `max_depth = 0` fetches nothing.
pub const ROOT_DEPTH: usize = 1;

// Element kinds a crawl follows, in the order they are requested
const CRAWLED_KINDS: [ElementKind; 2] = [ElementKind::Image, ElementKind::Page];

/// A strategy's recursive entry point, used to crawl sub-pages.
pub(crate) type CrawlFn = fn(Arc<CrawlContext>, String, usize) -> BoxFuture<'static, Result<usize>>;

// Decides whether `uri` at `depth` should be fetched
//
// Returns:
//   Ok(true)  = fetch it (and it is now marked visited)
//   Ok(false) = skip it, it contributes 0
//   Err(Cancelled) = the whole crawl must stop
pub(crate) fn admit(ctx: &CrawlContext, uri: &str, depth: usize) -> Result<bool> {
    ctx.check_cancelled()?;

    if depth > ctx.max_depth() {
        trace!(uri = %uri, depth, max_depth = ctx.max_depth(), "Exceeded max depth");
        ctx.stats().record(Outcome::DepthExceeded);
        return Ok(false);
    }

    if !ctx.visited().test_and_insert(uri) {
        trace!(uri = %uri, "Already visited");
        ctx.stats().record(Outcome::AlreadyVisited);
        return Ok(false);
    }

    Ok(true)
}

// Fetches `uri` and returns its image and page elements in page order
//
// Returns: None if the page could not be fetched
pub(crate) async fn fetch_elements(
    ctx: &CrawlContext,
    uri: &str,
    depth: usize,
) -> Option<GrowableSequence<PageElement>> {
    debug!(uri = %uri, depth, "Crawling");

    match ctx.pages().fetch_page(uri).await {
        Some(page) => {
            ctx.stats().record(Outcome::PageFetched);
            Some(page.elements(&CRAWLED_KINDS))
        }
        None => {
            ctx.stats().record(Outcome::PageUnavailable);
            None
        }
    }
}

// Processes one element found on a page at `depth`
//
// Images are transformed; pages are crawled at depth + 1 with `recurse`
pub(crate) async fn visit_element(
    ctx: &Arc<CrawlContext>,
    element: &PageElement,
    depth: usize,
    recurse: CrawlFn,
) -> Result<usize> {
    match element.kind() {
        ElementKind::Image => process_image(ctx, element.url()).await,
        ElementKind::Page => recurse(Arc::clone(ctx), element.url().to_string(), depth + 1).await,
    }
}
