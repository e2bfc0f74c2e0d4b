// src/crawl/pipeline.rs
// =============================================================================
// The image pipeline: get an image, run each transform on it at most once.
//
// process_image(url):
// 1. Obtain the image (cached or downloaded); missing image => 0
// 2. transform_image(image)
//
// transform_image(image):
// - For each configured transform, in order:
//   - stop with Cancelled if the signal was raised
//   - test-and-insert (image URL, transform name) in the TransformCache;
//     if it was already there, skip (this is memoization, not an error)
//   - run the transform; no result => not counted
//   - save the result if an OutputStore is configured
// - Return how many transforms produced an image
// =============================================================================

use tracing::{debug, trace, warn};

use super::{CrawlContext, Outcome};
use crate::error::Result;
use crate::image::Image;

/// Obtains the image at `url` and applies the transforms not yet applied.
///
/// Returns the number of successful transform applications, or
/// `CrawlError::Cancelled`.
pub async fn process_image(ctx: &CrawlContext, url: &str) -> Result<usize> {
    ctx.check_cancelled()?;

    let Some(image) = ctx.images().obtain_image(url).await else {
        debug!(url = %url, "Image unavailable");
        ctx.stats().record(Outcome::ImageUnavailable);
        return Ok(0);
    };
    ctx.stats().record(Outcome::ImageObtained);

    transform_image(ctx, &image).await
}

/// Applies every transform that has not yet been applied to `image`.
///
/// Cancellation is checked before each transform, so no cache entry is
/// added once the signal is raised.
pub async fn transform_image(ctx: &CrawlContext, image: &Image) -> Result<usize> {
    let mut applied = 0;

    for transform in ctx.transforms() {
        ctx.check_cancelled()?;
        if !ctx
            .transform_cache()
            .test_and_insert(image.url(), transform.name())
        {
            trace!(url = %image.url(), transform = transform.name(), "Already applied");
            ctx.stats().record(Outcome::TransformAlreadyApplied);
            continue;
        }

        let Some(output) = transform.apply(image) else {
            debug!(url = %image.url(), transform = transform.name(), "Transform failed");
            ctx.stats().record(Outcome::TransformFailed);
            continue;
        };

        applied += 1;
        ctx.stats().record(Outcome::TransformApplied);

        if let Some(store) = ctx.output() {
            match store.save(transform.name(), &output).await {
                Ok(path) => trace!(path = %path.display(), "Saved transformed image"),
                Err(e) => warn!(
                    url = %image.url(),
                    transform = transform.name(),
                    error = %e,
                    "Failed to save transformed image"
                ),
            }
        }
    }

    Ok(applied)
}
