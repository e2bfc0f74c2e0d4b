// src/image/source.rs
// =============================================================================
// CachingImageSource: downloads images and keeps them in memory.
//
// The same image URL is often linked from many pages. The first request
// downloads it; later requests get the cached Arc<Image> back without
// touching the network.
//
// Two tasks asking for the same new URL at the same moment may both
// download it. That's harmless: the TransformCache (not this cache) is what
// guarantees each transform runs once per image.
// =============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};

use super::{Image, ImageSource};
use crate::loader::Loader;

/// Image source with an in-memory cache keyed by URL.
#[derive(Debug)]
pub struct CachingImageSource {
    loader: Loader,
    cache: DashMap<String, Arc<Image>>,
}

impl CachingImageSource {
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            cache: DashMap::new(),
        }
    }

    /// Number of images held in memory.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl ImageSource for CachingImageSource {
    async fn obtain_image(&self, url: &str) -> Option<Arc<Image>> {
        if let Some(image) = self.cache.get(url) {
            debug!(url = %url, "Image served from cache");
            return Some(Arc::clone(image.value()));
        }

        match self.loader.bytes(url).await {
            Ok(bytes) => {
                let image = Arc::new(Image::new(url, bytes));
                let entry = self
                    .cache
                    .entry(url.to_string())
                    .or_insert_with(|| Arc::clone(&image));
                Some(Arc::clone(entry.value()))
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to download image");
                None
            }
        }
    }
}
