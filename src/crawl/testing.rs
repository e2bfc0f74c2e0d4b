// src/crawl/testing.rs
// In-memory collaborators for crawl tests: a fake site, a fake image
// source and transforms that count their calls.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

use crate::image::{Image, ImageSource, Transform};
use crate::page::{Page, PageElement, PageFetcher};
use crate::sequence::GrowableSequence;

/// A site held in memory; counts how often each URI is fetched.
#[derive(Default)]
pub struct StaticSite {
    pages: HashMap<String, Vec<PageElement>>,
    fetches: DashMap<String, usize>,
    cancel_on: Option<(String, CancellationToken)>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, uri: &str, elements: Vec<PageElement>) -> Self {
        self.pages.insert(uri.to_string(), elements);
        self
    }

    /// Raises `cancel` when `uri` is fetched.
    pub fn cancel_on_fetch(mut self, uri: &str, cancel: CancellationToken) -> Self {
        self.cancel_on = Some((uri.to_string(), cancel));
        self
    }

    pub fn fetches(&self, uri: &str) -> usize {
        self.fetches.get(uri).map(|count| *count).unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.iter().map(|entry| *entry.value()).sum()
    }
}

#[async_trait]
impl PageFetcher for StaticSite {
    async fn fetch_page(&self, uri: &str) -> Option<Page> {
        *self.fetches.entry(uri.to_string()).or_insert(0) += 1;
        if let Some((target, cancel)) = &self.cancel_on {
            if target == uri {
                cancel.cancel();
            }
        }
        // Let other tasks interleave, like a real fetch would
        tokio::task::yield_now().await;

        self.pages
            .get(uri)
            .map(|elements| Page::new(uri, GrowableSequence::from_vec(elements.clone())))
    }
}

/// Serves an image for every URL, or only for an allow-list.
pub struct StaticImages {
    allowed: Option<HashSet<String>>,
    delay: Option<Duration>,
}

impl StaticImages {
    pub fn all() -> Self {
        Self {
            allowed: None,
            delay: None,
        }
    }

    pub fn only(urls: &[&str]) -> Self {
        Self {
            allowed: Some(urls.iter().map(|url| url.to_string()).collect()),
            delay: None,
        }
    }

    /// Makes every download take `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ImageSource for StaticImages {
    async fn obtain_image(&self, url: &str) -> Option<Arc<Image>> {
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(url) {
                return None;
            }
        }
        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
        Some(Arc::new(Image::new(url, url.as_bytes().to_vec())))
    }
}

/// A transform that always succeeds or always fails, counting calls.
#[derive(Clone)]
pub struct TestTransform {
    name: String,
    succeed: bool,
    calls: Arc<AtomicUsize>,
}

impl TestTransform {
    pub fn succeeding(name: &str) -> Self {
        Self {
            name: name.to_string(),
            succeed: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            succeed: false,
            ..Self::succeeding(name)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transform for TestTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, image: &Image) -> Option<Image> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.succeed.then(|| image.clone())
    }
}

/// Shares the given transforms (and their call counters) with a crawl.
pub fn transform_list(transforms: &[&TestTransform]) -> GrowableSequence<Arc<dyn Transform>> {
    transforms
        .iter()
        .map(|t| Arc::new((*t).clone()) as Arc<dyn Transform>)
        .collect()
}
