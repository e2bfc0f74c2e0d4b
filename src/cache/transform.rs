// src/cache/transform.rs
// =============================================================================
// TransformCache: remembers which transform was already run on which image.
//
// Key = (image source URL, transform name). A pair goes in the cache the
// moment the transform is ATTEMPTED, before it runs, so a failing transform
// is not retried when the same image shows up again.
//
// Lifetime is a configuration choice:
// - session: TransformCache::new(), thrown away after the crawl
// - persistent: TransformCache::load(path) before the crawl and
//   persist(path) after it, so a later crawl skips work already done
//
// File format: a JSON array of [image_url, transform_name] pairs.
// =============================================================================

use std::path::Path;

use dashmap::DashSet;
use tracing::debug;

use crate::error::Result;

/// Concurrency-safe set of (image, transform) pairs.
#[derive(Debug, Default)]
pub struct TransformCache {
    entries: DashSet<(String, String)>,
}

impl TransformCache {
    /// Creates an empty, session-scoped cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `transform` is being applied to `image_url`.
    ///
    /// Returns true if the pair was not recorded before, i.e. the caller
    /// should run the transform.
    pub fn test_and_insert(&self, image_url: &str, transform: &str) -> bool {
        self.entries
            .insert((image_url.to_string(), transform.to_string()))
    }

    pub fn contains(&self, image_url: &str, transform: &str) -> bool {
        self.entries
            .contains(&(image_url.to_string(), transform.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a cache saved by [`TransformCache::persist`].
    /// A missing file yields an empty cache.
    pub async fn load(path: &Path) -> Result<Self> {
        let cache = Self::new();
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No transform cache file yet");
                return Ok(cache);
            }
            Err(e) => return Err(e.into()),
        };

        let pairs: Vec<(String, String)> = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), entries = pairs.len(), "Loaded transform cache");
        for pair in pairs {
            cache.entries.insert(pair);
        }
        Ok(cache)
    }

    /// Writes the cache to `path`, creating parent directories as needed.
    pub async fn persist(&self, path: &Path) -> Result<()> {
        let mut pairs: Vec<(String, String)> =
            self.entries.iter().map(|entry| entry.key().clone()).collect();
        pairs.sort();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&pairs)?;
        tokio::fs::write(path, json).await?;
        debug!(path = %path.display(), entries = pairs.len(), "Saved transform cache");
        Ok(())
    }
}
