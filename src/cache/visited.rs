// src/cache/visited.rs
// Set of page URIs seen during one crawl. Entries are never removed.

use dashmap::DashSet;

/// Concurrency-safe set of visited page URIs.
#[derive(Debug, Default)]
pub struct VisitedSet {
    uris: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `uri` and returns true if it was not already present.
    pub fn test_and_insert(&self, uri: &str) -> bool {
        // Repeat visits skip the allocation
        if self.uris.contains(uri) {
            return false;
        }
        self.uris.insert(uri.to_string())
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.uris.contains(uri)
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}
