// src/crawl/report.rs
// =============================================================================
// Counters for everything that happens during a crawl, and the final report.
//
// Most things that "go wrong" in a crawl are not errors: a page too deep, a
// page seen before, a broken image link. They contribute 0 to the image
// count. CrawlStats keeps a tally of each outcome so the report can say
// WHY the count is what it is.
//
// Rust concepts:
// - AtomicUsize: counters that many tasks can bump without a lock
// - #[derive(Serialize)]: the report prints as JSON with --json
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// One observable outcome during a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A page was fetched and its elements processed
    PageFetched,
    /// A page link was deeper than max_depth (not fetched)
    DepthExceeded,
    /// A page link was already visited (not fetched)
    AlreadyVisited,
    /// Fetching a page returned nothing
    PageUnavailable,
    /// An image was obtained (downloaded or from the cache)
    ImageObtained,
    /// Obtaining an image returned nothing
    ImageUnavailable,
    /// A transform ran and produced an image
    TransformApplied,
    /// The (image, transform) pair had already been attempted
    TransformAlreadyApplied,
    /// A transform ran and produced nothing
    TransformFailed,
}

const OUTCOME_COUNT: usize = 9;

/// Thread-safe tally of [`Outcome`]s.
#[derive(Debug, Default)]
pub struct CrawlStats {
    counters: [AtomicUsize; OUTCOME_COUNT],
}

impl CrawlStats {
    pub fn record(&self, outcome: Outcome) {
        self.counters[outcome as usize].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.counters[outcome as usize].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_fetched: self.count(Outcome::PageFetched),
            depth_exceeded: self.count(Outcome::DepthExceeded),
            already_visited: self.count(Outcome::AlreadyVisited),
            pages_unavailable: self.count(Outcome::PageUnavailable),
            images_obtained: self.count(Outcome::ImageObtained),
            images_unavailable: self.count(Outcome::ImageUnavailable),
            transforms_applied: self.count(Outcome::TransformApplied),
            transforms_already_applied: self.count(Outcome::TransformAlreadyApplied),
            transforms_failed: self.count(Outcome::TransformFailed),
        }
    }
}

/// Plain copy of the counters at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub pages_fetched: usize,
    pub depth_exceeded: usize,
    pub already_visited: usize,
    pub pages_unavailable: usize,
    pub images_obtained: usize,
    pub images_unavailable: usize,
    pub transforms_applied: usize,
    pub transforms_already_applied: usize,
    pub transforms_failed: usize,
}

/// Result of a finished crawl.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub root: String,
    pub strategy: String,
    pub max_depth: usize,
    /// Sum of successful transform applications across the crawl
    pub images_transformed: usize,
    pub stats: StatsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let stats = CrawlStats::default();
        stats.record(Outcome::PageFetched);
        stats.record(Outcome::PageFetched);
        stats.record(Outcome::TransformFailed);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.pages_fetched, 2);
        assert_eq!(snapshot.transforms_failed, 1);
        assert_eq!(snapshot.already_visited, 0);
    }

    #[test]
    fn test_report_serializes() {
        let report = CrawlReport {
            root: "https://example.com/".into(),
            strategy: "sequential".into(),
            max_depth: 2,
            images_transformed: 3,
            stats: StatsSnapshot::default(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["images_transformed"], 3);
        assert_eq!(json["stats"]["pages_fetched"], 0);
    }
}
