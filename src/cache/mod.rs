// src/cache/mod.rs
// =============================================================================
// The two shared "memoization gates" of a crawl.
//
// - VisitedSet: page URIs that have been accepted for fetching
// - TransformCache: (image URL, transform name) pairs already attempted
//
// Both answer one question atomically: "was this key new?". If two tasks
// race on the same key, exactly one of them gets `true`.
//
// Rust concepts:
// - DashSet: a sharded concurrent HashSet; insert() is an atomic
//   test-and-insert, so no extra Mutex is needed
// =============================================================================

mod transform;
mod visited;

pub use transform::TransformCache;
pub use visited::VisitedSet;
