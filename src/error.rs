// src/error.rs
// =============================================================================
// Error types for the crawler library.
//
// Two families:
// - SequenceError: misuse of the GrowableSequence container (bad index,
//   bad capacity, cursor used after an outside modification, ...)
// - CrawlError: failures that stop a whole crawl (cancellation, unknown
//   strategy/transform names, config and cache file problems)
//
// Things like "page not found" or "image download failed" are NOT errors
// here. They are folded into a count of 0 and recorded in CrawlStats.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert a source error automatically
// =============================================================================

use thiserror::Error;

/// Errors reported by [`crate::sequence::GrowableSequence`] and its cursors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A requested initial capacity is larger than the sequence can ever hold.
    #[error("illegal capacity: {requested} (max {max})")]
    InvalidCapacity { requested: usize, max: usize },

    /// Growing would exceed the maximum representable capacity.
    #[error("sequence capacity exhausted")]
    CapacityOverflow,

    /// Index is not in `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The sequence was structurally modified outside the cursor.
    #[error("sequence was modified while a cursor was iterating it")]
    ConcurrentModification,

    /// `Cursor::remove` was called without a preceding yield.
    #[error("no element to remove: call next() first")]
    IllegalState,
}

/// Errors that abort a crawl.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// The process-wide cancellation signal was raised.
    #[error("crawl cancelled")]
    Cancelled,

    #[error("unknown crawl strategy '{0}'")]
    UnknownStrategy(String),

    #[error("unknown transform '{0}'")]
    UnknownTransform(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persistent transform cache file could not be read or written.
    #[error("cache file format error: {0}")]
    CacheFormat(#[from] serde_json::Error),

    /// A spawned crawl task panicked.
    #[error("crawl task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

impl CrawlError {
    /// True when the error is the cancellation outcome rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CrawlError::Cancelled)
    }
}

/// Result alias used across the crawl modules.
pub type Result<T, E = CrawlError> = std::result::Result<T, E>;
