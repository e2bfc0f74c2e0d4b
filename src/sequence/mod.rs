// src/sequence/mod.rs
// =============================================================================
// A growable, index-addressable sequence backed by one contiguous buffer.
//
// Submodules:
// - array: GrowableSequence itself (append, get/set, remove_at, add_all)
// - cursor: a detached cursor that detects outside modification
// - split: a splittable cursor for divide-and-conquer traversal
//
// The crawler stores page elements and the configured transforms in
// GrowableSequence, and the parallel strategy uses SplitCursor to hand
// halves of a page to separate tasks.
// =============================================================================

mod array;
mod cursor;
mod split;

pub use array::{GrowableSequence, IntoIter, Iter, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use cursor::Cursor;
pub use split::SplitCursor;
