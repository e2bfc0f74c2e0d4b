// src/sequence/split.rs
// =============================================================================
// SplitCursor: iterates a contiguous index range [index, fence) of a
// GrowableSequence and can split itself in two for divide-and-conquer work.
//
// try_split() hands back the lower half [index, mid) and keeps the upper
// half [mid, fence). The two halves never overlap and together cover the
// original range. A range with fewer than two elements does not split.
//
// The cursor borrows the sequence, so the sequence cannot change while any
// split cursor over it is alive.
// =============================================================================

use std::ops::Range;

use super::GrowableSequence;

/// Splittable cursor over a sub-range of a [`GrowableSequence`].
#[derive(Debug)]
pub struct SplitCursor<'a, E> {
    seq: &'a GrowableSequence<E>,
    index: usize,
    fence: usize,
}

impl<'a, E> SplitCursor<'a, E> {
    pub(crate) fn new(seq: &'a GrowableSequence<E>, index: usize, fence: usize) -> Self {
        Self { seq, index, fence }
    }

    /// Splits off the lower half of the remaining range.
    ///
    /// Returns `None` when fewer than two elements remain.
    pub fn try_split(&mut self) -> Option<SplitCursor<'a, E>> {
        let lo = self.index;
        let mid = lo + (self.fence - lo) / 2;
        if lo >= mid {
            return None;
        }
        self.index = mid;
        Some(SplitCursor::new(self.seq, lo, mid))
    }

    /// Number of elements not yet yielded.
    pub fn remaining(&self) -> usize {
        self.fence - self.index
    }

    /// Index range not yet yielded.
    pub fn range(&self) -> Range<usize> {
        self.index..self.fence
    }
}

impl<'a, E> Iterator for SplitCursor<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.fence {
            return None;
        }
        let element = self.seq.get(self.index).ok()?;
        self.index += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<E> ExactSizeIterator for SplitCursor<'_, E> {}
