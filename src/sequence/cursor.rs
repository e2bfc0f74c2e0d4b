// src/sequence/cursor.rs
// =============================================================================
// A forward cursor over a GrowableSequence that does NOT hold a borrow.
//
// The normal `iter()` borrows the sequence, so the compiler already stops
// anyone from modifying it mid-iteration. The cursor is for the other case:
// walking a sequence while deleting some of its elements. Each call takes
// the sequence as an argument, so the cursor checks the sequence's
// modification counter and reports a change made behind its back.
//
// Rules:
// - next() yields the element at the current position
// - remove() deletes the element next() just yielded (once per next())
// - any other structural change => ConcurrentModification on next use
// =============================================================================

use super::GrowableSequence;
use crate::error::SequenceError;

/// Detached forward cursor created by [`GrowableSequence::cursor`].
///
/// A cursor must only be used with the sequence that created it.
#[derive(Debug, Clone)]
pub struct Cursor {
    // Index of the next element to yield
    position: usize,
    // Index of the element last yielded; None until next() or after remove()
    last_returned: Option<usize>,
    expected_mod_count: usize,
}

impl Cursor {
    pub(crate) fn new(mod_count: usize) -> Self {
        Self {
            position: 0,
            last_returned: None,
            expected_mod_count: mod_count,
        }
    }

    /// True if `next` would yield another element.
    pub fn has_next<E>(&self, seq: &GrowableSequence<E>) -> bool {
        self.position < seq.len()
    }

    /// Yields the next element, or `None` at the end.
    pub fn next<'a, E>(
        &mut self,
        seq: &'a GrowableSequence<E>,
    ) -> Result<Option<&'a E>, SequenceError> {
        self.check_for_modification(seq)?;
        if self.position >= seq.len() {
            return Ok(None);
        }
        let element = seq.get(self.position)?;
        self.last_returned = Some(self.position);
        self.position += 1;
        Ok(Some(element))
    }

    /// Removes the element most recently yielded by `next`.
    pub fn remove<E>(&mut self, seq: &mut GrowableSequence<E>) -> Result<E, SequenceError> {
        let index = self.last_returned.ok_or(SequenceError::IllegalState)?;
        self.check_for_modification(seq)?;

        let removed = seq
            .remove_at(index)
            .map_err(|_| SequenceError::ConcurrentModification)?;
        self.position = index;
        self.last_returned = None;
        self.expected_mod_count = seq.mod_count();
        Ok(removed)
    }

    fn check_for_modification<E>(&self, seq: &GrowableSequence<E>) -> Result<(), SequenceError> {
        if seq.mod_count() != self.expected_mod_count {
            return Err(SequenceError::ConcurrentModification);
        }
        Ok(())
    }
}
