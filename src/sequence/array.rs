// src/sequence/array.rs
// =============================================================================
// GrowableSequence<E>: a resizable array with explicit capacity management.
//
// Layout:
// - `buf` is the backing buffer; its length IS the capacity
// - slots [0, size) hold Some(element), slots [size, capacity) hold None
// - growth is geometric (x1.5), starting at DEFAULT_CAPACITY from empty
//
// Every structural change (append, add_all, remove_at) bumps a
// modification counter. Cursors remember the counter they last saw, so an
// outside change is reported on the cursor's next use.
//
// Rust concepts:
// - Generics: the sequence works for any element type E
// - Option<E> slots: removing an element moves it out and leaves None, so
//   the sequence never keeps a removed value alive
// - Result: bounds violations are returned, never panicked on
// =============================================================================

use std::fmt;

use super::{Cursor, SplitCursor};
use crate::error::SequenceError;

/// Capacity used the first time an empty sequence grows.
pub const DEFAULT_CAPACITY: usize = 10;

/// Largest capacity the sequence will ever request.
pub const MAX_CAPACITY: usize = isize::MAX as usize - 8;

// Size and modification count, kept private so only the sequence mutates them
#[derive(Debug, Clone, Copy, Default)]
struct SequenceState {
    size: usize,
    mod_count: usize,
}

/// A contiguous, growable, bounds-checked sequence.
#[derive(Clone)]
pub struct GrowableSequence<E> {
    buf: Vec<Option<E>>,
    state: SequenceState,
}

impl<E> GrowableSequence<E> {
    /// Creates an empty sequence. No buffer is allocated until the first append.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            state: SequenceState::default(),
        }
    }

    /// Creates an empty sequence with room for `capacity` elements.
    ///
    /// Fails with `InvalidCapacity` if `capacity` exceeds [`MAX_CAPACITY`],
    /// and with `CapacityOverflow` if the buffer cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, SequenceError> {
        if capacity > MAX_CAPACITY {
            return Err(SequenceError::InvalidCapacity {
                requested: capacity,
                max: MAX_CAPACITY,
            });
        }
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| SequenceError::CapacityOverflow)?;
        buf.resize_with(capacity, || None);
        Ok(Self {
            buf,
            state: SequenceState::default(),
        })
    }

    /// Builds a sequence holding the elements of `items`, in order.
    /// The capacity equals the number of elements.
    pub fn from_vec(items: Vec<E>) -> Self {
        let size = items.len();
        Self {
            buf: items.into_iter().map(Some).collect(),
            state: SequenceState { size, mod_count: 0 },
        }
    }

    pub fn len(&self) -> usize {
        self.state.size
    }

    pub fn is_empty(&self) -> bool {
        self.state.size == 0
    }

    /// Number of slots in the backing buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn mod_count(&self) -> usize {
        self.state.mod_count
    }

    /// Appends `element` to the end, growing the buffer if needed.
    pub fn append(&mut self, element: E) -> Result<(), SequenceError> {
        let needed = self
            .state
            .size
            .checked_add(1)
            .ok_or(SequenceError::CapacityOverflow)?;
        self.ensure_capacity(needed)?;
        self.buf[self.state.size] = Some(element);
        self.state.size += 1;
        self.state.mod_count += 1;
        Ok(())
    }

    /// Appends every element of `items` in iteration order.
    ///
    /// The buffer grows once for the whole batch. Returns true if anything
    /// was added.
    pub fn add_all<I>(&mut self, items: I) -> Result<bool, SequenceError>
    where
        I: IntoIterator<Item = E>,
    {
        // Materialize first so the capacity is known up front
        let batch: Vec<E> = items.into_iter().collect();
        if batch.is_empty() {
            return Ok(false);
        }
        let needed = self
            .state
            .size
            .checked_add(batch.len())
            .ok_or(SequenceError::CapacityOverflow)?;
        self.ensure_capacity(needed)?;

        for (slot, element) in self.buf[self.state.size..needed].iter_mut().zip(batch) {
            *slot = Some(element);
        }
        self.state.size = needed;
        self.state.mod_count += 1;
        Ok(true)
    }

    /// Moves all elements of `other` to the end of this sequence.
    pub fn append_sequence(&mut self, other: GrowableSequence<E>) -> Result<bool, SequenceError> {
        self.add_all(other)
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<&E, SequenceError> {
        self.range_check(index)?;
        self.buf[index].as_ref().ok_or(SequenceError::IndexOutOfRange {
            index,
            len: self.state.size,
        })
    }

    /// Replaces the element at `index` and returns the previous one.
    pub fn set(&mut self, index: usize, element: E) -> Result<E, SequenceError> {
        self.range_check(index)?;
        let len = self.state.size;
        self.buf[index]
            .replace(element)
            .ok_or(SequenceError::IndexOutOfRange { index, len })
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// one position to the left.
    pub fn remove_at(&mut self, index: usize) -> Result<E, SequenceError> {
        self.range_check(index)?;
        let len = self.state.size;
        let removed = self.buf[index]
            .take()
            .ok_or(SequenceError::IndexOutOfRange { index, len })?;

        // The emptied slot travels to the old last position
        self.buf[index..len].rotate_left(1);
        self.state.size -= 1;
        self.state.mod_count += 1;
        Ok(removed)
    }

    /// Position of the first element equal to `target`.
    pub fn index_of(&self, target: &E) -> Option<usize>
    where
        E: PartialEq,
    {
        self.iter().position(|e| e == target)
    }

    /// Replaces every element with `f(element)`.
    pub fn replace_all<F>(&mut self, mut f: F)
    where
        F: FnMut(E) -> E,
    {
        for slot in &mut self.buf[..self.state.size] {
            if let Some(value) = slot.take() {
                *slot = Some(f(value));
            }
        }
    }

    /// Copies the elements into a fresh Vec the caller owns.
    pub fn to_vec(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Borrowing iterator over the elements in order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            inner: self.buf[..self.state.size].iter(),
        }
    }

    /// A detached cursor positioned before the first element.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.state.mod_count)
    }

    /// A split cursor covering `[0, len)`.
    pub fn split_cursor(&self) -> SplitCursor<'_, E> {
        SplitCursor::new(self, 0, self.state.size)
    }

    fn range_check(&self, index: usize) -> Result<(), SequenceError> {
        if index >= self.state.size {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.state.size,
            });
        }
        Ok(())
    }

    fn ensure_capacity(&mut self, min_capacity: usize) -> Result<(), SequenceError> {
        let min_capacity = if self.buf.is_empty() {
            min_capacity.max(DEFAULT_CAPACITY)
        } else {
            min_capacity
        };
        if min_capacity > self.buf.len() {
            self.grow(min_capacity)?;
        }
        Ok(())
    }

    fn grow(&mut self, min_capacity: usize) -> Result<(), SequenceError> {
        let old_capacity = self.buf.len();
        let mut new_capacity = old_capacity.saturating_add(old_capacity >> 1);
        if new_capacity < min_capacity {
            new_capacity = min_capacity;
        }
        if new_capacity > MAX_CAPACITY {
            new_capacity = huge_capacity(min_capacity)?;
        }
        // Reserve first: resize_with would panic where this reports an error
        self.buf
            .try_reserve_exact(new_capacity.saturating_sub(old_capacity))
            .map_err(|_| SequenceError::CapacityOverflow)?;
        self.buf.resize_with(new_capacity, || None);
        Ok(())
    }
}

fn huge_capacity(min_capacity: usize) -> Result<usize, SequenceError> {
    if min_capacity > MAX_CAPACITY {
        Err(SequenceError::CapacityOverflow)
    } else {
        Ok(MAX_CAPACITY)
    }
}

impl<E> Default for GrowableSequence<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for GrowableSequence<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<E: PartialEq> PartialEq for GrowableSequence<E> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<E> FromIterator<E> for GrowableSequence<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<E> From<Vec<E>> for GrowableSequence<E> {
    fn from(items: Vec<E>) -> Self {
        Self::from_vec(items)
    }
}

/// Borrowing iterator returned by [`GrowableSequence::iter`].
pub struct Iter<'a, E> {
    inner: std::slice::Iter<'a, Option<E>>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, E> IntoIterator for &'a GrowableSequence<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator returned by `GrowableSequence::into_iter`.
pub struct IntoIter<E> {
    inner: std::iter::Take<std::vec::IntoIter<Option<E>>>,
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(|slot| slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> IntoIterator for GrowableSequence<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        let size = self.state.size;
        IntoIter {
            inner: self.buf.into_iter().take(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::rc::Rc;

    #[test]
    fn test_new_is_empty_without_buffer() {
        let seq: GrowableSequence<i32> = GrowableSequence::new();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.capacity(), 0);
    }

    #[test]
    fn test_first_append_uses_default_capacity() {
        let mut seq = GrowableSequence::new();
        seq.append("a").unwrap();
        assert_eq!(seq.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_growth_is_one_and_a_half() {
        let mut seq = GrowableSequence::with_capacity(10).unwrap();
        for i in 0..11 {
            seq.append(i).unwrap();
        }
        assert_eq!(seq.capacity(), 15);
    }

    #[test]
    fn test_zero_capacity_grows_to_default() {
        let mut seq = GrowableSequence::with_capacity(0).unwrap();
        seq.append(1).unwrap();
        assert_eq!(seq.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_invalid_capacity_rejected() {
        let err = GrowableSequence::<u8>::with_capacity(MAX_CAPACITY + 1).unwrap_err();
        assert!(matches!(err, SequenceError::InvalidCapacity { .. }));
    }

    #[test]
    fn test_max_capacity_reports_overflow() {
        let err = GrowableSequence::<u64>::with_capacity(MAX_CAPACITY).unwrap_err();
        assert_eq!(err, SequenceError::CapacityOverflow);
    }

    #[test]
    fn test_huge_capacity_overflow() {
        assert_eq!(huge_capacity(MAX_CAPACITY), Ok(MAX_CAPACITY));
        assert_eq!(
            huge_capacity(MAX_CAPACITY + 1),
            Err(SequenceError::CapacityOverflow)
        );
    }

    #[test]
    fn test_get_out_of_range() {
        let seq: GrowableSequence<i32> = vec![1, 2].into();
        assert_eq!(
            seq.get(2),
            Err(SequenceError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_set_returns_previous() {
        let mut seq: GrowableSequence<&str> = vec!["a", "b"].into();
        assert_eq!(seq.set(1, "c"), Ok("b"));
        assert_eq!(seq.to_vec(), vec!["a", "c"]);
        assert!(seq.set(5, "x").is_err());
    }

    #[test]
    fn test_remove_shifts_and_shrinks() {
        let mut seq: GrowableSequence<i32> = vec![1, 2, 3, 4].into();
        assert_eq!(seq.remove_at(1), Ok(2));
        assert_eq!(seq.to_vec(), vec![1, 3, 4]);
        assert_eq!(seq.len(), 3);
        assert!(seq.get(3).is_err());
    }

    #[test]
    fn test_remove_releases_element() {
        let shared = Rc::new(5);
        let mut seq = GrowableSequence::new();
        seq.append(Rc::clone(&shared)).unwrap();
        seq.append(Rc::new(6)).unwrap();
        assert_eq!(Rc::strong_count(&shared), 2);

        seq.remove_at(0).unwrap();
        // Only our handle is left; the vacated slot holds nothing
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn test_add_all_grows_once() {
        let mut seq = GrowableSequence::new();
        seq.append(0).unwrap();
        assert!(seq.add_all(1..=30).unwrap());
        assert_eq!(seq.len(), 31);
        assert_eq!(seq.capacity(), 31);
        assert!(!seq.add_all(Vec::new()).unwrap());
    }

    #[test]
    fn test_append_sequence_keeps_order() {
        let mut left: GrowableSequence<i32> = vec![1, 2].into();
        let right: GrowableSequence<i32> = vec![3, 4].into();
        left.append_sequence(right).unwrap();
        assert_eq!(left.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_index_of_and_replace_all() {
        let mut seq: GrowableSequence<i32> = (1..=4).collect();
        assert_eq!(seq.index_of(&3), Some(2));
        assert_eq!(seq.index_of(&9), None);
        seq.replace_all(|x| x * 10);
        assert_eq!(seq.to_vec(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_into_iter_stops_at_size() {
        let mut seq = GrowableSequence::with_capacity(8).unwrap();
        seq.add_all(["x", "y"]).unwrap();
        let collected: Vec<_> = seq.into_iter().collect();
        assert_eq!(collected, vec!["x", "y"]);
    }

    proptest! {
        #[test]
        fn prop_append_then_get(items in proptest::collection::vec(any::<i64>(), 0..200)) {
            let mut seq = GrowableSequence::new();
            for item in &items {
                seq.append(*item).unwrap();
            }
            prop_assert_eq!(seq.len(), items.len());
            prop_assert!(seq.capacity() >= seq.len());
            for (i, item) in items.iter().enumerate() {
                prop_assert_eq!(seq.get(i).unwrap(), item);
            }
        }

        #[test]
        fn prop_remove_at_shifts_down(
            items in proptest::collection::vec(any::<u16>(), 1..100),
            pick in any::<prop::sample::Index>(),
        ) {
            let index = pick.index(items.len());
            let mut seq: GrowableSequence<u16> = items.clone().into();
            let removed = seq.remove_at(index).unwrap();

            let mut expected = items.clone();
            prop_assert_eq!(removed, expected.remove(index));
            prop_assert_eq!(seq.to_vec(), expected);
            prop_assert!(seq.get(items.len() - 1).is_err());
        }
    }
}
