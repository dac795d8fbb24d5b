use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Index, IndexMut};

use log::trace;

use super::indexer::CircularIndexer;
use super::iter::{Cursor, IntoIter, Iter, IterMut};
use crate::error::{Result, RingBufferError};

type Indexer<const N: usize> = CircularIndexer<N>;

/// Fixed-capacity circular buffer holding up to `N` elements inline.
///
/// Pushing onto a full buffer never fails: `push_back` evicts the oldest
/// element and `push_front` evicts the newest one. The logical sequence runs
/// from the oldest element (physical slot `head`) to the newest one; the next
/// back-insertion slot (`tail`) is always derived from `head` and the
/// element count.
pub struct RingBuffer<T, const N: usize> {
    head: usize,
    items: usize,
    buffer: [T; N],
}

impl<T, const N: usize> RingBuffer<T, N> {
    pub const CAPACITY: usize = N;

    const NON_ZERO_CAPACITY: () = assert!(N > 0, "ring buffer capacity must be non-zero");

    pub const fn capacity(&self) -> usize {
        N
    }

    pub const fn len(&self) -> usize {
        self.items
    }

    pub const fn is_empty(&self) -> bool {
        self.items == 0
    }

    pub const fn is_full(&self) -> bool {
        self.items == N
    }

    /// Physical slot of the oldest element.
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Physical slot one past the newest element. Equal to `head` when full.
    pub const fn tail(&self) -> usize {
        Indexer::<N>::offset(self.head, self.items)
    }

    pub fn push_back(&mut self, value: T) {
        let tail = self.tail();
        self.buffer[tail] = value;

        if self.is_full() {
            trace!("push_back: evicted oldest element at slot {tail}");
            self.head = Indexer::<N>::increment(self.head);
        } else {
            self.items += 1;
        }

        self.log_state("push_back");
    }

    pub fn push_front(&mut self, value: T) {
        // when full, the slot before head is the newest element
        self.head = Indexer::<N>::decrement(self.head);

        if self.is_full() {
            trace!("push_front: evicted newest element at slot {}", self.head);
        } else {
            self.items += 1;
        }

        self.buffer[self.head] = value;
        self.log_state("push_front");
    }

    pub fn front(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }
        Ok(&self.buffer[self.head])
    }

    pub fn back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }
        Ok(&self.buffer[self.last_slot()])
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }
        Ok(&mut self.buffer[self.head])
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }
        let slot = self.last_slot();
        Ok(&mut self.buffer[slot])
    }

    /// Element at logical position `index`, counted from the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        (index < self.items).then(|| &self.buffer[Indexer::<N>::offset(self.head, index)])
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.items {
            return None;
        }
        Some(&mut self.buffer[Indexer::<N>::offset(self.head, index)])
    }

    /// Raw access to physical slot `index`, ignoring `head` and the element
    /// count. Slots outside the logical window hold stale values.
    pub fn slot(&self, index: usize) -> Result<&T> {
        self.buffer
            .get(index)
            .ok_or(RingBufferError::OutOfRange { index, capacity: N })
    }

    pub fn slot_mut(&mut self, index: usize) -> Result<&mut T> {
        self.buffer
            .get_mut(index)
            .ok_or(RingBufferError::OutOfRange { index, capacity: N })
    }

    /// Logical reset. Stored values are left in place until overwritten.
    pub fn clear(&mut self) {
        self.head = 0;
        self.items = 0;
        self.log_state("clear");
    }

    /// The logical sequence as two physical runs, oldest run first. The
    /// second slice is empty unless the contents wrap around the end of
    /// storage.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let end = self.head + self.items;
        if end <= N {
            (&self.buffer[self.head..end], &[])
        } else {
            (&self.buffer[self.head..], &self.buffer[..end - N])
        }
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let end = self.head + self.items;
        let (wrapped, from_head) = self.buffer.split_at_mut(self.head);
        if end <= N {
            (&mut from_head[..self.items], &mut [])
        } else {
            (from_head, &mut wrapped[..end - N])
        }
    }

    /// Iterates from oldest to newest. Use `.rev()` for newest to oldest.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(&self.buffer, self.head, self.items)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (older, newer) = self.as_mut_slices();
        IterMut::new(older, newer)
    }

    /// Cursor positioned on the oldest element.
    pub fn cursor_front(&self) -> Cursor<'_, T, N> {
        Cursor::new(&self.buffer, self.head, self.items, 0)
    }

    /// Cursor positioned one past the newest element.
    pub fn cursor_end(&self) -> Cursor<'_, T, N> {
        Cursor::new(&self.buffer, self.head, self.items, self.items)
    }

    fn last_slot(&self) -> usize {
        Indexer::<N>::decrement(self.tail())
    }

    #[cfg(feature = "log_state")]
    fn log_state(&self, op: &str) {
        trace!(
            "{op}: head={} size={} tail={}",
            self.head,
            self.items,
            self.tail()
        );
    }

    #[cfg(not(feature = "log_state"))]
    #[inline(always)]
    fn log_state(&self, _op: &str) {}
}

impl<T: Default, const N: usize> RingBuffer<T, N> {
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_ZERO_CAPACITY;

        Self {
            head: 0,
            items: 0,
            buffer: std::array::from_fn(|_| T::default()),
        }
    }

    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }

        let value = mem::take(&mut self.buffer[self.head]);
        self.head = Indexer::<N>::increment(self.head);
        self.items -= 1;
        self.log_state("pop_front");
        Ok(value)
    }

    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }

        let slot = self.last_slot();
        let value = mem::take(&mut self.buffer[slot]);
        self.items -= 1;
        self.log_state("pop_back");
        Ok(value)
    }

    /// Like [`pop_front`](Self::pop_front), but yields `T::default()` on an
    /// empty buffer. A default value is indistinguishable from a stored one,
    /// so check [`is_empty`](Self::is_empty) first when that matters.
    pub fn pop_front_or_default(&mut self) -> T {
        self.pop_front().unwrap_or_default()
    }

    pub fn pop_back_or_default(&mut self) -> T {
        self.pop_back().unwrap_or_default()
    }
}

impl<T: Clone + Default, const N: usize> RingBuffer<T, N> {
    pub fn front_or_default(&self) -> T {
        self.front().cloned().unwrap_or_default()
    }

    pub fn back_or_default(&self) -> T {
        self.back().cloned().unwrap_or_default()
    }
}

impl<T: Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

// Copies are laid out from slot 0 in logical order, whatever the source's
// wrap state.
impl<T: Clone + Default, const N: usize> Clone for RingBuffer<T, N> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T: Default, const N: usize> FromIterator<T> for RingBuffer<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl<T: Default, const N: usize, const M: usize> From<[T; M]> for RingBuffer<T, N> {
    fn from(values: [T; M]) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> Extend<T> for RingBuffer<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, const N: usize> Extend<&'a T> for RingBuffer<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.push_back(value);
        }
    }
}

/// Physical slot access. Panics when `index >= N`; see [`RingBuffer::slot`]
/// for the fallible form.
impl<T, const N: usize> Index<usize> for RingBuffer<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.buffer[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for RingBuffer<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.buffer[index]
    }
}

impl<T, U, const N: usize, const M: usize> PartialEq<RingBuffer<U, M>> for RingBuffer<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &RingBuffer<U, M>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, const N: usize> Eq for RingBuffer<T, N> {}

impl<T, U, const N: usize> PartialEq<[U]> for RingBuffer<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T, U, const N: usize, const M: usize> PartialEq<[U; M]> for RingBuffer<T, N>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; M]) -> bool {
        *self == other[..]
    }
}

impl<T: Hash, const N: usize> Hash for RingBuffer<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.iter().for_each(|value| value.hash(state));
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a RingBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut RingBuffer<T, N> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Default, const N: usize> IntoIterator for RingBuffer<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped() -> RingBuffer<u32, 4> {
        // head ends up at slot 2: [3, 4, 1, 2] stored as [1, 2, 3, 4]
        let mut buf = RingBuffer::new();
        buf.extend([0, 0, 3, 4]);
        buf.pop_front().unwrap();
        buf.pop_front().unwrap();
        buf.push_back(1);
        buf.push_back(2);
        buf
    }

    #[test]
    fn new_buffer_is_empty() {
        let buf = RingBuffer::<u8, 3>::new();
        assert!(buf.is_empty());
        assert!(!buf.is_full());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 3);
        assert_eq!(RingBuffer::<u8, 3>::CAPACITY, 3);
        assert_eq!(buf.head(), 0);
        assert_eq!(buf.tail(), 0);
    }

    #[test]
    fn tail_is_derived_from_head_and_len() {
        let mut buf = RingBuffer::<u8, 4>::new();
        buf.extend([1, 2, 3]);
        assert_eq!(buf.tail(), 3);
        buf.push_back(4);
        assert!(buf.is_full());
        assert_eq!(buf.tail(), buf.head());
        buf.push_back(5);
        assert_eq!(buf.head(), 1);
        assert_eq!(buf.tail(), 1);
    }

    #[test]
    fn push_back_evicts_oldest_when_full() {
        let mut buf = RingBuffer::<u8, 4>::new();
        buf.extend([1, 2, 3, 4, 5]);
        assert_eq!(buf, [2, 3, 4, 5]);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn push_front_when_not_full_grows() {
        let mut buf = RingBuffer::<u8, 4>::new();
        buf.push_front(1);
        buf.push_front(2);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf, [2, 1]);
        assert_eq!(buf.head(), 2);
    }

    #[test]
    fn push_front_evicts_newest_when_full() {
        let mut buf = RingBuffer::<u8, 3>::from([1, 2, 3]);
        buf.push_front(9);
        assert_eq!(buf, [9, 1, 2]);
        assert!(buf.is_full());
    }

    #[test]
    fn front_and_back() {
        let buf = wrapped();
        assert_eq!(buf.front(), Ok(&3));
        assert_eq!(buf.back(), Ok(&2));
    }

    #[test]
    fn front_mut_and_back_mut() {
        let mut buf = wrapped();
        *buf.front_mut().unwrap() = 30;
        *buf.back_mut().unwrap() = 20;
        assert_eq!(buf, [30, 4, 1, 20]);
    }

    #[test]
    fn empty_peek_and_pop_fail() {
        let mut buf = RingBuffer::<u8, 2>::new();
        assert_eq!(buf.front(), Err(RingBufferError::Empty));
        assert_eq!(buf.back(), Err(RingBufferError::Empty));
        assert_eq!(buf.front_mut().err(), Some(RingBufferError::Empty));
        assert_eq!(buf.back_mut().err(), Some(RingBufferError::Empty));
        assert_eq!(buf.pop_front(), Err(RingBufferError::Empty));
        assert_eq!(buf.pop_back(), Err(RingBufferError::Empty));
    }

    #[test]
    fn or_default_on_empty_leaves_state_alone() {
        let mut buf = RingBuffer::<i32, 2>::from([7]);
        buf.pop_front().unwrap();
        let head = buf.head();

        assert_eq!(buf.pop_front_or_default(), 0);
        assert_eq!(buf.pop_back_or_default(), 0);
        assert_eq!(buf.front_or_default(), 0);
        assert_eq!(buf.back_or_default(), 0);
        assert_eq!(buf.head(), head);
        assert!(buf.is_empty());
    }

    #[test]
    fn or_default_on_non_empty_returns_values() {
        let mut buf = RingBuffer::<i32, 3>::from([4, 5, 6]);
        assert_eq!(buf.front_or_default(), 4);
        assert_eq!(buf.back_or_default(), 6);
        assert_eq!(buf.pop_back_or_default(), 6);
        assert_eq!(buf.pop_front_or_default(), 4);
        assert_eq!(buf, [5]);
    }

    #[test]
    fn pop_moves_value_out() {
        let mut buf = RingBuffer::<String, 2>::new();
        buf.push_back("a".to_string());
        buf.push_back("b".to_string());
        assert_eq!(buf.pop_front().unwrap(), "a");
        assert_eq!(buf.pop_back().unwrap(), "b");
        assert!(buf.is_empty());
        assert_eq!(buf[0], "");
    }

    #[test]
    fn logical_get_follows_wrap() {
        let mut buf = wrapped();
        assert_eq!(buf.get(0), Some(&3));
        assert_eq!(buf.get(3), Some(&2));
        assert_eq!(buf.get(4), None);
        *buf.get_mut(2).unwrap() = 11;
        assert_eq!(buf, [3, 4, 11, 2]);
        assert!(buf.get_mut(4).is_none());
    }

    #[test]
    fn physical_slot_access() {
        let mut buf = wrapped();
        assert_eq!(buf.head(), 2);
        assert_eq!(buf[0], 1);
        assert_eq!(buf[2], 3);
        assert_eq!(buf.slot(1), Ok(&2));
        assert_eq!(
            buf.slot(4),
            Err(RingBufferError::OutOfRange { index: 4, capacity: 4 })
        );
        *buf.slot_mut(3).unwrap() = 40;
        buf[0] = 10;
        assert_eq!(buf, [3, 40, 10, 2]);
        assert!(buf.slot_mut(7).is_err());
    }

    #[test]
    #[should_panic]
    fn index_past_capacity_panics() {
        let buf = RingBuffer::<u8, 4>::new();
        let _ = buf[4];
    }

    #[test]
    fn clear_resets_indices() {
        let mut buf = wrapped();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.head(), 0);
        assert_eq!(buf.tail(), 0);
        buf.push_back(8);
        assert_eq!(buf, [8]);
    }

    #[test]
    fn slices_split_at_wrap() {
        let mut buf = wrapped();
        assert_eq!(buf.as_slices(), (&[3, 4][..], &[1, 2][..]));

        let (older, newer) = buf.as_mut_slices();
        older[0] = 13;
        newer[1] = 12;
        assert_eq!(buf, [13, 4, 1, 12]);

        let contiguous = RingBuffer::<u8, 4>::from([1, 2]);
        assert_eq!(contiguous.as_slices(), (&[1, 2][..], &[][..]));

        let empty = RingBuffer::<u8, 4>::new();
        assert_eq!(empty.as_slices(), (&[][..], &[][..]));
    }

    #[test]
    fn clone_relayouts_from_slot_zero() {
        let buf = wrapped();
        let copy = buf.clone();
        assert_eq!(copy, buf);
        assert_eq!(copy.head(), 0);
        assert_eq!(copy[0], 3);
    }

    #[test]
    fn clone_from_replaces_contents() {
        let source = wrapped();
        let mut dest = RingBuffer::<u32, 4>::from([9, 9]);
        dest.clone_from(&source);
        assert_eq!(dest, [3, 4, 1, 2]);
        assert_eq!(dest.head(), 0);
    }

    #[test]
    fn equality_ignores_wrap_state_and_capacity() {
        let a = wrapped();
        let b = RingBuffer::<u32, 4>::from([3, 4, 1, 2]);
        let c = RingBuffer::<u32, 8>::from([3, 4, 1, 2]);
        assert_ne!(a.head(), b.head());
        assert_eq!(a, b);
        assert!(a == c);

        let shorter = RingBuffer::<u32, 4>::from([3, 4, 1]);
        assert_ne!(a, shorter);
    }

    #[test]
    fn from_array_longer_than_capacity_keeps_newest() {
        let buf = RingBuffer::<u8, 3>::from([1, 2, 3, 4, 5]);
        assert_eq!(buf, [3, 4, 5]);
    }

    #[test]
    fn extend_by_reference() {
        let mut buf = RingBuffer::<u8, 3>::new();
        buf.extend(&[1, 2]);
        buf.extend([3, 4].iter());
        assert_eq!(buf, [2, 3, 4]);
    }

    #[test]
    fn debug_lists_logical_order() {
        assert_eq!(format!("{:?}", wrapped()), "[3, 4, 1, 2]");
    }

    #[test]
    fn single_slot_buffer() {
        let mut buf = RingBuffer::<u8, 1>::new();
        buf.push_back(1);
        buf.push_back(2);
        assert_eq!(buf, [2]);
        buf.push_front(3);
        assert_eq!(buf, [3]);
        assert_eq!(buf.pop_back(), Ok(3));
        assert!(buf.is_empty());
    }
}
