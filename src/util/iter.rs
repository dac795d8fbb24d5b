use std::iter::FusedIterator;
use std::{fmt, ptr, slice};

use super::indexer::CircularIndexer;
use super::ringbuf::RingBuffer;

/// Borrowing iterator over a [`RingBuffer`], oldest to newest.
///
/// Keeps the buffer's `head` and walks logical offsets from both ends; each
/// offset maps to physical slot `(head + offset) % N`.
pub struct Iter<'a, T, const N: usize> {
    buffer: &'a [T; N],
    head: usize,
    front: usize,
    back: usize,
}

impl<'a, T, const N: usize> Iter<'a, T, N> {
    pub(super) fn new(buffer: &'a [T; N], head: usize, len: usize) -> Self {
        Self {
            buffer,
            head,
            front: 0,
            back: len,
        }
    }

    fn at(&self, offset: usize) -> &'a T {
        &self.buffer[CircularIndexer::<N>::offset(self.head, offset)]
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }

        let item = self.at(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<'a, T, const N: usize> DoubleEndedIterator for Iter<'a, T, N> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        Some(self.at(self.back))
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}

impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            head: self.head,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Iter<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutable iterator over a [`RingBuffer`], oldest to newest.
pub struct IterMut<'a, T> {
    older: slice::IterMut<'a, T>,
    newer: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(older: &'a mut [T], newer: &'a mut [T]) -> Self {
        Self {
            older: older.iter_mut(),
            newer: newer.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.older.next().or_else(|| self.newer.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.older.len() + self.newer.len();
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.newer.next_back().or_else(|| self.older.next_back())
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that drains a [`RingBuffer`] from either end.
pub struct IntoIter<T, const N: usize> {
    buffer: RingBuffer<T, N>,
}

impl<T, const N: usize> IntoIter<T, N> {
    pub(super) fn new(buffer: RingBuffer<T, N>) -> Self {
        Self { buffer }
    }
}

impl<T: Default, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buffer.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.buffer.len(), Some(self.buffer.len()))
    }
}

impl<T: Default, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        self.buffer.pop_back().ok()
    }
}

impl<T: Default, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T: Default, const N: usize> FusedIterator for IntoIter<T, N> {}

/// Bidirectional position within a [`RingBuffer`].
///
/// Offset 0 is the oldest element and offset `len` is the end position, which
/// has no element. Moving never clamps: stepping back from the oldest element
/// lands on a position before it, and stepping forward again returns to the
/// oldest element. `current` is `None` everywhere outside `0..len`.
///
/// Two cursors compare equal when they view the same storage from the same
/// `head` at the same offset.
pub struct Cursor<'a, T, const N: usize> {
    buffer: &'a [T; N],
    head: usize,
    len: usize,
    offset: usize,
}

impl<'a, T, const N: usize> Cursor<'a, T, N> {
    pub(super) fn new(buffer: &'a [T; N], head: usize, len: usize, offset: usize) -> Self {
        Self {
            buffer,
            head,
            len,
            offset,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn current(&self) -> Option<&'a T> {
        if self.offset >= self.len {
            return None;
        }
        Some(&self.buffer[CircularIndexer::<N>::offset(self.head, self.offset)])
    }

    pub fn move_next(&mut self) {
        self.offset = self.offset.wrapping_add(1);
    }

    pub fn move_prev(&mut self) {
        self.offset = self.offset.wrapping_sub(1);
    }
}

impl<T, const N: usize> Clone for Cursor<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Cursor<'_, T, N> {}

impl<T, const N: usize> PartialEq for Cursor<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.buffer, other.buffer)
            && self.head == other.head
            && self.offset == other.offset
    }
}

impl<T, const N: usize> Eq for Cursor<'_, T, N> {}

impl<T, const N: usize> fmt::Debug for Cursor<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("head", &self.head)
            .field("len", &self.len)
            .field("offset", &self.offset)
            .finish()
    }
}
