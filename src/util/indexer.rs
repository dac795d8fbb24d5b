/// Index arithmetic modulo `N` for a ring of `N` physical slots.
pub struct CircularIndexer<const N: usize>;

impl<const N: usize> CircularIndexer<N> {
    #[inline(always)]
    pub const fn increment(index: usize) -> usize {
        (index + 1) % N
    }

    #[inline(always)]
    pub const fn decrement(index: usize) -> usize {
        (index + N - 1) % N
    }

    /// Physical slot of the element `offset` positions after `head`.
    #[inline(always)]
    pub const fn offset(head: usize, offset: usize) -> usize {
        (head + offset) % N
    }
}
