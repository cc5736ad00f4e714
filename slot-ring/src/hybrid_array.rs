use crate::{RingBuffer, Storage, MIN_CAPACITY};
use ::hybrid_array::sizes::U50;
use ::hybrid_array::Array;

pub use ::hybrid_array::ArraySize;

impl<N: ArraySize> crate::sealed::StorageBase for Array<u8, N> {}

impl<N: ArraySize> Storage for Array<u8, N> {
    fn len(&self) -> usize {
        N::to_usize()
    }

    fn as_slice(&self) -> &[u8] {
        self.as_slice()
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

/// A ring buffer backed by `hybrid_array::Array`.
///
/// This implementation is used when the `hybrid-array` feature is **enabled**.
/// It allows for type-level sizes (e.g., `U10`) compatible with `hybrid-array` & `typenum`.
pub type StackBuffer<N> = RingBuffer<Array<u8, N>>;

/// A [`StackBuffer`] with [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) slots.
pub type DefaultBuffer = StackBuffer<U50>;

impl<N: ArraySize> StackBuffer<N> {
    /// Creates an empty, zeroed buffer holding at most `N - 1` bytes.
    ///
    /// # Panics
    ///
    /// Panics if the array size is less than 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_ring::StackBuffer;
    /// use hybrid_array::sizes::U128;
    ///
    /// let buf: StackBuffer<U128> = StackBuffer::new();
    /// assert_eq!(buf.capacity(), 128);
    /// ```
    pub fn new() -> Self {
        assert!(
            N::to_usize() >= MIN_CAPACITY,
            "ring buffer capacity must be at least 2"
        );
        Self::with_storage(Array::default())
    }
}

impl<N: ArraySize> Default for StackBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
