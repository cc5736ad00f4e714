use crate::{RingBuffer, Storage, DEFAULT_CAPACITY, MIN_CAPACITY};

impl<const N: usize> crate::sealed::StorageBase for [u8; N] {}

impl<const N: usize> Storage for [u8; N] {
    fn len(&self) -> usize {
        N
    }

    fn as_slice(&self) -> &[u8] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

/// A ring buffer backed by an array `[u8; N]`.
///
/// This implementation is used when the `hybrid-array` feature is **disabled**.
pub type StackBuffer<const N: usize> = RingBuffer<[u8; N]>;

/// A [`StackBuffer`] with [`DEFAULT_CAPACITY`] slots.
pub type DefaultBuffer = StackBuffer<DEFAULT_CAPACITY>;

impl<const N: usize> StackBuffer<N> {
    /// Creates an empty, zeroed buffer with capacity `N`, holding at most `N - 1` bytes.
    ///
    /// This is a `const fn`, so the buffer can be placed in a `static`.
    ///
    /// # Panics
    ///
    /// Panics if `N` is less than 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_ring::StackBuffer;
    ///
    /// let buf: StackBuffer<128> = StackBuffer::new();
    /// assert_eq!(buf.capacity(), 128);
    /// assert_eq!(buf.available_space(), 127);
    /// ```
    pub const fn new() -> Self {
        assert!(N >= MIN_CAPACITY, "ring buffer capacity must be at least 2");
        Self {
            bytes: [0u8; N],
            front: 0,
            rear: 0,
        }
    }
}

impl<const N: usize> Default for StackBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
