use crate::{RingBuffer, Storage};
use alloc::vec;
use alloc::vec::Vec;

impl crate::sealed::StorageBase for Vec<u8> {}

impl Storage for Vec<u8> {
    fn len(&self) -> usize {
        self.len()
    }

    fn as_slice(&self) -> &[u8] {
        self.as_slice()
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

/// A ring buffer backed by a heap-allocated `Vec<u8>`.
///
/// The capacity is chosen at runtime but never changes afterwards.
///
/// Requires the `alloc` feature (enabled by default).
pub type HeapBuffer = RingBuffer<Vec<u8>>;

impl HeapBuffer {
    /// Creates an empty buffer with `capacity` slots, holding at most `capacity - 1` bytes.
    ///
    /// This allocates a `Vec` of `capacity` bytes filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is less than 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use slot_ring::HeapBuffer;
    ///
    /// let buf = HeapBuffer::new(1024);
    /// assert_eq!(buf.capacity(), 1024);
    /// assert_eq!(buf.available_space(), 1023);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_storage(vec![0u8; capacity])
    }
}

impl From<Vec<u8>> for HeapBuffer {
    /// Reuses an existing `Vec` as storage. Its length becomes the capacity and its
    /// contents are zeroed.
    fn from(value: Vec<u8>) -> Self {
        let mut buf = Self::with_storage(value);
        buf.initialize();
        buf
    }
}
