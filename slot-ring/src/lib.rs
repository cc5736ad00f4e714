#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # slot-ring
//!
//! Fixed-capacity ring buffers for bytes and NUL-terminated strings.
//!
//! A small, predictable circular buffer meant for embedded targets and other places where
//! allocating is undesirable. Storage is sized once, at construction, and never grows.
//!
//! One slot of the storage is always kept free so that an empty buffer (`front == rear`)
//! can never be mistaken for a full one. A buffer with capacity `C` therefore holds at most
//! `C - 1` bytes.
//!
//! ## Quick Start
//!
//! Choose your storage strategy:
//!
//! - **[`StackBuffer`]**: Backed by an array. Sized at compile time, no allocation.
//! - **[`HeapBuffer`]**: Backed by a `Vec<u8>`. Sized at runtime, but still fixed once built.
//! - **[`DefaultBuffer`]**: A [`StackBuffer`] with [`DEFAULT_CAPACITY`] slots.
//!
//! ```rust
//! use slot_ring::{DefaultBuffer, Error};
//!
//! let mut buf = DefaultBuffer::new();
//!
//! // Strings are stored with a trailing NUL
//! buf.push_string("hello")?;
//! assert_eq!(buf.used_space(), 6);
//!
//! let mut dest = [0u8; 6];
//! buf.read_string(5, &mut dest)?;
//! assert_eq!(&dest, b"hello\0");
//!
//! assert!(buf.is_empty());
//! assert_eq!(buf.pop_byte(), Err(Error::Empty));
//! # Ok::<(), Error>(())
//! ```
//!
//! Every operation returns immediately. Nothing blocks and nothing retries; a rejected
//! operation leaves the buffer exactly as it was.
//!
//! ## Feature Flags
//!
//! - **`alloc`** *(default)*: Enables [`HeapBuffer`].
//! - **`buf-trait`**: Implements [`bytes::Buf`] and [`bytes::BufMut`].
//! - **`zeroize`**: Wipes storage with the [`zeroize`] crate on reset and on drop.
//! - **`hybrid-array`**: Sizes [`StackBuffer`] with `hybrid-array` types (e.g. `U64`).
//! - **`tracing`**: Emits [`tracing`] events when operations are rejected or the buffer is reset.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

/// Forwards to the `tracing` macro of the same level when the feature is enabled.
macro_rules! event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)+);
    };
}

#[cfg(not(feature = "hybrid-array"))]
mod array;
#[cfg(not(feature = "hybrid-array"))]
pub use array::{DefaultBuffer, StackBuffer};

#[cfg(feature = "hybrid-array")]
mod hybrid_array;
#[cfg(feature = "hybrid-array")]
pub use self::hybrid_array::{ArraySize, DefaultBuffer, StackBuffer};

#[cfg(feature = "alloc")]
mod vec;
#[cfg(feature = "alloc")]
pub use vec::HeapBuffer;

#[cfg(feature = "buf-trait")]
use bytes::buf::UninitSlice;
#[cfg(feature = "buf-trait")]
use bytes::{Buf, BufMut};

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use core::fmt;

/// Number of byte slots in a [`DefaultBuffer`].
pub const DEFAULT_CAPACITY: usize = 50;

/// The reserved slot plus at least one usable byte.
const MIN_CAPACITY: usize = 2;

/// Reasons an operation on a [`RingBuffer`] was rejected.
///
/// A rejected operation never modifies the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// There are no unread bytes.
    #[error("ring buffer is empty")]
    Empty,
    /// There is no free slot left for another byte.
    #[error("ring buffer is full")]
    Full,
    /// A string (plus its terminator) does not fit in the free space.
    #[error("string needs {needed} bytes but only {available} are free")]
    Overflow { needed: usize, available: usize },
    /// A precondition on an index or length did not hold.
    #[error("requested range is outside the stored data")]
    Fail,
    /// The string contains a NUL byte, which would be read back as its terminator.
    #[error("string contains a NUL byte at position {position}")]
    InvalidString { position: usize },
    /// The destination cannot hold the requested bytes plus a terminator.
    #[error("destination holds {len} bytes but {needed} are required")]
    DestinationTooSmall { needed: usize, len: usize },
}

#[doc(hidden)]
mod sealed {
    pub trait StorageBase {}
}

#[doc(hidden)]
/// Backing byte slots for a ring buffer.
///
/// This trait is sealed and cannot be implemented by downstream crates.
pub trait Storage: sealed::StorageBase {
    fn len(&self) -> usize;
    fn as_slice(&self) -> &[u8];
    fn as_mut_slice(&mut self) -> &mut [u8];
}

/// The ring buffer engine, generic over its storage `S`.
///
/// Users should instantiate this via the type aliases [`StackBuffer`], [`HeapBuffer`] or
/// [`DefaultBuffer`].
///
/// `front` is the slot of the byte consumed last and `rear` the slot of the byte written
/// last. Both indices advance *before* the slot is touched, which is what keeps the slot
/// at `front` out of use.
pub struct RingBuffer<S: Storage> {
    bytes: S,
    front: usize,
    rear: usize,
}

impl<S: Storage> RingBuffer<S> {
    fn with_storage(bytes: S) -> Self {
        assert!(
            bytes.len() >= MIN_CAPACITY,
            "ring buffer capacity must be at least 2"
        );
        Self {
            bytes,
            front: 0,
            rear: 0,
        }
    }

    /// Returns the number of byte slots in the storage.
    ///
    /// One of them is reserved, so at most `capacity() - 1` bytes can be stored.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if there are no unread bytes.
    pub fn is_empty(&self) -> bool {
        self.front == self.rear
    }

    /// Returns `true` if the next [`push_byte`](Self::push_byte) would be rejected.
    pub fn is_full(&self) -> bool {
        wrap_add(self.rear, 1, self.capacity()) == self.front
    }

    /// Zeroes the storage and moves both indices back to the first slot.
    pub fn initialize(&mut self) {
        self.wipe();
        self.front = 0;
        self.rear = 0;
        event!(debug, capacity = self.capacity(), "ring buffer reset");
    }

    /// Resets the buffer. Identical to [`initialize`](Self::initialize): the storage is
    /// zeroed, not just marked empty.
    pub fn clear(&mut self) {
        self.initialize();
    }

    fn wipe(&mut self) {
        #[cfg(feature = "zeroize")]
        self.bytes.as_mut_slice().zeroize();
        #[cfg(not(feature = "zeroize"))]
        self.bytes.as_mut_slice().fill(0);
    }

    /// Appends one byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Full`] if no free slot is left.
    pub fn push_byte(&mut self, byte: u8) -> Result<(), Error> {
        if self.is_full() {
            event!(trace, byte, "push rejected, ring buffer full");
            return Err(Error::Full);
        }
        self.rear = wrap_add(self.rear, 1, self.capacity());
        self.bytes.as_mut_slice()[self.rear] = byte;
        Ok(())
    }

    /// Removes and returns the oldest byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if there is nothing to read.
    pub fn pop_byte(&mut self) -> Result<u8, Error> {
        if self.is_empty() {
            event!(trace, "pop rejected, ring buffer empty");
            return Err(Error::Empty);
        }
        self.front = wrap_add(self.front, 1, self.capacity());
        Ok(self.bytes.as_slice()[self.front])
    }

    /// Returns the number of unread bytes.
    pub fn used_space(&self) -> usize {
        if self.rear >= self.front {
            self.rear - self.front
        } else {
            self.capacity() - (self.front - self.rear)
        }
    }

    /// Returns the number of bytes that can still be pushed.
    ///
    /// The reserved slot is never counted, so
    /// `used_space() + available_space() == capacity() - 1` always holds.
    pub fn available_space(&self) -> usize {
        if self.front > self.rear {
            self.front - self.rear - 1
        } else {
            self.capacity() - (self.rear - self.front + 1)
        }
    }

    /// Appends a string followed by a NUL terminator.
    ///
    /// Either the whole string and its terminator are stored, or nothing is.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidString`] if `s` contains a NUL byte.
    /// - [`Error::Overflow`] if fewer than `s.len() + 1` bytes are free.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_ring::{Error, HeapBuffer};
    ///
    /// let mut buf = HeapBuffer::new(8);
    /// buf.push_string("abc")?;
    /// assert_eq!(buf.available_space(), 3);
    ///
    /// assert_eq!(
    ///     buf.push_string("abc"),
    ///     Err(Error::Overflow { needed: 4, available: 3 })
    /// );
    /// assert_eq!(buf.used_space(), 4);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn push_string(&mut self, s: impl AsRef<[u8]>) -> Result<(), Error> {
        let s = s.as_ref();
        if let Some(position) = s.iter().position(|&b| b == 0) {
            event!(trace, position, "push rejected, string contains NUL");
            return Err(Error::InvalidString { position });
        }

        let needed = s.len() + 1;
        let available = self.available_space();
        if available < needed {
            event!(trace, needed, available, "push rejected, string overflows");
            return Err(Error::Overflow { needed, available });
        }

        for &byte in s {
            self.push_byte(byte)?;
        }
        self.push_byte(0)
    }

    /// Moves `n` bytes into `dest` and NUL-terminates them at `dest[n]`.
    ///
    /// If the byte following the `n` read bytes is a `0`, it is consumed too, so a string
    /// stored by [`push_string`](Self::push_string) and read back with its own length leaves
    /// nothing behind. The buffer does not record where terminators came from: a `0`
    /// pushed as data with [`push_byte`](Self::push_byte) or [`commit`](Self::commit) in
    /// that position is consumed the same way. Callers mixing raw zero bytes with string
    /// reads should read them with [`pop_byte`](Self::pop_byte) instead.
    ///
    /// # Errors
    ///
    /// - [`Error::Fail`] if fewer than `n` bytes are stored.
    /// - [`Error::DestinationTooSmall`] if `dest` is shorter than `n + 1`.
    ///
    /// Nothing is consumed when an error is returned.
    pub fn read_string(&mut self, n: usize, dest: &mut [u8]) -> Result<(), Error> {
        let used = self.used_space();
        if used < n {
            event!(trace, n, used, "read rejected, not enough stored bytes");
            return Err(Error::Fail);
        }

        let needed = n + 1;
        if dest.len() < needed {
            event!(trace, needed, len = dest.len(), "read rejected, destination too small");
            return Err(Error::DestinationTooSmall {
                needed,
                len: dest.len(),
            });
        }

        for slot in &mut dest[..n] {
            *slot = self.pop_byte()?;
        }
        dest[n] = 0;

        if self.peek(0) == Ok(0) {
            self.front = wrap_add(self.front, 1, self.capacity());
        }
        Ok(())
    }

    /// Returns the byte at logical position `index` without consuming it.
    ///
    /// Index 0 is the oldest unread byte, i.e. what [`pop_byte`](Self::pop_byte) would
    /// return next.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fail`] if `index >= used_space()`.
    pub fn peek(&self, index: usize) -> Result<u8, Error> {
        if index >= self.used_space() {
            return Err(Error::Fail);
        }
        let slot = wrap_add(self.front, index + 1, self.capacity());
        Ok(self.bytes.as_slice()[slot])
    }

    /// Returns pairs of slices holding the unread bytes, oldest first.
    ///
    /// - If the data is contiguous, the second slice is empty.
    /// - If the data wraps, the first slice runs to the end of the storage and the second
    ///   continues from its start.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_ring::HeapBuffer;
    ///
    /// let mut buf = HeapBuffer::new(4);
    /// for b in [1, 2, 3] {
    ///     buf.push_byte(b).unwrap();
    /// }
    /// buf.pop_byte().unwrap();
    /// buf.push_byte(4).unwrap();
    ///
    /// assert_eq!(buf.as_slices(), (&[2, 3][..], &[4][..]));
    /// ```
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        if self.is_empty() {
            return (&[], &[]);
        }

        let start = wrap_add(self.front, 1, self.capacity());
        let bytes = self.bytes.as_slice();

        if start <= self.rear {
            (&bytes[start..=self.rear], &[])
        } else {
            let (head, tail) = bytes.split_at(start);
            (tail, &head[..=self.rear])
        }
    }

    /// Returns pairs of mutable slices covering the free slots, in write order.
    ///
    /// The reserved slot is never part of either slice. Write into them, then call
    /// [`commit`](Self::commit) to make the bytes readable.
    pub fn as_mut_slices(&mut self) -> (&mut [u8], &mut [u8]) {
        let available = self.available_space();
        if available == 0 {
            return (&mut [][..], &mut [][..]);
        }

        let capacity = self.capacity();
        let start = wrap_add(self.rear, 1, capacity);
        let end = start + available;
        let bytes = self.bytes.as_mut_slice();

        if end <= capacity {
            (&mut bytes[start..end], &mut [][..])
        } else {
            let (head, tail) = bytes.split_at_mut(start);
            (tail, &mut head[..end - capacity])
        }
    }

    /// Marks `cnt` bytes written through [`as_mut_slices`](Self::as_mut_slices) as stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Full`] if `cnt` is greater than
    /// [`available_space()`](Self::available_space).
    pub fn commit(&mut self, cnt: usize) -> Result<(), Error> {
        if cnt > self.available_space() {
            event!(trace, cnt, "commit rejected, not enough free slots");
            return Err(Error::Full);
        }
        self.rear = wrap_add(self.rear, cnt, self.capacity());
        Ok(())
    }

    /// Discards the `cnt` oldest unread bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fail`] if `cnt` is greater than [`used_space()`](Self::used_space).
    pub fn consume(&mut self, cnt: usize) -> Result<(), Error> {
        if cnt > self.used_space() {
            event!(trace, cnt, "consume rejected, not enough stored bytes");
            return Err(Error::Fail);
        }
        self.front = wrap_add(self.front, cnt, self.capacity());
        Ok(())
    }
}

impl<S: Storage> fmt::Debug for RingBuffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("front", &self.front)
            .field("rear", &self.rear)
            .field("used", &self.used_space())
            .finish()
    }
}

/// Returns `(x + y) % m` for an index `x < m` and a step `y <= m`, without dividing.
#[inline]
const fn wrap_add(x: usize, y: usize, m: usize) -> usize {
    debug_assert!(x < m);
    debug_assert!(y <= m);
    let z = x + y;
    if z >= m { z - m } else { z }
}

#[cfg(feature = "zeroize")]
impl<S: Storage> ZeroizeOnDrop for RingBuffer<S> {}

#[cfg(feature = "zeroize")]
impl<S: Storage> Drop for RingBuffer<S> {
    fn drop(&mut self) {
        self.bytes.as_mut_slice().zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl<S: Storage> Zeroize for RingBuffer<S> {
    /// Zeroes out the underlying storage and resets the indices.
    fn zeroize(&mut self) {
        self.initialize();
    }
}

#[cfg(feature = "buf-trait")]
impl<S: Storage> Buf for RingBuffer<S> {
    fn remaining(&self) -> usize {
        self.used_space()
    }

    fn chunk(&self) -> &[u8] {
        self.as_slices().0
    }

    fn advance(&mut self, cnt: usize) {
        if let Err(err) = self.consume(cnt) {
            panic!("cannot advance ring buffer by {cnt}: {err}");
        }
    }
}

#[cfg(feature = "buf-trait")]
unsafe impl<S: Storage> BufMut for RingBuffer<S> {
    fn remaining_mut(&self) -> usize {
        self.available_space()
    }

    unsafe fn advance_mut(&mut self, cnt: usize) {
        if let Err(err) = self.commit(cnt) {
            panic!("cannot advance ring buffer by {cnt}: {err}");
        }
    }

    fn chunk_mut(&mut self) -> &mut UninitSlice {
        UninitSlice::new(self.as_mut_slices().0)
    }
}
