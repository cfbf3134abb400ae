//! Fixed-Capacity Ring Buffer
//!
//! ## Overview
//!
//! Sensor history on the node is kept in rings sized at compile time through
//! const generics. Once a ring is full, each insert silently evicts the
//! oldest entry, so an insert never fails and memory never grows.
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<T, 5> after 7 pushes (v0..v6):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │ v5  │ v6  │ v2  │ v3  │ v4  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!                ↑
//!                └── write_pos = 2, also the oldest entry when full
//!
//! Logical order (oldest first): v2, v3, v4, v5, v6
//! ```
//!
//! All operations are O(1) except iteration and `snapshot`, which are O(N).
//! Slots are `Option<T>` so that no unsafe code is needed for the
//! not-yet-written part of the array.
//!
//! ## Usage Example
//!
//! ```rust
//! use klik_core::buffer::CircularBuffer;
//!
//! let mut ring: CircularBuffer<u32, 3> = CircularBuffer::new();
//! for v in 0..5 {
//!     ring.push(v);
//! }
//! assert_eq!(ring.snapshot().as_slice(), &[2, 3, 4]);
//! assert_eq!(ring.last(), Some(&4));
//! ```

use heapless::Vec;

/// Fixed-size ring buffer that overwrites its oldest entry once full
///
/// ## Internal Invariants
///
/// - `write_pos < N` whenever `N > 0`
/// - `len <= N`
/// - While `len < N` the entries occupy slots `0..len`; once full, the
///   oldest entry sits at `write_pos`
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    data: [Option<T>; N],
    write_pos: usize,
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates an empty buffer, usable in `static` items
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Appends an entry, returning the one it evicted (if the buffer was full)
    pub fn push(&mut self, item: T) -> Option<T> {
        if N == 0 {
            return Some(item);
        }

        let evicted = if self.len == N { self.data[self.write_pos] } else { None };
        self.data[self.write_pos] = Some(item);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
        evicted
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of entries
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Oldest entry still held
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Copy of the contents, oldest first
    pub fn snapshot(&self) -> Vec<T, N> {
        let mut out = Vec::new();
        for item in self.iter() {
            // Capacity matches the buffer, so this cannot overflow
            let _ = out.push(*item);
        }
        out
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Entry by logical index (0 = oldest)
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2, full)
    /// Logical:   [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over ring contents, oldest first
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy, const N: usize> ExactSizeIterator for CircularBufferIter<'a, T, N> {}

impl<'a, T: Copy, const N: usize> IntoIterator for &'a CircularBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = CircularBufferIter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
