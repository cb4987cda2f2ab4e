// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A u8 ring over a fixed-size array.
//!
//! This is a FIFO queue. `push` refuses bytes once the ring is full;
//! `push_overwrite` discards the oldest byte instead, which is what a
//! log ring wants. `pop` returns None when the ring is empty.

#![cfg_attr(not(test), no_std)]

#[derive(Debug, PartialEq)]
pub struct Buffer<const N: usize> {
    begin: usize,
    end: usize,
    size: usize,
    data: [u8; N],
}

impl<const N: usize> Buffer<N> {
    pub const fn new() -> Self {
        Self {
            begin: 0,
            end: 0,
            size: 0,
            data: [0; N],
        }
    }

    pub const fn capacity(&self) -> usize { N }

    /// Resets buffer.
    ///
    /// This does not modify the data.
    pub fn clear(&mut self) {
        self.begin = 0;
        self.end = 0;
        self.size = 0;
    }

    /// Returns true if buffer is empty, false otherwise.
    pub fn is_empty(&self) -> bool { self.size == 0 }

    pub fn len(&self) -> usize { self.size }

    /// Returns available data slot to be written.
    pub fn available_data(&self) -> usize { N - self.size }

    /// Adds an item to the buffer.
    ///
    /// Returns false if buffer is full, otherwise true.
    #[must_use]
    pub fn push(&mut self, item: u8) -> bool {
        if self.available_data() == 0 {
            return false;
        }
        self.data[self.end] = item;
        self.end = Self::advance(self.end);
        self.size += 1;
        true
    }

    /// Adds an item, discarding the oldest one if the buffer is full.
    ///
    /// Returns true if a byte was discarded to make room.
    pub fn push_overwrite(&mut self, item: u8) -> bool {
        if N == 0 {
            return true;
        }
        let discarded = self.available_data() == 0;
        if discarded {
            let _ = self.pop();
        }
        let pushed = self.push(item);
        debug_assert!(pushed);
        discarded
    }

    /// Appends every byte of `items`, overwriting the oldest data as needed.
    ///
    /// Returns the number of bytes discarded.
    pub fn extend_overwrite(&mut self, items: &[u8]) -> usize {
        let mut discarded = 0;
        for &item in items {
            if self.push_overwrite(item) {
                discarded += 1;
            }
        }
        discarded
    }

    /// Remove an item at the front of the buffer.
    ///
    /// Returns None if buffer is empty, otherwise the result.
    #[must_use]
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let result = self.data[self.begin];
        self.begin = Self::advance(self.begin);
        self.size -= 1;
        Some(result)
    }

    /// Moves bytes from the front of the buffer into `out`.
    ///
    /// Returns the number of bytes copied.
    pub fn drain_into(&mut self, out: &mut [u8]) -> usize {
        let mut copied = 0;
        for slot in out.iter_mut() {
            match self.pop() {
                Some(byte) => *slot = byte,
                None => break,
            }
            copied += 1;
        }
        copied
    }

    /// Increments the begin or end marker and wrap around if necessary.
    fn advance(position: usize) -> usize { (position + 1) % N }
}

impl<const N: usize> Default for Buffer<N> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPACITY: usize = 16;
    type TestBuffer = Buffer<CAPACITY>;

    /// Pop will return pushed value.
    #[test]
    fn push_pop() {
        let mut buffer = TestBuffer::new();
        assert!(buffer.push(1));
        assert_eq!(Some(1), buffer.pop());
        assert_eq!(None, buffer.pop());
    }

    /// Pop will return FIFO order.
    #[test]
    fn pop_fifo() {
        let mut buffer = TestBuffer::new();
        assert!(buffer.push(1));
        assert!(buffer.push(2));
        assert_eq!(Some(1), buffer.pop());
        assert_eq!(Some(2), buffer.pop());
    }

    /// Pushing to a full buffer will ignore the value and return False.
    #[test]
    fn push_full_buffer() {
        let mut buffer = TestBuffer::new();
        for i in 0..CAPACITY {
            assert!(buffer.push(i as u8));
        }
        assert_eq!(CAPACITY, buffer.len());
        assert_eq!(0, buffer.available_data());
        assert!(!buffer.push(0xff));
        assert_eq!(Some(0), buffer.pop());
    }

    /// Check that push and pop over capacity will wrap and not break.
    #[test]
    fn buffer_begin_wrap() {
        let mut buffer = TestBuffer::new();
        for i in 0..(CAPACITY * 2) {
            let value = i as u8;
            assert!(buffer.push(value));
            assert_eq!(Some(value), buffer.pop());
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn clear_forgets_contents() {
        let mut buffer = TestBuffer::new();
        assert!(buffer.push(1));
        assert!(buffer.push(2));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(CAPACITY, buffer.available_data());
        assert_eq!(None, buffer.pop());
    }

    #[test]
    fn push_overwrite_keeps_room_when_not_full() {
        let mut buffer = TestBuffer::new();
        assert!(!buffer.push_overwrite(1));
        assert!(!buffer.push_overwrite(2));
        assert_eq!(2, buffer.len());
        assert_eq!(Some(1), buffer.pop());
        assert_eq!(Some(2), buffer.pop());
    }

    #[test]
    fn push_overwrite_discards_oldest_when_full() {
        let mut buffer = TestBuffer::new();
        for i in 0..CAPACITY {
            assert!(!buffer.push_overwrite(i as u8));
        }
        assert!(buffer.push_overwrite(0xaa));
        assert_eq!(CAPACITY, buffer.len());
        assert_eq!(Some(1), buffer.pop());
        let mut rest = [0u8; CAPACITY];
        let n = buffer.drain_into(&mut rest);
        assert_eq!(CAPACITY - 1, n);
        assert_eq!(0xaa, rest[n - 1]);
    }

    #[test]
    fn extend_overwrite_reports_discards() {
        let mut buffer = Buffer::<4>::new();
        assert_eq!(0, buffer.extend_overwrite(b"ab"));
        assert_eq!(2, buffer.extend_overwrite(b"cdef"));
        let mut out = [0u8; 8];
        let n = buffer.drain_into(&mut out);
        assert_eq!(&out[..n], b"cdef");
    }

    #[test]
    fn drain_into_short_slice() {
        let mut buffer = TestBuffer::new();
        buffer.extend_overwrite(b"hello");
        let mut out = [0u8; 3];
        assert_eq!(3, buffer.drain_into(&mut out));
        assert_eq!(&out, b"hel");
        assert_eq!(2, buffer.len());
    }
}
