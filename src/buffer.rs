//! Bounded, position-tracked byte cursors used by every other module.
//!
//! [`Reader`] never takes ownership of the slice it walks; the caller keeps
//! it alive for the duration of decoding. [`Writer`] owns a growable buffer
//! and is consumed by [`Writer::finalize`].

use crate::error::{CodecError, Result};

/// Reads bytes from a borrowed slice, tracking a position in `[0, size]`.
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Reads one byte, advancing the position. Fails if the reader is at
    /// end of input.
    pub fn get_byte(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.get_byte_unchecked())
    }

    /// Reads one byte without bounds checking. Callable only immediately
    /// after a successful [`Reader::ensure`] covering at least one byte.
    pub fn get_byte_unchecked(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        b
    }

    /// Fails unless at least `n` bytes remain.
    pub fn ensure(&mut self, n: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < n {
            tracing::warn!(
                expected = n,
                position = self.pos,
                remaining,
                "decoder ran out of input"
            );
            return Err(CodecError::Truncated {
                expected: n,
                position: self.pos,
                remaining,
            });
        }
        Ok(())
    }

    /// Reads `n` bytes as a slice, advancing the position.
    pub fn get_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let s = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }
}

/// Growable byte buffer with a write position. Growth policy: when capacity
/// is exhausted, new capacity is `min(2*current, current + 512)`.
pub struct Writer {
    buf: Vec<u8>,
    pos: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(32),
            pos: 0,
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn grow_to_at_least(&mut self, target: usize) {
        let mut cap = self.buf.capacity().max(1);
        while cap < target {
            let doubled = cap.saturating_mul(2);
            let capped = cap.saturating_add(512);
            cap = doubled.min(capped).max(target);
        }
        if cap > self.buf.capacity() {
            self.buf.reserve(cap - self.buf.len());
        }
    }

    /// Reserves room for at least `n` additional bytes.
    pub fn ensure(&mut self, n: usize) -> Result<()> {
        self.grow_to_at_least(self.pos + n);
        Ok(())
    }

    pub fn put_byte(&mut self, b: u8) {
        if self.pos == self.buf.len() {
            self.buf.push(b);
        } else {
            self.buf[self.pos] = b;
        }
        self.pos += 1;
    }

    pub fn put_bytes(&mut self, slice: &[u8]) {
        self.ensure(slice.len()).expect("ensure never fails");
        for &b in slice {
            self.put_byte(b);
        }
    }

    /// Truncates the buffer to the write position and returns it, consuming
    /// the writer.
    pub fn finalize(mut self) -> Vec<u8> {
        self.buf.truncate(self.pos);
        self.buf
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
