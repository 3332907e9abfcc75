//! Write-side byte sinks.

use bytes::BytesMut;

use crate::error::{MsgPackError, Result};

/// A destination for encoded bytes.
///
/// Writers claim the full size of what they are about to write in one call,
/// so a failed write leaves the sink untouched.
pub trait ByteSink {
    /// Reserves exactly `len` bytes at the write position and returns them.
    ///
    /// Fails with [`MsgPackError::BufferTooSmall`] if the sink cannot hold
    /// `len` more bytes.
    fn claim(&mut self, len: usize) -> Result<&mut [u8]>;

    /// Number of bytes that can still be claimed.
    fn remaining_capacity(&self) -> usize;

    /// Writes `bytes` verbatim.
    fn put_slice(&mut self, bytes: &[u8]) -> Result<usize> {
        self.claim(bytes.len())?.copy_from_slice(bytes);
        Ok(bytes.len())
    }
}

/// A fixed-capacity sink; each claim shrinks the slice from the front.
impl ByteSink for &mut [u8] {
    fn claim(&mut self, len: usize) -> Result<&mut [u8]> {
        if len > self.len() {
            return Err(MsgPackError::BufferTooSmall {
                needed: len,
                available: self.len(),
            });
        }
        let (head, tail) = std::mem::take(self).split_at_mut(len);
        *self = tail;
        Ok(head)
    }

    fn remaining_capacity(&self) -> usize {
        self.len()
    }
}

impl ByteSink for BytesMut {
    fn claim(&mut self, len: usize) -> Result<&mut [u8]> {
        let start = self.len();
        self.resize(start + len, 0);
        Ok(&mut self[start..])
    }

    fn remaining_capacity(&self) -> usize {
        usize::MAX - self.len()
    }
}

impl ByteSink for Vec<u8> {
    fn claim(&mut self, len: usize) -> Result<&mut [u8]> {
        let start = self.len();
        self.resize(start + len, 0);
        Ok(&mut self[start..])
    }

    fn remaining_capacity(&self) -> usize {
        isize::MAX as usize - self.len()
    }
}
