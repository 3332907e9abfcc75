//! Read-side byte sources.
//!
//! Every reader in the crate is generic over [`ByteSource`], so the same
//! parsing code runs over one contiguous slice or over a chain of chunks as
//! delivered by an I/O pipeline. Sources are immutable views: readers never
//! advance them, they report how many bytes they consumed and the caller
//! re-slices.

mod sequence;

pub use sequence::{Segments, Sequence};

use crate::error::{MsgPackError, Result};

/// A read-only view over encoded bytes.
pub trait ByteSource: Sized + Clone {
    /// Total number of bytes in the view.
    ///
    /// Fails with [`MsgPackError::LengthOverflow`] if the length does not fit
    /// in `usize` (possible only for chunked sources).
    fn total_len(&self) -> Result<usize>;

    /// Returns `true` if the view holds no bytes.
    fn is_empty(&self) -> bool;

    /// Returns the first byte without consuming it.
    fn peek_first(&self) -> Result<u8>;

    /// Copies exactly `dst.len()` bytes from the start of the view.
    ///
    /// Returns `false` if fewer bytes are available; `dst` is then unspecified.
    fn try_fill(&self, dst: &mut [u8]) -> bool;

    /// Returns the sub-view `[start, start + len)` without copying.
    fn slice(&self, start: usize, len: usize) -> Result<Self>;

    /// Returns the bytes as one slice if the view is contiguous.
    fn as_contiguous(&self) -> Option<&[u8]>;

    /// Returns the view with the first `n` bytes removed.
    fn skip(&self, n: usize) -> Result<Self> {
        let total = self.total_len()?;
        if n > total {
            return Err(MsgPackError::UnexpectedEndOfInput {
                needed: n,
                available: total,
            });
        }
        self.slice(n, total - n)
    }

    /// Like [`try_fill`](Self::try_fill), but reports a shortfall as an error.
    fn fill(&self, dst: &mut [u8]) -> Result<()> {
        if self.try_fill(dst) {
            Ok(())
        } else {
            Err(MsgPackError::UnexpectedEndOfInput {
                needed: dst.len(),
                available: self.total_len().unwrap_or(usize::MAX),
            })
        }
    }

    /// Reads the first `N` bytes into an array.
    fn read_array<const N: usize>(&self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.fill(&mut out)?;
        Ok(out)
    }
}

impl<'a> ByteSource for &'a [u8] {
    fn total_len(&self) -> Result<usize> {
        Ok(self.len())
    }

    fn is_empty(&self) -> bool {
        <[u8]>::is_empty(self)
    }

    fn peek_first(&self) -> Result<u8> {
        self.first().copied().ok_or(MsgPackError::EmptyInput)
    }

    fn try_fill(&self, dst: &mut [u8]) -> bool {
        match self.get(..dst.len()) {
            Some(src) => {
                dst.copy_from_slice(src);
                true
            }
            None => false,
        }
    }

    fn slice(&self, start: usize, len: usize) -> Result<Self> {
        let data: &'a [u8] = *self;
        let end = start
            .checked_add(len)
            .ok_or(MsgPackError::LengthOverflow(len as u64))?;
        data.get(start..end).ok_or(MsgPackError::UnexpectedEndOfInput {
            needed: end,
            available: data.len(),
        })
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(*self)
    }
}
