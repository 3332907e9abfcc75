//! Chunked byte sources: a forward chain of `Bytes` segments.

use bytes::{Buf, Bytes, BytesMut};

use super::ByteSource;
use crate::error::{MsgPackError, Result};

/// An ordered chain of byte chunks with precomputed start offsets.
///
/// Empty chunks are dropped on insertion, so every segment holds at least one
/// byte and start offsets are strictly increasing.
#[derive(Debug, Clone, Default)]
pub struct Segments {
    chunks: Vec<Bytes>,
    starts: Vec<u64>,
    total: u64,
}

impl Segments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a chain by copying each slice into its own segment.
    pub fn from_slices<'s>(slices: impl IntoIterator<Item = &'s [u8]>) -> Self {
        slices.into_iter().map(Bytes::copy_from_slice).collect()
    }

    /// Appends a chunk to the end of the chain.
    pub fn push(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        self.starts.push(self.total);
        self.total = self.total.saturating_add(chunk.len() as u64);
        self.chunks.push(chunk);
    }

    /// Total number of bytes across all segments.
    pub fn len(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn segment_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns a read view over the whole chain.
    pub fn as_source(&self) -> Sequence<'_> {
        Sequence {
            segments: self,
            seg: 0,
            offset: 0,
            start: 0,
            end: self.total,
        }
    }

    /// Removes the first `n` bytes from the chain and returns them.
    ///
    /// Zero-copy when the bytes lie within the first segment.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the chain length.
    pub fn split_to(&mut self, n: usize) -> Bytes {
        assert!(
            n as u64 <= self.total,
            "split_to out of bounds: {n} > {}",
            self.total
        );
        let head = match self.chunks.first_mut() {
            Some(first) if n <= first.len() => first.split_to(n),
            _ => {
                let mut out = BytesMut::with_capacity(n);
                let mut left = n;
                for chunk in &mut self.chunks {
                    if left == 0 {
                        break;
                    }
                    let take = left.min(chunk.len());
                    out.extend_from_slice(&chunk[..take]);
                    chunk.advance(take);
                    left -= take;
                }
                out.freeze()
            }
        };
        self.chunks.retain(|c| !c.is_empty());
        self.reindex();
        head
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
        self.starts.clear();
        self.total = 0;
    }

    fn reindex(&mut self) {
        self.starts.clear();
        self.total = 0;
        for chunk in &self.chunks {
            self.starts.push(self.total);
            self.total = self.total.saturating_add(chunk.len() as u64);
        }
    }
}

impl FromIterator<Bytes> for Segments {
    fn from_iter<I: IntoIterator<Item = Bytes>>(iter: I) -> Self {
        let mut segments = Self::new();
        for chunk in iter {
            segments.push(chunk);
        }
        segments
    }
}

impl From<Vec<Bytes>> for Segments {
    fn from(chunks: Vec<Bytes>) -> Self {
        chunks.into_iter().collect()
    }
}

/// A read view over a [`Segments`] chain.
///
/// The cursor is the (segment, offset) pair of the first byte, plus the
/// absolute position from the start of the chain.
#[derive(Debug, Clone, Copy)]
pub struct Sequence<'a> {
    segments: &'a Segments,
    seg: usize,
    offset: usize,
    start: u64,
    end: u64,
}

impl<'a> Sequence<'a> {
    /// Absolute offset of this view from the start of the chain.
    pub fn position(&self) -> u64 {
        self.start
    }

    /// Iterates over the contiguous pieces of the view.
    pub fn chunks(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let chunks: &'a [Bytes] = &self.segments.chunks;
        let mut seg = self.seg;
        let mut offset = self.offset;
        let mut remaining = self.remaining();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let chunk: &'a [u8] = &chunks[seg][offset..];
            let take = remaining.min(chunk.len() as u64) as usize;
            remaining -= take as u64;
            seg += 1;
            offset = 0;
            Some(&chunk[..take])
        })
    }

    fn remaining(&self) -> u64 {
        self.end - self.start
    }

    /// Finds the (segment, offset) of an absolute position at or after the cursor.
    fn locate(&self, abs: u64) -> (usize, usize) {
        let segments = self.segments;
        if abs >= segments.total {
            return (segments.chunks.len(), 0);
        }
        let ahead = &segments.starts[self.seg..];
        let seg = self.seg + ahead.partition_point(|&s| s <= abs) - 1;
        (seg, (abs - segments.starts[seg]) as usize)
    }
}

impl<'a> From<&'a Segments> for Sequence<'a> {
    fn from(segments: &'a Segments) -> Self {
        segments.as_source()
    }
}

impl ByteSource for Sequence<'_> {
    fn total_len(&self) -> Result<usize> {
        let remaining = self.remaining();
        usize::try_from(remaining).map_err(|_| MsgPackError::LengthOverflow(remaining))
    }

    fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn peek_first(&self) -> Result<u8> {
        if self.is_empty() {
            return Err(MsgPackError::EmptyInput);
        }
        Ok(self.segments.chunks[self.seg][self.offset])
    }

    fn try_fill(&self, dst: &mut [u8]) -> bool {
        if dst.len() as u64 > self.remaining() {
            return false;
        }
        let mut filled = 0;
        for chunk in self.chunks() {
            if filled == dst.len() {
                break;
            }
            let take = chunk.len().min(dst.len() - filled);
            dst[filled..filled + take].copy_from_slice(&chunk[..take]);
            filled += take;
        }
        true
    }

    fn slice(&self, start: usize, len: usize) -> Result<Self> {
        let needed = start
            .checked_add(len)
            .ok_or(MsgPackError::LengthOverflow(len as u64))?;
        let remaining = self.remaining();
        if needed as u64 > remaining {
            return Err(MsgPackError::UnexpectedEndOfInput {
                needed,
                available: usize::try_from(remaining).unwrap_or(usize::MAX),
            });
        }
        let abs = self.start + start as u64;
        let (seg, offset) = self.locate(abs);
        Ok(Self {
            segments: self.segments,
            seg,
            offset,
            start: abs,
            end: self.start + needed as u64,
        })
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Some(&[]);
        }
        let chunk = &self.segments.chunks[self.seg][self.offset..];
        let len = usize::try_from(remaining).ok()?;
        chunk.get(..len)
    }
}
