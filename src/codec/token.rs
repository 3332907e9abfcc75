//! Token skipping and extraction.
//!
//! [`skip_token`] measures the next complete value without decoding it. Nested
//! containers are tracked on an explicit work list of pending element counts
//! instead of the call stack, so nesting depth is bounded only by memory.

use super::header::{
    read_array_header, read_binary_header, read_extension_header, read_map_header,
    read_string_header,
};
use crate::error::{MsgPackError, Result};
use crate::format::{data_family, fixed_token_len, DataFamily};
use crate::pool::{BufferPool, PooledBuf};
use crate::source::ByteSource;

/// What consuming one tag does to the traversal.
enum Step {
    /// A complete leaf token of this many bytes.
    Leaf(usize),
    /// A container header of `header` bytes followed by `elements` values.
    Container { header: usize, elements: u64 },
}

fn step_for<S: ByteSource>(cursor: &S, tag: u8) -> Result<Step> {
    if let Some(n) = fixed_token_len(tag) {
        return Ok(Step::Leaf(n));
    }
    let payload = |(length, header): (usize, usize)| {
        header
            .checked_add(length)
            .map(Step::Leaf)
            .ok_or(MsgPackError::LengthOverflow(length as u64))
    };
    match data_family(tag) {
        DataFamily::Array => {
            let (count, header) = read_array_header(cursor)?;
            Ok(Step::Container {
                header,
                elements: count as u64,
            })
        }
        DataFamily::Map => {
            let (count, header) = read_map_header(cursor)?;
            Ok(Step::Container {
                header,
                elements: count as u64 * 2,
            })
        }
        DataFamily::String => payload(read_string_header(cursor)?),
        DataFamily::Binary => payload(read_binary_header(cursor)?),
        DataFamily::Extension => {
            let (ext, header) = read_extension_header(cursor)?;
            payload((ext.length, header))
        }
        _ => Err(MsgPackError::InvalidDataCode(tag)),
    }
}

/// Marks one element of the innermost open container as complete, closing
/// every level that reaches zero.
fn complete_one(pending: &mut Vec<u64>) {
    while let Some(top) = pending.last_mut() {
        *top -= 1;
        if *top > 0 {
            return;
        }
        pending.pop();
    }
}

/// Resumable measurement of one token over a growing buffer.
///
/// Each call to [`scan`](Self::scan) picks up where the previous one stopped,
/// so feeding a token in pieces costs time proportional to its length. The
/// source handed to `scan` must always start at the token's first byte and
/// only ever grow at the end.
#[derive(Debug, Clone)]
pub struct TokenScanner {
    pending: Vec<u64>,
    consumed: usize,
    needed: usize,
    max_depth: usize,
}

impl Default for TokenScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenScanner {
    pub fn new() -> Self {
        Self {
            pending: vec![1],
            consumed: 0,
            needed: 1,
            max_depth: 0,
        }
    }

    /// Bytes of the token accounted for so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Smallest total length the source must reach before the scan can make
    /// progress.
    pub fn needed(&self) -> usize {
        self.needed
    }

    /// Forgets the current token so the scanner can measure the next one.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.pending.push(1);
        self.consumed = 0;
        self.needed = 1;
        self.max_depth = 0;
    }

    /// Advances over whatever `src` holds beyond the bytes already scanned.
    ///
    /// Returns `Ok(Some(len))` once the token is complete and `Ok(None)` when
    /// more input is required; [`needed`](Self::needed) then tells how much.
    pub fn scan<S: ByteSource>(&mut self, src: &S) -> Result<Option<usize>> {
        if self.pending.is_empty() {
            return Ok(Some(self.consumed));
        }
        let total = src.total_len()?;
        if total < self.needed {
            return Ok(None);
        }

        let mut cursor = src.skip(self.consumed)?;
        while !self.pending.is_empty() {
            let tag = match cursor.peek_first() {
                Ok(tag) => tag,
                Err(MsgPackError::EmptyInput) => {
                    self.needed = self.consumed + 1;
                    return Ok(None);
                }
                Err(e) => return Err(e),
            };
            let step = match step_for(&cursor, tag) {
                Err(MsgPackError::UnexpectedEndOfInput { needed, .. }) => {
                    self.needed = self.consumed.saturating_add(needed);
                    return Ok(None);
                }
                other => other?,
            };
            let (advance, elements) = match step {
                Step::Leaf(n) => (n, 0),
                Step::Container { header, elements } => (header, elements),
            };
            let end = self
                .consumed
                .checked_add(advance)
                .ok_or(MsgPackError::LengthOverflow(advance as u64))?;
            if end > total {
                self.needed = end;
                return Ok(None);
            }
            cursor = cursor.skip(advance)?;
            self.consumed = end;

            if elements == 0 {
                complete_one(&mut self.pending);
            } else {
                self.pending.push(elements);
                self.max_depth = self.max_depth.max(self.pending.len() - 1);
            }
        }

        self.needed = self.consumed;
        tracing::trace!(len = self.consumed, max_depth = self.max_depth, "skipped token");
        Ok(Some(self.consumed))
    }
}

/// Returns the encoded length of the next complete value, nested elements
/// included.
///
/// Fails with [`MsgPackError::EmptyInput`] on an empty source and with
/// [`MsgPackError::UnexpectedEndOfInput`] if the value is cut short.
pub fn skip_token<S: ByteSource>(src: &S) -> Result<usize> {
    if src.is_empty() {
        return Err(MsgPackError::EmptyInput);
    }
    let mut scanner = TokenScanner::new();
    match scanner.scan(src)? {
        Some(len) => Ok(len),
        None => Err(MsgPackError::UnexpectedEndOfInput {
            needed: scanner.needed(),
            available: src.total_len()?,
        }),
    }
}

pub fn try_skip_token<S: ByteSource>(src: &S) -> Option<usize> {
    skip_token(src).ok()
}

/// Returns a view over exactly the next complete value.
pub fn read_token<S: ByteSource>(src: &S) -> Result<S> {
    let len = skip_token(src)?;
    src.slice(0, len)
}

/// Copies the next complete value into a buffer rented from `pool`.
pub fn copy_token<S: ByteSource>(src: &S, pool: &BufferPool) -> Result<PooledBuf> {
    let token = read_token(src)?;
    let mut buf = pool.rent(token.total_len()?);
    token.fill(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{
        write_array16_header, write_binary, write_extension, write_i64, write_map_header,
        write_string, write_u64,
    };
    use crate::error::ErrorKind;
    use crate::source::Segments;

    fn skip(bytes: &[u8]) -> Result<usize> {
        skip_token(&bytes)
    }

    #[test]
    fn scalars() {
        assert_eq!(skip(&[0x05, 0xFF]).unwrap(), 1);
        assert_eq!(skip(&[0xC0]).unwrap(), 1);
        assert_eq!(skip(&[0xCD, 0xC5, 0x49, 0x00]).unwrap(), 3);
        assert_eq!(skip(&[0xCB, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap(), 9);
        assert_eq!(skip(&[0xA2, b'h', b'i', 0xC0]).unwrap(), 3);
        assert_eq!(skip(&[0xC4, 0x01, 0xAA]).unwrap(), 3);
        assert_eq!(skip(&[0xD5, 0x01, 0xAA, 0xBB]).unwrap(), 4);
        assert_eq!(skip(&[0xC7, 0x00, 0x01]).unwrap(), 3);
    }

    #[test]
    fn empty_containers_complete_immediately() {
        assert_eq!(skip(&[0x90, 0xC0]).unwrap(), 1);
        assert_eq!(skip(&[0x80]).unwrap(), 1);
        assert_eq!(skip(&[0x92, 0x90, 0x80, 0xC0]).unwrap(), 3);
        assert_eq!(skip(&[0xDC, 0x00, 0x00]).unwrap(), 3);
    }

    #[test]
    fn nested_maps_count_keys_and_values() {
        // {1: {2: [3, 4]}, 5: "x"}
        let bytes = [0x82, 0x01, 0x81, 0x02, 0x92, 0x03, 0x04, 0x05, 0xA1, b'x', 0xC3];
        assert_eq!(skip(&bytes).unwrap(), 10);
    }

    #[test]
    fn mixed_array16_matches_component_lengths() {
        let mut buf = Vec::new();
        let mut expected = write_array16_header(&mut buf, 20).unwrap();
        for i in 0..20i64 {
            expected += match i % 5 {
                0 => write_i64(&mut buf, i).unwrap(),
                1 => write_string(&mut buf, &"s".repeat(i as usize * 3)).unwrap(),
                2 => {
                    let n = write_map_header(&mut buf, 1).unwrap();
                    n + write_string(&mut buf, "k").unwrap() + write_i64(&mut buf, -i * 1000).unwrap()
                }
                3 => write_binary(&mut buf, &[7; 40]).unwrap(),
                _ => write_extension(&mut buf, 3, &[1, 2, 3]).unwrap(),
            };
        }
        assert_eq!(expected, buf.len());
        buf.push(0xC0);
        assert_eq!(skip(&buf).unwrap(), expected);

        let segments = Segments::from_slices(buf.chunks(1));
        assert_eq!(skip_token(&segments.as_source()).unwrap(), expected);
    }

    #[test]
    fn deep_nesting_uses_no_recursion() {
        let depth = 100_000;
        let mut buf = vec![0x91; depth];
        buf.push(0x01);
        assert_eq!(skip(&buf).unwrap(), depth + 1);
    }

    #[test]
    fn reserved_tag_is_rejected_at_any_depth() {
        assert_eq!(skip(&[0xC1]).unwrap_err().kind(), ErrorKind::InvalidDataCode);
        assert_eq!(skip(&[0x92, 0x01, 0xC1]).unwrap_err().kind(), ErrorKind::InvalidDataCode);
        assert_eq!(skip(&[0x81, 0xC1, 0x01]).unwrap_err().kind(), ErrorKind::InvalidDataCode);
    }

    #[test]
    fn empty_and_truncated_input() {
        assert_eq!(skip(&[]).unwrap_err().kind(), ErrorKind::EmptyInput);
        assert_eq!(skip(&[0x92, 0x01]).unwrap_err().kind(), ErrorKind::UnexpectedEndOfInput);
        assert_eq!(skip(&[0xA3, b'a']).unwrap_err().kind(), ErrorKind::UnexpectedEndOfInput);
        assert_eq!(skip(&[0xDC, 0x00]).unwrap_err().kind(), ErrorKind::UnexpectedEndOfInput);
        assert!(matches!(
            skip(&[0x91, 0xCD, 0x01]).unwrap_err(),
            MsgPackError::UnexpectedEndOfInput {
                needed: 4,
                available: 3
            }
        ));
        assert_eq!(try_skip_token(&&[0x91u8][..]), None);
    }

    #[test]
    fn scanner_resumes_across_growing_input() {
        let mut scanner = TokenScanner::new();
        let data = [0x93u8, 0x01, 0xCD, 0x01, 0x00, 0x03, 0xC0];

        assert_eq!(scanner.scan(&&data[..0]).unwrap(), None);
        assert_eq!(scanner.needed(), 1);

        assert_eq!(scanner.scan(&&data[..2]).unwrap(), None);
        assert_eq!(scanner.consumed(), 2);
        assert_eq!(scanner.needed(), 3);

        // uint16 header seen but its payload is short
        assert_eq!(scanner.scan(&&data[..4]).unwrap(), None);
        assert_eq!(scanner.consumed(), 2);
        assert_eq!(scanner.needed(), 5);

        assert_eq!(scanner.scan(&&data[..5]).unwrap(), None);
        assert_eq!(scanner.consumed(), 5);

        let segments = Segments::from_slices([&data[..3], &data[3..]]);
        assert_eq!(scanner.scan(&segments.as_source()).unwrap(), Some(6));
        assert_eq!(scanner.scan(&segments.as_source()).unwrap(), Some(6));

        scanner.reset();
        assert_eq!(scanner.scan(&&data[6..]).unwrap(), Some(1));
    }

    #[test]
    fn scanner_reports_declared_payload_up_front() {
        let mut scanner = TokenScanner::new();
        let header: &[u8] = &[0xC6, 0x7F, 0xFF, 0xFF, 0xFF, 0x00];
        assert_eq!(scanner.scan(&header).unwrap(), None);
        assert_eq!(scanner.needed(), 5 + 0x7FFF_FFFF);

        let mut scanner = TokenScanner::new();
        let bad: &[u8] = &[0x92, 0xC1];
        assert_eq!(scanner.scan(&bad).unwrap_err().kind(), ErrorKind::InvalidDataCode);
    }

    #[test]
    fn read_and_copy_token() {
        let mut buf = Vec::new();
        write_map_header(&mut buf, 1).unwrap();
        write_string(&mut buf, "id").unwrap();
        write_u64(&mut buf, 1 << 40).unwrap();
        let len = buf.len();
        buf.extend_from_slice(&[0xC3, 0xC2]);

        let src: &[u8] = &buf;
        assert_eq!(read_token(&src).unwrap(), &buf[..len]);

        let segments = Segments::from_slices(buf.chunks(2));
        let pool = BufferPool::new();
        let token = copy_token(&segments.as_source(), &pool).unwrap();
        assert_eq!(&token[..], &buf[..len]);
    }
}
