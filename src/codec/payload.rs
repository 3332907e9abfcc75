//! String, binary and extension payloads.
//!
//! Writers stage the header on the stack and claim header and payload from
//! the sink in a single call. Owned reads of binary and extension data rent
//! their buffer from a [`BufferPool`]; zero-copy variants are available for
//! contiguous input.

use super::header::{
    self, binary_header, extension_header, read_binary_header, read_extension_header,
    read_string_header, string_header, Header,
};
use crate::error::{MsgPackError, Result};
use crate::format::code;
use crate::pool::{BufferPool, PooledBuf};
use crate::sink::ByteSink;
use crate::source::ByteSource;

/// An extension value whose payload lives in a pooled buffer.
#[derive(Debug, PartialEq)]
pub struct Extension {
    pub type_id: i8,
    pub data: PooledBuf,
}

/// An extension value borrowed from a contiguous source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRef<'a> {
    pub type_id: i8,
    pub data: &'a [u8],
}

fn put_with_header<W: ByteSink + ?Sized>(
    sink: &mut W,
    header: Header,
    payload: &[u8],
) -> Result<usize> {
    let total = header
        .len()
        .checked_add(payload.len())
        .ok_or(MsgPackError::LengthOverflow(payload.len() as u64))?;
    let out = sink.claim(total)?;
    let (head, body) = out.split_at_mut(header.len());
    head.copy_from_slice(header.as_bytes());
    body.copy_from_slice(payload);
    Ok(total)
}

fn token_len(header_len: usize, payload_len: usize) -> Result<usize> {
    header_len
        .checked_add(payload_len)
        .ok_or(MsgPackError::LengthOverflow(payload_len as u64))
}

// -- Strings --

/// Writes `text` as a string; the header tier follows its UTF-8 byte count.
pub fn write_string<W: ByteSink + ?Sized>(sink: &mut W, text: &str) -> Result<usize> {
    put_with_header(sink, string_header(text.len())?, text.as_bytes())
}

/// Writes already-encoded UTF-8 bytes as a string, rejecting invalid text.
pub fn write_string_bytes<W: ByteSink + ?Sized>(sink: &mut W, bytes: &[u8]) -> Result<usize> {
    let text = std::str::from_utf8(bytes)?;
    write_string(sink, text)
}

/// Reads a string into an owned `String`.
pub fn read_string<S: ByteSource>(src: &S) -> Result<(String, usize)> {
    let (length, header_len) = read_string_header(src)?;
    let body = src.slice(header_len, length)?;
    let text = match body.as_contiguous() {
        Some(bytes) => std::str::from_utf8(bytes)?.to_owned(),
        None => {
            let mut bytes = vec![0u8; length];
            body.fill(&mut bytes)?;
            String::from_utf8(bytes).map_err(|e| MsgPackError::from(e.utf8_error()))?
        }
    };
    Ok((text, token_len(header_len, length)?))
}

/// Reads a string without copying.
pub fn read_str(src: &[u8]) -> Result<(&str, usize)> {
    let (length, header_len) = read_string_header(&src)?;
    let body = src.slice(header_len, length)?;
    Ok((std::str::from_utf8(body)?, token_len(header_len, length)?))
}

// -- Binary --

pub fn write_binary<W: ByteSink + ?Sized>(sink: &mut W, bytes: &[u8]) -> Result<usize> {
    put_with_header(sink, binary_header(bytes.len())?, bytes)
}

/// Reads a binary payload into a buffer rented from `pool`.
pub fn read_binary<S: ByteSource>(src: &S, pool: &BufferPool) -> Result<(PooledBuf, usize)> {
    let (length, header_len) = read_binary_header(src)?;
    let body = src.slice(header_len, length)?;
    let mut buf = pool.rent(length);
    body.fill(&mut buf)?;
    Ok((buf, token_len(header_len, length)?))
}

/// Reads a binary payload without copying.
pub fn read_binary_slice(src: &[u8]) -> Result<(&[u8], usize)> {
    let (length, header_len) = read_binary_header(&src)?;
    let body = src.slice(header_len, length)?;
    Ok((body, token_len(header_len, length)?))
}

// -- Extensions --

/// Writes an extension with the smallest header that fits `payload`.
pub fn write_extension<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    put_with_header(sink, extension_header(type_id, payload.len())?, payload)
}

fn write_fix_extension<W: ByteSink + ?Sized>(
    sink: &mut W,
    tag: u8,
    expected: usize,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    if payload.len() != expected {
        return Err(MsgPackError::LengthMismatch {
            expected,
            actual: payload.len(),
        });
    }
    put_with_header(sink, header::fix_extension_header(tag, type_id), payload)
}

pub fn write_fix_extension1<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    write_fix_extension(sink, code::FIX_EXT_1, 1, type_id, payload)
}

pub fn write_fix_extension2<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    write_fix_extension(sink, code::FIX_EXT_2, 2, type_id, payload)
}

pub fn write_fix_extension4<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    write_fix_extension(sink, code::FIX_EXT_4, 4, type_id, payload)
}

pub fn write_fix_extension8<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    write_fix_extension(sink, code::FIX_EXT_8, 8, type_id, payload)
}

pub fn write_fix_extension16<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    write_fix_extension(sink, code::FIX_EXT_16, 16, type_id, payload)
}

pub fn write_extension8<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    put_with_header(sink, header::extension8_header(type_id, payload.len())?, payload)
}

pub fn write_extension16<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    put_with_header(sink, header::extension16_header(type_id, payload.len())?, payload)
}

pub fn write_extension32<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Result<usize> {
    put_with_header(sink, header::extension32_header(type_id, payload.len())?, payload)
}

/// Reads an extension, copying its payload into a buffer rented from `pool`.
pub fn read_extension<S: ByteSource>(src: &S, pool: &BufferPool) -> Result<(Extension, usize)> {
    let (ext, header_len) = read_extension_header(src)?;
    let body = src.slice(header_len, ext.length)?;
    let mut data = pool.rent(ext.length);
    body.fill(&mut data)?;
    let extension = Extension {
        type_id: ext.type_id,
        data,
    };
    Ok((extension, token_len(header_len, ext.length)?))
}

/// Reads an extension without copying its payload.
pub fn read_extension_slice(src: &[u8]) -> Result<(ExtensionRef<'_>, usize)> {
    let (ext, header_len) = read_extension_header(&src)?;
    let data = src.slice(header_len, ext.length)?;
    let extension = ExtensionRef {
        type_id: ext.type_id,
        data,
    };
    Ok((extension, token_len(header_len, ext.length)?))
}

// -- Non-failing variants --

pub fn try_write_string<W: ByteSink + ?Sized>(sink: &mut W, text: &str) -> Option<usize> {
    write_string(sink, text).ok()
}

pub fn try_write_binary<W: ByteSink + ?Sized>(sink: &mut W, bytes: &[u8]) -> Option<usize> {
    write_binary(sink, bytes).ok()
}

pub fn try_write_extension<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    payload: &[u8],
) -> Option<usize> {
    write_extension(sink, type_id, payload).ok()
}

pub fn try_read_string<S: ByteSource>(src: &S) -> Option<(String, usize)> {
    read_string(src).ok()
}

pub fn try_read_binary<S: ByteSource>(src: &S, pool: &BufferPool) -> Option<(PooledBuf, usize)> {
    read_binary(src, pool).ok()
}

pub fn try_read_extension<S: ByteSource>(src: &S, pool: &BufferPool) -> Option<(Extension, usize)> {
    read_extension(src, pool).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::source::Segments;

    #[test]
    fn single_byte_string() {
        let mut buf = Vec::new();
        assert_eq!(write_string(&mut buf, "a").unwrap(), 2);
        assert_eq!(buf, [0xA1, 0x61]);
    }

    #[test]
    fn string_tier_follows_byte_count() {
        // 11 characters, 33 UTF-8 bytes.
        let text = "日本語日本語日本語日本";
        assert_eq!(text.len(), 33);
        let mut buf = Vec::new();
        let n = write_string(&mut buf, text).unwrap();
        assert_eq!(buf[0], code::STR_8);
        assert_eq!(usize::from(buf[1]), text.len());
        assert_eq!(n, 2 + text.len());

        let src: &[u8] = &buf;
        assert_eq!(read_string(&src).unwrap(), (text.to_owned(), n));
        assert_eq!(read_str(&buf).unwrap(), (text, n));
    }

    #[test]
    fn string_bytes_must_be_utf8() {
        let mut buf = Vec::new();
        let err = write_string_bytes(&mut buf, &[0x61, 0xFE]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidText);
        assert!(buf.is_empty());
        assert_eq!(write_string_bytes(&mut buf, b"ok").unwrap(), 3);
    }

    #[test]
    fn read_string_rejects_invalid_utf8() {
        let src: &[u8] = &[0xA2, 0xC3, 0x28];
        assert_eq!(read_string(&src).unwrap_err().kind(), ErrorKind::InvalidText);
        assert_eq!(read_str(src).unwrap_err().kind(), ErrorKind::InvalidText);
    }

    #[test]
    fn read_string_over_chunks() {
        let mut buf = Vec::new();
        write_string(&mut buf, "hello, chunked world").unwrap();
        let segments = Segments::from_slices(buf.chunks(3));
        let (text, n) = read_string(&segments.as_source()).unwrap();
        assert_eq!(text, "hello, chunked world");
        assert_eq!(n, buf.len());
    }

    #[test]
    fn truncated_payload() {
        let src: &[u8] = &[0xA5, b'a', b'b'];
        assert_eq!(read_string(&src).unwrap_err().kind(), ErrorKind::UnexpectedEndOfInput);
        let src: &[u8] = &[0xC4, 0x04, 1, 2];
        assert_eq!(
            read_binary(&src, &BufferPool::new()).unwrap_err().kind(),
            ErrorKind::UnexpectedEndOfInput
        );
    }

    #[test]
    fn binary_round_trip_through_pool() {
        let pool = BufferPool::new();
        let payload: Vec<u8> = (0..=255).chain(0..10).collect();
        let mut buf = Vec::new();
        let n = write_binary(&mut buf, &payload).unwrap();
        assert_eq!(&buf[..3], &[0xC5, 0x01, 0x0A]);

        let src: &[u8] = &buf;
        let (data, read) = read_binary(&src, &pool).unwrap();
        assert_eq!(read, n);
        assert_eq!(&data[..], &payload[..]);
        data.release();
        assert_eq!(pool.available(), 1);

        assert_eq!(read_binary_slice(&buf).unwrap(), (&payload[..], n));
    }

    #[test]
    fn extension_minimal_headers() {
        let mut buf = Vec::new();
        write_extension(&mut buf, 7, &[1, 2, 3, 4]).unwrap();
        assert_eq!(buf, [0xD6, 0x07, 1, 2, 3, 4]);

        buf.clear();
        write_extension(&mut buf, -3, &[9; 3]).unwrap();
        assert_eq!(buf, [0xC7, 0x03, 0xFD, 9, 9, 9]);
    }

    #[test]
    fn fixed_extension_length_must_match() {
        let mut buf = Vec::new();
        let err = write_fix_extension8(&mut buf, 1, &[0; 7]).unwrap_err();
        assert!(matches!(
            err,
            MsgPackError::LengthMismatch {
                expected: 8,
                actual: 7
            }
        ));
        assert!(buf.is_empty());
        assert_eq!(write_fix_extension16(&mut buf, 1, &[0; 16]).unwrap(), 18);
        assert_eq!(buf[0], code::FIX_EXT_16);
    }

    #[test]
    fn variable_extension_tiers() {
        let mut buf = Vec::new();
        assert_eq!(write_extension16(&mut buf, 2, &[5]).unwrap(), 5);
        assert_eq!(buf, [0xC8, 0x00, 0x01, 0x02, 5]);
        let err = write_extension8(&mut buf, 2, &[0; 256]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthOverflow);
    }

    #[test]
    fn extension_readers() {
        let mut buf = Vec::new();
        write_extension32(&mut buf, 42, b"xyz").unwrap();
        let (ext, n) = read_extension_slice(&buf).unwrap();
        assert_eq!(ext, ExtensionRef { type_id: 42, data: b"xyz" });
        assert_eq!(n, 9);

        let segments = Segments::from_slices(buf.chunks(1));
        let (ext, n) = read_extension(&segments.as_source(), BufferPool::shared()).unwrap();
        assert_eq!(ext.type_id, 42);
        assert_eq!(&ext.data[..], b"xyz");
        assert_eq!(n, 9);
    }

    #[test]
    fn payload_write_is_all_or_nothing() {
        let mut small = [0u8; 4];
        let mut sink = &mut small[..];
        assert_eq!(try_write_binary(&mut sink, &[1, 2, 3]), None);
        assert_eq!(sink.remaining_capacity(), 4);
        assert_eq!(try_write_string(&mut sink, "abc"), Some(4));
        assert_eq!(small, [0xA3, b'a', b'b', b'c']);
    }
}
