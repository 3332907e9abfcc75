//! Array, map, string, binary and extension headers.
//!
//! Every header family has a fix tier (count or length packed into the tag)
//! and/or 8/16/32-bit tiers. The `write_*_header` functions choose the
//! smallest tier; the tier-specific writers are there for callers that need a
//! stable field width. Readers accept every tier of their family.

use crate::error::{MsgPackError, Result};
use crate::format::{code, len, DataFamily};
use crate::sink::ByteSink;
use crate::source::ByteSource;

/// Type id and payload length of an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionHeader {
    pub type_id: i8,
    pub length: usize,
}

/// An encoded header, staged on the stack so the header and its payload can be
/// claimed from the sink in one call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header {
    bytes: [u8; len::EXT_32_HEADER],
    len: usize,
}

impl Header {
    fn fix(tag: u8) -> Self {
        Self::from_parts(tag, &[])
    }

    fn from_parts(tag: u8, rest: &[u8]) -> Self {
        let mut bytes = [0u8; len::EXT_32_HEADER];
        bytes[0] = tag;
        bytes[1..=rest.len()].copy_from_slice(rest);
        Self {
            bytes,
            len: 1 + rest.len(),
        }
    }

    fn with_type(mut self, type_id: i8) -> Self {
        self.bytes[self.len] = type_id as u8;
        self.len += 1;
        self
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

fn too_long(length: usize) -> MsgPackError {
    MsgPackError::LengthOverflow(length as u64)
}

/// Converts a 32-bit wire length. No slice or allocation can exceed
/// `isize::MAX` bytes, so larger lengths are rejected on 32-bit targets.
fn length32(value: u32) -> Result<usize> {
    match usize::try_from(value) {
        Ok(n) if n <= isize::MAX as usize => Ok(n),
        _ => Err(MsgPackError::LengthOverflow(u64::from(value))),
    }
}

// -- Header staging --

pub(crate) fn array_header(count: usize) -> Result<Header> {
    if count <= code::FIX_ARRAY_MAX_LEN {
        Ok(Header::fix(code::FIX_ARRAY_MIN | count as u8))
    } else if let Ok(n) = u16::try_from(count) {
        Ok(Header::from_parts(code::ARRAY_16, &n.to_be_bytes()))
    } else if let Ok(n) = u32::try_from(count) {
        Ok(Header::from_parts(code::ARRAY_32, &n.to_be_bytes()))
    } else {
        Err(too_long(count))
    }
}

pub(crate) fn map_header(count: usize) -> Result<Header> {
    if count <= code::FIX_MAP_MAX_LEN {
        Ok(Header::fix(code::FIX_MAP_MIN | count as u8))
    } else if let Ok(n) = u16::try_from(count) {
        Ok(Header::from_parts(code::MAP_16, &n.to_be_bytes()))
    } else if let Ok(n) = u32::try_from(count) {
        Ok(Header::from_parts(code::MAP_32, &n.to_be_bytes()))
    } else {
        Err(too_long(count))
    }
}

/// Stages a string header for a payload of `length` UTF-8 bytes.
pub(crate) fn string_header(length: usize) -> Result<Header> {
    if length <= code::FIX_STR_MAX_LEN {
        Ok(Header::fix(code::FIX_STR_MIN | length as u8))
    } else if let Ok(n) = u8::try_from(length) {
        Ok(Header::from_parts(code::STR_8, &[n]))
    } else if let Ok(n) = u16::try_from(length) {
        Ok(Header::from_parts(code::STR_16, &n.to_be_bytes()))
    } else if let Ok(n) = u32::try_from(length) {
        Ok(Header::from_parts(code::STR_32, &n.to_be_bytes()))
    } else {
        Err(too_long(length))
    }
}

pub(crate) fn binary_header(length: usize) -> Result<Header> {
    if let Ok(n) = u8::try_from(length) {
        Ok(Header::from_parts(code::BIN_8, &[n]))
    } else if let Ok(n) = u16::try_from(length) {
        Ok(Header::from_parts(code::BIN_16, &n.to_be_bytes()))
    } else if let Ok(n) = u32::try_from(length) {
        Ok(Header::from_parts(code::BIN_32, &n.to_be_bytes()))
    } else {
        Err(too_long(length))
    }
}

/// Fixed extension tag for a payload of exactly `length` bytes, if one exists.
pub(crate) fn fix_extension_code(length: usize) -> Option<u8> {
    match length {
        1 => Some(code::FIX_EXT_1),
        2 => Some(code::FIX_EXT_2),
        4 => Some(code::FIX_EXT_4),
        8 => Some(code::FIX_EXT_8),
        16 => Some(code::FIX_EXT_16),
        _ => None,
    }
}

pub(crate) fn fix_extension_header(tag: u8, type_id: i8) -> Header {
    Header::fix(tag).with_type(type_id)
}

pub(crate) fn extension8_header(type_id: i8, length: usize) -> Result<Header> {
    let n = u8::try_from(length).map_err(|_| too_long(length))?;
    Ok(Header::from_parts(code::EXT_8, &[n]).with_type(type_id))
}

pub(crate) fn extension16_header(type_id: i8, length: usize) -> Result<Header> {
    let n = u16::try_from(length).map_err(|_| too_long(length))?;
    Ok(Header::from_parts(code::EXT_16, &n.to_be_bytes()).with_type(type_id))
}

pub(crate) fn extension32_header(type_id: i8, length: usize) -> Result<Header> {
    let n = u32::try_from(length).map_err(|_| too_long(length))?;
    Ok(Header::from_parts(code::EXT_32, &n.to_be_bytes()).with_type(type_id))
}

/// Stages the smallest extension header: a fixext tier when the length matches
/// one exactly, otherwise ext8/16/32.
pub(crate) fn extension_header(type_id: i8, length: usize) -> Result<Header> {
    if let Some(tag) = fix_extension_code(length) {
        Ok(fix_extension_header(tag, type_id))
    } else if length <= usize::from(u8::MAX) {
        extension8_header(type_id, length)
    } else if length <= usize::from(u16::MAX) {
        extension16_header(type_id, length)
    } else {
        extension32_header(type_id, length)
    }
}

// -- Minimal writers --

pub fn write_array_header<W: ByteSink + ?Sized>(sink: &mut W, count: usize) -> Result<usize> {
    sink.put_slice(array_header(count)?.as_bytes())
}

pub fn write_map_header<W: ByteSink + ?Sized>(sink: &mut W, count: usize) -> Result<usize> {
    sink.put_slice(map_header(count)?.as_bytes())
}

pub fn write_string_header<W: ByteSink + ?Sized>(sink: &mut W, length: usize) -> Result<usize> {
    sink.put_slice(string_header(length)?.as_bytes())
}

pub fn write_binary_header<W: ByteSink + ?Sized>(sink: &mut W, length: usize) -> Result<usize> {
    sink.put_slice(binary_header(length)?.as_bytes())
}

pub fn write_extension_header<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    length: usize,
) -> Result<usize> {
    sink.put_slice(extension_header(type_id, length)?.as_bytes())
}

// -- Tier-specific writers --

pub fn write_fix_array_header<W: ByteSink + ?Sized>(sink: &mut W, count: u8) -> Result<usize> {
    if usize::from(count) > code::FIX_ARRAY_MAX_LEN {
        return Err(MsgPackError::out_of_range(count, "fixarray length"));
    }
    sink.put_slice(&[code::FIX_ARRAY_MIN | count])
}

pub fn write_array16_header<W: ByteSink + ?Sized>(sink: &mut W, count: u16) -> Result<usize> {
    sink.put_slice(Header::from_parts(code::ARRAY_16, &count.to_be_bytes()).as_bytes())
}

pub fn write_array32_header<W: ByteSink + ?Sized>(sink: &mut W, count: u32) -> Result<usize> {
    sink.put_slice(Header::from_parts(code::ARRAY_32, &count.to_be_bytes()).as_bytes())
}

pub fn write_fix_map_header<W: ByteSink + ?Sized>(sink: &mut W, count: u8) -> Result<usize> {
    if usize::from(count) > code::FIX_MAP_MAX_LEN {
        return Err(MsgPackError::out_of_range(count, "fixmap length"));
    }
    sink.put_slice(&[code::FIX_MAP_MIN | count])
}

pub fn write_map16_header<W: ByteSink + ?Sized>(sink: &mut W, count: u16) -> Result<usize> {
    sink.put_slice(Header::from_parts(code::MAP_16, &count.to_be_bytes()).as_bytes())
}

pub fn write_map32_header<W: ByteSink + ?Sized>(sink: &mut W, count: u32) -> Result<usize> {
    sink.put_slice(Header::from_parts(code::MAP_32, &count.to_be_bytes()).as_bytes())
}

pub fn write_fix_string_header<W: ByteSink + ?Sized>(sink: &mut W, length: u8) -> Result<usize> {
    if usize::from(length) > code::FIX_STR_MAX_LEN {
        return Err(MsgPackError::out_of_range(length, "fixstr length"));
    }
    sink.put_slice(&[code::FIX_STR_MIN | length])
}

pub fn write_string8_header<W: ByteSink + ?Sized>(sink: &mut W, length: u8) -> Result<usize> {
    sink.put_slice(&[code::STR_8, length])
}

pub fn write_string16_header<W: ByteSink + ?Sized>(sink: &mut W, length: u16) -> Result<usize> {
    sink.put_slice(Header::from_parts(code::STR_16, &length.to_be_bytes()).as_bytes())
}

pub fn write_string32_header<W: ByteSink + ?Sized>(sink: &mut W, length: u32) -> Result<usize> {
    sink.put_slice(Header::from_parts(code::STR_32, &length.to_be_bytes()).as_bytes())
}

pub fn write_binary8_header<W: ByteSink + ?Sized>(sink: &mut W, length: u8) -> Result<usize> {
    sink.put_slice(&[code::BIN_8, length])
}

pub fn write_binary16_header<W: ByteSink + ?Sized>(sink: &mut W, length: u16) -> Result<usize> {
    sink.put_slice(Header::from_parts(code::BIN_16, &length.to_be_bytes()).as_bytes())
}

pub fn write_binary32_header<W: ByteSink + ?Sized>(sink: &mut W, length: u32) -> Result<usize> {
    sink.put_slice(Header::from_parts(code::BIN_32, &length.to_be_bytes()).as_bytes())
}

pub fn write_extension8_header<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    length: u8,
) -> Result<usize> {
    sink.put_slice(extension8_header(type_id, usize::from(length))?.as_bytes())
}

pub fn write_extension16_header<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    length: u16,
) -> Result<usize> {
    sink.put_slice(extension16_header(type_id, usize::from(length))?.as_bytes())
}

pub fn write_extension32_header<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    length: u32,
) -> Result<usize> {
    sink.put_slice(extension32_header(type_id, length32(length)?)?.as_bytes())
}

// -- Readers --

/// Reads an array header; returns the element count and the header length.
pub fn read_array_header<S: ByteSource>(src: &S) -> Result<(usize, usize)> {
    match src.peek_first()? {
        tag @ code::FIX_ARRAY_MIN..=code::FIX_ARRAY_MAX => {
            Ok((usize::from(tag & 0x0F), len::FIX_HEADER))
        }
        code::ARRAY_16 => {
            let [_, a, b] = src.read_array()?;
            Ok((usize::from(u16::from_be_bytes([a, b])), len::HEADER_16))
        }
        code::ARRAY_32 => {
            let [_, rest @ ..] = src.read_array::<{ len::HEADER_32 }>()?;
            Ok((length32(u32::from_be_bytes(rest))?, len::HEADER_32))
        }
        other => Err(MsgPackError::wrong_code(other, DataFamily::Array)),
    }
}

/// Reads a map header; returns the pair count and the header length.
pub fn read_map_header<S: ByteSource>(src: &S) -> Result<(usize, usize)> {
    match src.peek_first()? {
        tag @ code::FIX_MAP_MIN..=code::FIX_MAP_MAX => {
            Ok((usize::from(tag & 0x0F), len::FIX_HEADER))
        }
        code::MAP_16 => {
            let [_, a, b] = src.read_array()?;
            Ok((usize::from(u16::from_be_bytes([a, b])), len::HEADER_16))
        }
        code::MAP_32 => {
            let [_, rest @ ..] = src.read_array::<{ len::HEADER_32 }>()?;
            Ok((length32(u32::from_be_bytes(rest))?, len::HEADER_32))
        }
        other => Err(MsgPackError::wrong_code(other, DataFamily::Map)),
    }
}

/// Reads a string header; returns the payload byte length and the header length.
pub fn read_string_header<S: ByteSource>(src: &S) -> Result<(usize, usize)> {
    match src.peek_first()? {
        tag @ code::FIX_STR_MIN..=code::FIX_STR_MAX => {
            Ok((usize::from(tag & 0x1F), len::FIX_HEADER))
        }
        code::STR_8 => {
            let [_, n] = src.read_array()?;
            Ok((usize::from(n), len::HEADER_8))
        }
        code::STR_16 => {
            let [_, a, b] = src.read_array()?;
            Ok((usize::from(u16::from_be_bytes([a, b])), len::HEADER_16))
        }
        code::STR_32 => {
            let [_, rest @ ..] = src.read_array::<{ len::HEADER_32 }>()?;
            Ok((length32(u32::from_be_bytes(rest))?, len::HEADER_32))
        }
        other => Err(MsgPackError::wrong_code(other, DataFamily::String)),
    }
}

/// Reads a binary header; returns the payload length and the header length.
pub fn read_binary_header<S: ByteSource>(src: &S) -> Result<(usize, usize)> {
    match src.peek_first()? {
        code::BIN_8 => {
            let [_, n] = src.read_array()?;
            Ok((usize::from(n), len::HEADER_8))
        }
        code::BIN_16 => {
            let [_, a, b] = src.read_array()?;
            Ok((usize::from(u16::from_be_bytes([a, b])), len::HEADER_16))
        }
        code::BIN_32 => {
            let [_, rest @ ..] = src.read_array::<{ len::HEADER_32 }>()?;
            Ok((length32(u32::from_be_bytes(rest))?, len::HEADER_32))
        }
        other => Err(MsgPackError::wrong_code(other, DataFamily::Binary)),
    }
}

/// Reads any extension header, fixed or variable.
pub fn read_extension_header<S: ByteSource>(src: &S) -> Result<(ExtensionHeader, usize)> {
    let tag = src.peek_first()?;
    let (type_id, length, header_len) = match tag {
        code::FIX_EXT_1 | code::FIX_EXT_2 | code::FIX_EXT_4 | code::FIX_EXT_8 | code::FIX_EXT_16 => {
            let [_, t] = src.read_array()?;
            let length = 1usize << (tag - code::FIX_EXT_1);
            (t, length, len::FIX_EXT_HEADER)
        }
        code::EXT_8 => {
            let [_, n, t] = src.read_array()?;
            (t, usize::from(n), len::EXT_8_HEADER)
        }
        code::EXT_16 => {
            let [_, a, b, t] = src.read_array()?;
            (t, usize::from(u16::from_be_bytes([a, b])), len::EXT_16_HEADER)
        }
        code::EXT_32 => {
            let [_, a, b, c, d, t] = src.read_array()?;
            (t, length32(u32::from_be_bytes([a, b, c, d]))?, len::EXT_32_HEADER)
        }
        other => return Err(MsgPackError::wrong_code(other, DataFamily::Extension)),
    };
    let header = ExtensionHeader {
        type_id: type_id as i8,
        length,
    };
    Ok((header, header_len))
}

// -- Non-failing variants --

pub fn try_write_array_header<W: ByteSink + ?Sized>(sink: &mut W, count: usize) -> Option<usize> {
    write_array_header(sink, count).ok()
}

pub fn try_write_map_header<W: ByteSink + ?Sized>(sink: &mut W, count: usize) -> Option<usize> {
    write_map_header(sink, count).ok()
}

pub fn try_write_string_header<W: ByteSink + ?Sized>(sink: &mut W, length: usize) -> Option<usize> {
    write_string_header(sink, length).ok()
}

pub fn try_write_binary_header<W: ByteSink + ?Sized>(sink: &mut W, length: usize) -> Option<usize> {
    write_binary_header(sink, length).ok()
}

pub fn try_write_extension_header<W: ByteSink + ?Sized>(
    sink: &mut W,
    type_id: i8,
    length: usize,
) -> Option<usize> {
    write_extension_header(sink, type_id, length).ok()
}

pub fn try_read_array_header<S: ByteSource>(src: &S) -> Option<(usize, usize)> {
    read_array_header(src).ok()
}

pub fn try_read_map_header<S: ByteSource>(src: &S) -> Option<(usize, usize)> {
    read_map_header(src).ok()
}

pub fn try_read_string_header<S: ByteSource>(src: &S) -> Option<(usize, usize)> {
    read_string_header(src).ok()
}

pub fn try_read_binary_header<S: ByteSource>(src: &S) -> Option<(usize, usize)> {
    read_binary_header(src).ok()
}

pub fn try_read_extension_header<S: ByteSource>(src: &S) -> Option<(ExtensionHeader, usize)> {
    read_extension_header(src).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn staged(header: Result<Header>) -> Vec<u8> {
        header.unwrap().as_bytes().to_vec()
    }

    #[test]
    fn array_and_map_tiers() {
        assert_eq!(staged(array_header(0)), [0x90]);
        assert_eq!(staged(array_header(15)), [0x9F]);
        assert_eq!(staged(array_header(16)), [0xDC, 0x00, 0x10]);
        assert_eq!(staged(array_header(65536)), [0xDD, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(staged(map_header(3)), [0x83]);
        assert_eq!(staged(map_header(300)), [0xDE, 0x01, 0x2C]);
    }

    #[test]
    fn string_tiers_by_byte_length() {
        assert_eq!(staged(string_header(1)), [0xA1]);
        assert_eq!(staged(string_header(31)), [0xBF]);
        assert_eq!(staged(string_header(32)), [0xD9, 0x20]);
        assert_eq!(staged(string_header(256)), [0xDA, 0x01, 0x00]);
        assert_eq!(staged(string_header(70000))[0], code::STR_32);
    }

    #[test]
    fn binary_has_no_fix_tier() {
        assert_eq!(staged(binary_header(0)), [0xC4, 0x00]);
        assert_eq!(staged(binary_header(255)), [0xC4, 0xFF]);
        assert_eq!(staged(binary_header(256)), [0xC5, 0x01, 0x00]);
        assert_eq!(staged(binary_header(65536))[0], code::BIN_32);
    }

    #[test]
    fn extension_tiers() {
        assert_eq!(staged(extension_header(5, 1)), [0xD4, 0x05]);
        assert_eq!(staged(extension_header(-1, 8)), [0xD7, 0xFF]);
        assert_eq!(staged(extension_header(5, 16)), [0xD8, 0x05]);
        assert_eq!(staged(extension_header(5, 3)), [0xC7, 0x03, 0x05]);
        assert_eq!(staged(extension_header(5, 0)), [0xC7, 0x00, 0x05]);
        assert_eq!(staged(extension_header(5, 256)), [0xC8, 0x01, 0x00, 0x05]);
        assert_eq!(
            staged(extension_header(5, 65536)),
            [0xC9, 0x00, 0x01, 0x00, 0x00, 0x05]
        );
    }

    #[test]
    fn read_headers_of_every_tier() {
        let src: &[u8] = &[0x93];
        assert_eq!(read_array_header(&src).unwrap(), (3, 1));
        let src: &[u8] = &[0xDC, 0x00, 0x03];
        assert_eq!(read_array_header(&src).unwrap(), (3, 3));
        let src: &[u8] = &[0xDD, 0x00, 0x00, 0x00, 0x03];
        assert_eq!(read_array_header(&src).unwrap(), (3, 5));

        let src: &[u8] = &[0xDF, 0x00, 0x00, 0x01, 0x00];
        assert_eq!(read_map_header(&src).unwrap(), (256, 5));

        let src: &[u8] = &[0xD9, 0x05];
        assert_eq!(read_string_header(&src).unwrap(), (5, 2));
        let src: &[u8] = &[0xBF];
        assert_eq!(read_string_header(&src).unwrap(), (31, 1));

        let src: &[u8] = &[0xC6, 0x00, 0x00, 0x00, 0x02];
        assert_eq!(read_binary_header(&src).unwrap(), (2, 5));
    }

    #[test]
    fn read_extension_headers() {
        let src: &[u8] = &[0xD6, 0xFF];
        let expected = ExtensionHeader {
            type_id: -1,
            length: 4,
        };
        assert_eq!(read_extension_header(&src).unwrap(), (expected, 2));

        let src: &[u8] = &[0xD8, 0x07];
        assert_eq!(read_extension_header(&src).unwrap().0.length, 16);

        let src: &[u8] = &[0xC9, 0x00, 0x00, 0x01, 0x00, 0x07];
        let expected = ExtensionHeader {
            type_id: 7,
            length: 256,
        };
        assert_eq!(read_extension_header(&src).unwrap(), (expected, 6));
    }

    #[test]
    fn readers_validate_family() {
        let src: &[u8] = &[0x83];
        assert_eq!(read_array_header(&src).unwrap_err().kind(), ErrorKind::WrongDataCode);
        let src: &[u8] = &[0xA1];
        assert_eq!(read_binary_header(&src).unwrap_err().kind(), ErrorKind::WrongDataCode);
        let src: &[u8] = &[0xC4, 0x00];
        assert_eq!(read_string_header(&src).unwrap_err().kind(), ErrorKind::WrongDataCode);
        let src: &[u8] = &[0xC1];
        assert_eq!(read_map_header(&src).unwrap_err().kind(), ErrorKind::InvalidDataCode);
        assert_eq!(
            read_extension_header(&src).unwrap_err().kind(),
            ErrorKind::InvalidDataCode
        );
    }

    #[test]
    fn truncated_headers() {
        let src: &[u8] = &[0xDC, 0x00];
        assert_eq!(read_array_header(&src).unwrap_err().kind(), ErrorKind::UnexpectedEndOfInput);
        let src: &[u8] = &[0xC8, 0x00, 0x01];
        assert_eq!(
            read_extension_header(&src).unwrap_err().kind(),
            ErrorKind::UnexpectedEndOfInput
        );
    }

    #[test]
    fn length32_stays_addressable() {
        assert_eq!(length32(0).unwrap(), 0);
        assert_eq!(length32(0x7FFF_FFFF).unwrap(), 0x7FFF_FFFF);
        let max = length32(u32::MAX);
        if u64::from(u32::MAX) > isize::MAX as u64 {
            assert_eq!(max.unwrap_err().kind(), ErrorKind::LengthOverflow);
        } else {
            assert_eq!(max.unwrap(), u32::MAX as usize);
        }

        let src: &[u8] = &[0xC6, 0xFF, 0xFF, 0xFF, 0xFF];
        let header = read_binary_header(&src);
        if u64::from(u32::MAX) > isize::MAX as u64 {
            assert_eq!(header.unwrap_err().kind(), ErrorKind::LengthOverflow);
        } else {
            assert_eq!(header.unwrap().0, u32::MAX as usize);
        }
    }

    #[test]
    fn tier_specific_writers() {
        let mut buf = Vec::new();
        write_array32_header(&mut buf, 1).unwrap();
        write_map16_header(&mut buf, 2).unwrap();
        write_string8_header(&mut buf, 3).unwrap();
        write_binary16_header(&mut buf, 4).unwrap();
        write_extension32_header(&mut buf, 9, 5).unwrap();
        assert_eq!(
            buf,
            [
                0xDD, 0, 0, 0, 1, // array32
                0xDE, 0, 2, // map16
                0xD9, 3, // str8
                0xC5, 0, 4, // bin16
                0xC9, 0, 0, 0, 5, 9, // ext32
            ]
        );
        assert_eq!(
            write_fix_array_header(&mut buf, 16).unwrap_err().kind(),
            ErrorKind::ValueOutOfRange
        );
        assert_eq!(
            write_fix_string_header(&mut buf, 32).unwrap_err().kind(),
            ErrorKind::ValueOutOfRange
        );
    }

    #[test]
    fn header_writers_respect_capacity() {
        let mut small = [0u8; 2];
        let mut sink = &mut small[..];
        assert_eq!(
            write_map_header(&mut sink, 1000).unwrap_err().kind(),
            ErrorKind::BufferTooSmall
        );
        assert_eq!(try_write_array_header(&mut sink, 1), Some(1));
    }
}
