//! Nil, boolean, integer and float encoding.
//!
//! Writers always pick the narrowest tier that holds the value; the
//! `write_fixed_*` family writes one specific tier regardless. Readers accept
//! any integer tier as long as the decoded value fits the requested type.

use super::put_tagged;
use crate::error::{MsgPackError, Result};
use crate::format::{code, len, DataFamily};
use crate::sink::ByteSink;
use crate::source::ByteSource;

/// A decoded integer, keeping the signedness of the tier it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    Signed(i64),
    Unsigned(u64),
}

impl Integer {
    fn convert<T>(self, target: &'static str) -> Result<T>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        match self {
            Self::Signed(v) => {
                <T as TryFrom<i64>>::try_from(v).map_err(|_| MsgPackError::out_of_range(v, target))
            }
            Self::Unsigned(v) => {
                <T as TryFrom<u64>>::try_from(v).map_err(|_| MsgPackError::out_of_range(v, target))
            }
        }
    }
}

// -- Nil and boolean --

pub fn write_nil<W: ByteSink + ?Sized>(sink: &mut W) -> Result<usize> {
    put_tagged(sink, code::NIL, [])
}

pub fn write_bool<W: ByteSink + ?Sized>(sink: &mut W, value: bool) -> Result<usize> {
    put_tagged(sink, if value { code::TRUE } else { code::FALSE }, [])
}

pub fn read_nil<S: ByteSource>(src: &S) -> Result<usize> {
    match src.peek_first()? {
        code::NIL => Ok(len::NIL),
        other => Err(MsgPackError::wrong_code(other, DataFamily::Nil)),
    }
}

pub fn read_bool<S: ByteSource>(src: &S) -> Result<(bool, usize)> {
    match src.peek_first()? {
        code::FALSE => Ok((false, len::BOOLEAN)),
        code::TRUE => Ok((true, len::BOOLEAN)),
        other => Err(MsgPackError::wrong_code(other, DataFamily::Boolean)),
    }
}

// -- Integers: minimal writers --

/// Encodes an unsigned integer using the smallest possible representation.
pub fn write_u64<W: ByteSink + ?Sized>(sink: &mut W, value: u64) -> Result<usize> {
    if value <= u64::from(code::FIX_POSITIVE_MAX) {
        put_tagged(sink, value as u8, [])
    } else if value <= u64::from(u8::MAX) {
        write_fixed_u8(sink, value as u8)
    } else if value <= u64::from(u16::MAX) {
        write_fixed_u16(sink, value as u16)
    } else if value <= u64::from(u32::MAX) {
        write_fixed_u32(sink, value as u32)
    } else {
        write_fixed_u64(sink, value)
    }
}

/// Encodes a signed integer using the smallest possible representation.
///
/// Non-negative values share the unsigned tiers.
pub fn write_i64<W: ByteSink + ?Sized>(sink: &mut W, value: i64) -> Result<usize> {
    if value >= 0 {
        write_u64(sink, value as u64)
    } else if value >= i64::from(code::FIX_NEGATIVE_MIN_VALUE) {
        put_tagged(sink, value as u8, [])
    } else if value >= i64::from(i8::MIN) {
        write_fixed_i8(sink, value as i8)
    } else if value >= i64::from(i16::MIN) {
        write_fixed_i16(sink, value as i16)
    } else if value >= i64::from(i32::MIN) {
        write_fixed_i32(sink, value as i32)
    } else {
        write_fixed_i64(sink, value)
    }
}

pub fn write_u8<W: ByteSink + ?Sized>(sink: &mut W, value: u8) -> Result<usize> {
    write_u64(sink, u64::from(value))
}

pub fn write_u16<W: ByteSink + ?Sized>(sink: &mut W, value: u16) -> Result<usize> {
    write_u64(sink, u64::from(value))
}

pub fn write_u32<W: ByteSink + ?Sized>(sink: &mut W, value: u32) -> Result<usize> {
    write_u64(sink, u64::from(value))
}

pub fn write_i8<W: ByteSink + ?Sized>(sink: &mut W, value: i8) -> Result<usize> {
    write_i64(sink, i64::from(value))
}

pub fn write_i16<W: ByteSink + ?Sized>(sink: &mut W, value: i16) -> Result<usize> {
    write_i64(sink, i64::from(value))
}

pub fn write_i32<W: ByteSink + ?Sized>(sink: &mut W, value: i32) -> Result<usize> {
    write_i64(sink, i64::from(value))
}

// -- Integers: fixed-tier writers --

/// Writes a positive fixint (0..=127).
pub fn write_positive_fixint<W: ByteSink + ?Sized>(sink: &mut W, value: u8) -> Result<usize> {
    if value > code::FIX_POSITIVE_MAX {
        return Err(MsgPackError::out_of_range(value, "positive fixint"));
    }
    put_tagged(sink, value, [])
}

/// Writes a negative fixint (-32..=-1).
pub fn write_negative_fixint<W: ByteSink + ?Sized>(sink: &mut W, value: i8) -> Result<usize> {
    if !(code::FIX_NEGATIVE_MIN_VALUE..0).contains(&value) {
        return Err(MsgPackError::out_of_range(value, "negative fixint"));
    }
    put_tagged(sink, value as u8, [])
}

pub fn write_fixed_u8<W: ByteSink + ?Sized>(sink: &mut W, value: u8) -> Result<usize> {
    put_tagged(sink, code::UINT_8, [value])
}

pub fn write_fixed_u16<W: ByteSink + ?Sized>(sink: &mut W, value: u16) -> Result<usize> {
    put_tagged(sink, code::UINT_16, value.to_be_bytes())
}

pub fn write_fixed_u32<W: ByteSink + ?Sized>(sink: &mut W, value: u32) -> Result<usize> {
    put_tagged(sink, code::UINT_32, value.to_be_bytes())
}

pub fn write_fixed_u64<W: ByteSink + ?Sized>(sink: &mut W, value: u64) -> Result<usize> {
    put_tagged(sink, code::UINT_64, value.to_be_bytes())
}

pub fn write_fixed_i8<W: ByteSink + ?Sized>(sink: &mut W, value: i8) -> Result<usize> {
    put_tagged(sink, code::INT_8, value.to_be_bytes())
}

pub fn write_fixed_i16<W: ByteSink + ?Sized>(sink: &mut W, value: i16) -> Result<usize> {
    put_tagged(sink, code::INT_16, value.to_be_bytes())
}

pub fn write_fixed_i32<W: ByteSink + ?Sized>(sink: &mut W, value: i32) -> Result<usize> {
    put_tagged(sink, code::INT_32, value.to_be_bytes())
}

pub fn write_fixed_i64<W: ByteSink + ?Sized>(sink: &mut W, value: i64) -> Result<usize> {
    put_tagged(sink, code::INT_64, value.to_be_bytes())
}

// -- Integers: readers --

/// Decodes an integer from any integer tier.
pub fn read_integer<S: ByteSource>(src: &S) -> Result<(Integer, usize)> {
    let tag = src.peek_first()?;
    let value = match tag {
        code::FIX_POSITIVE_MIN..=code::FIX_POSITIVE_MAX => {
            return Ok((Integer::Unsigned(u64::from(tag)), len::FIX_INT));
        }
        code::FIX_NEGATIVE_MIN..=code::FIX_NEGATIVE_MAX => {
            return Ok((Integer::Signed(i64::from(tag as i8)), len::FIX_INT));
        }
        code::UINT_8 => {
            let [_, b] = src.read_array()?;
            (Integer::Unsigned(u64::from(b)), len::UINT_8)
        }
        code::UINT_16 => {
            let [_, rest @ ..] = src.read_array::<{ len::UINT_16 }>()?;
            (Integer::Unsigned(u64::from(u16::from_be_bytes(rest))), len::UINT_16)
        }
        code::UINT_32 => {
            let [_, rest @ ..] = src.read_array::<{ len::UINT_32 }>()?;
            (Integer::Unsigned(u64::from(u32::from_be_bytes(rest))), len::UINT_32)
        }
        code::UINT_64 => {
            let [_, rest @ ..] = src.read_array::<{ len::UINT_64 }>()?;
            (Integer::Unsigned(u64::from_be_bytes(rest)), len::UINT_64)
        }
        code::INT_8 => {
            let [_, b] = src.read_array()?;
            (Integer::Signed(i64::from(b as i8)), len::INT_8)
        }
        code::INT_16 => {
            let [_, rest @ ..] = src.read_array::<{ len::INT_16 }>()?;
            (Integer::Signed(i64::from(i16::from_be_bytes(rest))), len::INT_16)
        }
        code::INT_32 => {
            let [_, rest @ ..] = src.read_array::<{ len::INT_32 }>()?;
            (Integer::Signed(i64::from(i32::from_be_bytes(rest))), len::INT_32)
        }
        code::INT_64 => {
            let [_, rest @ ..] = src.read_array::<{ len::INT_64 }>()?;
            (Integer::Signed(i64::from_be_bytes(rest)), len::INT_64)
        }
        other => return Err(MsgPackError::wrong_code(other, DataFamily::Integer)),
    };
    Ok(value)
}

pub fn read_u8<S: ByteSource>(src: &S) -> Result<(u8, usize)> {
    let (value, n) = read_integer(src)?;
    Ok((value.convert("u8")?, n))
}

pub fn read_u16<S: ByteSource>(src: &S) -> Result<(u16, usize)> {
    let (value, n) = read_integer(src)?;
    Ok((value.convert("u16")?, n))
}

pub fn read_u32<S: ByteSource>(src: &S) -> Result<(u32, usize)> {
    let (value, n) = read_integer(src)?;
    Ok((value.convert("u32")?, n))
}

pub fn read_u64<S: ByteSource>(src: &S) -> Result<(u64, usize)> {
    let (value, n) = read_integer(src)?;
    Ok((value.convert("u64")?, n))
}

pub fn read_i8<S: ByteSource>(src: &S) -> Result<(i8, usize)> {
    let (value, n) = read_integer(src)?;
    Ok((value.convert("i8")?, n))
}

pub fn read_i16<S: ByteSource>(src: &S) -> Result<(i16, usize)> {
    let (value, n) = read_integer(src)?;
    Ok((value.convert("i16")?, n))
}

pub fn read_i32<S: ByteSource>(src: &S) -> Result<(i32, usize)> {
    let (value, n) = read_integer(src)?;
    Ok((value.convert("i32")?, n))
}

pub fn read_i64<S: ByteSource>(src: &S) -> Result<(i64, usize)> {
    let (value, n) = read_integer(src)?;
    Ok((value.convert("i64")?, n))
}

// -- Floats --

pub fn write_f32<W: ByteSink + ?Sized>(sink: &mut W, value: f32) -> Result<usize> {
    put_tagged(sink, code::FLOAT_32, value.to_be_bytes())
}

pub fn write_f64<W: ByteSink + ?Sized>(sink: &mut W, value: f64) -> Result<usize> {
    put_tagged(sink, code::FLOAT_64, value.to_be_bytes())
}

/// Reads a float32. A float64 is rejected rather than silently narrowed.
pub fn read_f32<S: ByteSource>(src: &S) -> Result<(f32, usize)> {
    match src.peek_first()? {
        code::FLOAT_32 => {
            let [_, rest @ ..] = src.read_array::<{ len::FLOAT_32 }>()?;
            Ok((f32::from_be_bytes(rest), len::FLOAT_32))
        }
        other => Err(MsgPackError::wrong_code(other, DataFamily::Float)),
    }
}

/// Reads a float32 or float64 as `f64`.
pub fn read_f64<S: ByteSource>(src: &S) -> Result<(f64, usize)> {
    match src.peek_first()? {
        code::FLOAT_32 => read_f32(src).map(|(v, n)| (f64::from(v), n)),
        code::FLOAT_64 => {
            let [_, rest @ ..] = src.read_array::<{ len::FLOAT_64 }>()?;
            Ok((f64::from_be_bytes(rest), len::FLOAT_64))
        }
        other => Err(MsgPackError::wrong_code(other, DataFamily::Float)),
    }
}

// -- Non-failing variants --

pub fn try_write_nil<W: ByteSink + ?Sized>(sink: &mut W) -> Option<usize> {
    write_nil(sink).ok()
}

pub fn try_write_bool<W: ByteSink + ?Sized>(sink: &mut W, value: bool) -> Option<usize> {
    write_bool(sink, value).ok()
}

pub fn try_write_u64<W: ByteSink + ?Sized>(sink: &mut W, value: u64) -> Option<usize> {
    write_u64(sink, value).ok()
}

pub fn try_write_i64<W: ByteSink + ?Sized>(sink: &mut W, value: i64) -> Option<usize> {
    write_i64(sink, value).ok()
}

pub fn try_write_u8<W: ByteSink + ?Sized>(sink: &mut W, value: u8) -> Option<usize> {
    write_u8(sink, value).ok()
}

pub fn try_write_u16<W: ByteSink + ?Sized>(sink: &mut W, value: u16) -> Option<usize> {
    write_u16(sink, value).ok()
}

pub fn try_write_u32<W: ByteSink + ?Sized>(sink: &mut W, value: u32) -> Option<usize> {
    write_u32(sink, value).ok()
}

pub fn try_write_i8<W: ByteSink + ?Sized>(sink: &mut W, value: i8) -> Option<usize> {
    write_i8(sink, value).ok()
}

pub fn try_write_i16<W: ByteSink + ?Sized>(sink: &mut W, value: i16) -> Option<usize> {
    write_i16(sink, value).ok()
}

pub fn try_write_i32<W: ByteSink + ?Sized>(sink: &mut W, value: i32) -> Option<usize> {
    write_i32(sink, value).ok()
}

pub fn try_write_f32<W: ByteSink + ?Sized>(sink: &mut W, value: f32) -> Option<usize> {
    write_f32(sink, value).ok()
}

pub fn try_write_f64<W: ByteSink + ?Sized>(sink: &mut W, value: f64) -> Option<usize> {
    write_f64(sink, value).ok()
}

pub fn try_read_nil<S: ByteSource>(src: &S) -> Option<usize> {
    read_nil(src).ok()
}

pub fn try_read_bool<S: ByteSource>(src: &S) -> Option<(bool, usize)> {
    read_bool(src).ok()
}

pub fn try_read_u64<S: ByteSource>(src: &S) -> Option<(u64, usize)> {
    read_u64(src).ok()
}

pub fn try_read_i64<S: ByteSource>(src: &S) -> Option<(i64, usize)> {
    read_i64(src).ok()
}

pub fn try_read_integer<S: ByteSource>(src: &S) -> Option<(Integer, usize)> {
    read_integer(src).ok()
}

pub fn try_read_u8<S: ByteSource>(src: &S) -> Option<(u8, usize)> {
    read_u8(src).ok()
}

pub fn try_read_u16<S: ByteSource>(src: &S) -> Option<(u16, usize)> {
    read_u16(src).ok()
}

pub fn try_read_u32<S: ByteSource>(src: &S) -> Option<(u32, usize)> {
    read_u32(src).ok()
}

pub fn try_read_i8<S: ByteSource>(src: &S) -> Option<(i8, usize)> {
    read_i8(src).ok()
}

pub fn try_read_i16<S: ByteSource>(src: &S) -> Option<(i16, usize)> {
    read_i16(src).ok()
}

pub fn try_read_i32<S: ByteSource>(src: &S) -> Option<(i32, usize)> {
    read_i32(src).ok()
}

pub fn try_read_f32<S: ByteSource>(src: &S) -> Option<(f32, usize)> {
    read_f32(src).ok()
}

pub fn try_read_f64<S: ByteSource>(src: &S) -> Option<(f64, usize)> {
    read_f64(src).ok()
}
