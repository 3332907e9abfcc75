//! Tag ↔ (family, size class) lookup.

use std::fmt;

use super::code;
use crate::error::{MsgPackError, Result};

/// High-level type family of a data code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFamily {
    Nil,
    Boolean,
    Integer,
    Float,
    String,
    Binary,
    Array,
    Map,
    Extension,
    /// The reserved tag `0xC1`.
    NeverUsed,
}

/// Size tier of a data code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// Value, count or length is packed into the tag (also nil and booleans).
    Fix,
    Bits8,
    Bits16,
    Bits32,
    Bits64,
    /// Fixed-length extension carrying exactly this many payload bytes.
    FixExt(u8),
}

impl fmt::Display for DataFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Array => "array",
            Self::Map => "map",
            Self::Extension => "extension",
            Self::NeverUsed => "never used",
        };
        f.write_str(name)
    }
}

/// Maps a data code to its family. Never fails; `0xC1` maps to `NeverUsed`.
pub fn data_family(tag: u8) -> DataFamily {
    match tag {
        code::FIX_POSITIVE_MIN..=code::FIX_POSITIVE_MAX => DataFamily::Integer,
        code::FIX_MAP_MIN..=code::FIX_MAP_MAX => DataFamily::Map,
        code::FIX_ARRAY_MIN..=code::FIX_ARRAY_MAX => DataFamily::Array,
        code::FIX_STR_MIN..=code::FIX_STR_MAX => DataFamily::String,
        code::NIL => DataFamily::Nil,
        code::NEVER_USED => DataFamily::NeverUsed,
        code::FALSE | code::TRUE => DataFamily::Boolean,
        code::BIN_8..=code::BIN_32 => DataFamily::Binary,
        code::EXT_8..=code::EXT_32 => DataFamily::Extension,
        code::FLOAT_32 | code::FLOAT_64 => DataFamily::Float,
        code::UINT_8..=code::INT_64 => DataFamily::Integer,
        code::FIX_EXT_1..=code::FIX_EXT_16 => DataFamily::Extension,
        code::STR_8..=code::STR_32 => DataFamily::String,
        code::ARRAY_16 | code::ARRAY_32 => DataFamily::Array,
        code::MAP_16 | code::MAP_32 => DataFamily::Map,
        code::FIX_NEGATIVE_MIN..=code::FIX_NEGATIVE_MAX => DataFamily::Integer,
    }
}

/// Maps a data code to its family and size class.
///
/// Fails with [`MsgPackError::InvalidDataCode`] for the reserved tag.
pub fn range_for(tag: u8) -> Result<(DataFamily, SizeClass)> {
    let family = data_family(tag);
    let size = match tag {
        code::NEVER_USED => return Err(MsgPackError::InvalidDataCode(tag)),
        code::BIN_8 | code::EXT_8 | code::UINT_8 | code::INT_8 | code::STR_8 => SizeClass::Bits8,
        code::BIN_16 | code::EXT_16 | code::UINT_16 | code::INT_16 | code::STR_16 => {
            SizeClass::Bits16
        }
        code::ARRAY_16 | code::MAP_16 => SizeClass::Bits16,
        code::BIN_32 | code::EXT_32 | code::UINT_32 | code::INT_32 | code::STR_32 => {
            SizeClass::Bits32
        }
        code::ARRAY_32 | code::MAP_32 | code::FLOAT_32 => SizeClass::Bits32,
        code::UINT_64 | code::INT_64 | code::FLOAT_64 => SizeClass::Bits64,
        code::FIX_EXT_1 => SizeClass::FixExt(1),
        code::FIX_EXT_2 => SizeClass::FixExt(2),
        code::FIX_EXT_4 => SizeClass::FixExt(4),
        code::FIX_EXT_8 => SizeClass::FixExt(8),
        code::FIX_EXT_16 => SizeClass::FixExt(16),
        _ => SizeClass::Fix,
    };
    Ok((family, size))
}

/// Returns the base tag of a tier.
///
/// For fix tiers this is the lowest tag of the range (the tier's zero value).
/// `Integer` resolves to the unsigned tiers; signed tags are chosen by the
/// integer writers themselves. Returns `None` for combinations the format does
/// not define.
pub fn tag_for(family: DataFamily, size: SizeClass) -> Option<u8> {
    use DataFamily as F;
    use SizeClass as S;

    let tag = match (family, size) {
        (F::Nil, S::Fix) => code::NIL,
        (F::Boolean, S::Fix) => code::FALSE,
        (F::Integer, S::Fix) => code::FIX_POSITIVE_MIN,
        (F::Integer, S::Bits8) => code::UINT_8,
        (F::Integer, S::Bits16) => code::UINT_16,
        (F::Integer, S::Bits32) => code::UINT_32,
        (F::Integer, S::Bits64) => code::UINT_64,
        (F::Float, S::Bits32) => code::FLOAT_32,
        (F::Float, S::Bits64) => code::FLOAT_64,
        (F::String, S::Fix) => code::FIX_STR_MIN,
        (F::String, S::Bits8) => code::STR_8,
        (F::String, S::Bits16) => code::STR_16,
        (F::String, S::Bits32) => code::STR_32,
        (F::Binary, S::Bits8) => code::BIN_8,
        (F::Binary, S::Bits16) => code::BIN_16,
        (F::Binary, S::Bits32) => code::BIN_32,
        (F::Array, S::Fix) => code::FIX_ARRAY_MIN,
        (F::Array, S::Bits16) => code::ARRAY_16,
        (F::Array, S::Bits32) => code::ARRAY_32,
        (F::Map, S::Fix) => code::FIX_MAP_MIN,
        (F::Map, S::Bits16) => code::MAP_16,
        (F::Map, S::Bits32) => code::MAP_32,
        (F::Extension, S::Bits8) => code::EXT_8,
        (F::Extension, S::Bits16) => code::EXT_16,
        (F::Extension, S::Bits32) => code::EXT_32,
        (F::Extension, S::FixExt(1)) => code::FIX_EXT_1,
        (F::Extension, S::FixExt(2)) => code::FIX_EXT_2,
        (F::Extension, S::FixExt(4)) => code::FIX_EXT_4,
        (F::Extension, S::FixExt(8)) => code::FIX_EXT_8,
        (F::Extension, S::FixExt(16)) => code::FIX_EXT_16,
        _ => return None,
    };
    Some(tag)
}

/// Total encoded length of a token whose size is determined by its tag alone.
///
/// Returns `None` for containers and for strings, binaries and extensions with
/// an explicit length field, and for the reserved tag.
pub fn fixed_token_len(tag: u8) -> Option<usize> {
    use super::len;

    let n = match tag {
        code::FIX_POSITIVE_MIN..=code::FIX_POSITIVE_MAX => len::FIX_INT,
        code::FIX_NEGATIVE_MIN..=code::FIX_NEGATIVE_MAX => len::FIX_INT,
        code::FIX_STR_MIN..=code::FIX_STR_MAX => len::FIX_HEADER + usize::from(tag & 0x1F),
        code::NIL => len::NIL,
        code::FALSE | code::TRUE => len::BOOLEAN,
        code::FLOAT_32 => len::FLOAT_32,
        code::FLOAT_64 => len::FLOAT_64,
        code::UINT_8 => len::UINT_8,
        code::UINT_16 => len::UINT_16,
        code::UINT_32 => len::UINT_32,
        code::UINT_64 => len::UINT_64,
        code::INT_8 => len::INT_8,
        code::INT_16 => len::INT_16,
        code::INT_32 => len::INT_32,
        code::INT_64 => len::INT_64,
        code::FIX_EXT_1 => len::FIX_EXT_HEADER + 1,
        code::FIX_EXT_2 => len::FIX_EXT_HEADER + 2,
        code::FIX_EXT_4 => len::FIX_EXT_HEADER + 4,
        code::FIX_EXT_8 => len::FIX_EXT_HEADER + 8,
        code::FIX_EXT_16 => len::FIX_EXT_HEADER + 16,
        _ => return None,
    };
    Some(n)
}
