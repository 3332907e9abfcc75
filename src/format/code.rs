//! MessagePack data code (tag byte) constants.

// Positive fixint: 0x00..=0x7F (value in the tag)
pub const FIX_POSITIVE_MIN: u8 = 0x00;
pub const FIX_POSITIVE_MAX: u8 = 0x7F;

// Fixmap: 0x80..=0x8F (low nibble = pair count 0..15)
pub const FIX_MAP_MIN: u8 = 0x80;
pub const FIX_MAP_MAX: u8 = 0x8F;

// Fixarray: 0x90..=0x9F (low nibble = element count 0..15)
pub const FIX_ARRAY_MIN: u8 = 0x90;
pub const FIX_ARRAY_MAX: u8 = 0x9F;

// Fixstr: 0xA0..=0xBF (low five bits = byte length 0..31)
pub const FIX_STR_MIN: u8 = 0xA0;
pub const FIX_STR_MAX: u8 = 0xBF;

// Nil
pub const NIL: u8 = 0xC0;

// Reserved, never valid on the wire.
pub const NEVER_USED: u8 = 0xC1;

// Boolean
pub const FALSE: u8 = 0xC2;
pub const TRUE: u8 = 0xC3;

// Binary
pub const BIN_8: u8 = 0xC4;
pub const BIN_16: u8 = 0xC5;
pub const BIN_32: u8 = 0xC6;

// Extension (variable length)
pub const EXT_8: u8 = 0xC7;
pub const EXT_16: u8 = 0xC8;
pub const EXT_32: u8 = 0xC9;

// Float (IEEE 754)
pub const FLOAT_32: u8 = 0xCA;
pub const FLOAT_64: u8 = 0xCB;

// Unsigned integers
pub const UINT_8: u8 = 0xCC;
pub const UINT_16: u8 = 0xCD;
pub const UINT_32: u8 = 0xCE;
pub const UINT_64: u8 = 0xCF;

// Signed integers
pub const INT_8: u8 = 0xD0;
pub const INT_16: u8 = 0xD1;
pub const INT_32: u8 = 0xD2;
pub const INT_64: u8 = 0xD3;

// Extension (fixed length)
pub const FIX_EXT_1: u8 = 0xD4;
pub const FIX_EXT_2: u8 = 0xD5;
pub const FIX_EXT_4: u8 = 0xD6;
pub const FIX_EXT_8: u8 = 0xD7;
pub const FIX_EXT_16: u8 = 0xD8;

// String
pub const STR_8: u8 = 0xD9;
pub const STR_16: u8 = 0xDA;
pub const STR_32: u8 = 0xDB;

// Array
pub const ARRAY_16: u8 = 0xDC;
pub const ARRAY_32: u8 = 0xDD;

// Map
pub const MAP_16: u8 = 0xDE;
pub const MAP_32: u8 = 0xDF;

// Negative fixint: 0xE0..=0xFF (-32..=-1)
pub const FIX_NEGATIVE_MIN: u8 = 0xE0;
pub const FIX_NEGATIVE_MAX: u8 = 0xFF;

/// Smallest value representable as a negative fixint.
pub const FIX_NEGATIVE_MIN_VALUE: i8 = -32;

/// Largest count or length that fits in each fix tier.
pub const FIX_MAP_MAX_LEN: usize = (FIX_MAP_MAX - FIX_MAP_MIN) as usize;
pub const FIX_ARRAY_MAX_LEN: usize = (FIX_ARRAY_MAX - FIX_ARRAY_MIN) as usize;
pub const FIX_STR_MAX_LEN: usize = (FIX_STR_MAX - FIX_STR_MIN) as usize;
