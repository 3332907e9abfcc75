//! MessagePack format catalog: data codes, families and size classes.
//!
//! The wire format is fixed by the MessagePack specification; everything in
//! here is pure constant lookup. All multi-byte fields are big-endian.

mod catalog;
pub mod code;

pub use catalog::{data_family, fixed_token_len, range_for, tag_for, DataFamily, SizeClass};

/// Encoded lengths (tag included) of fixed-size tokens and headers.
pub mod len {
    pub const NIL: usize = 1;
    pub const BOOLEAN: usize = 1;
    pub const FIX_INT: usize = 1;
    pub const UINT_8: usize = 2;
    pub const UINT_16: usize = 3;
    pub const UINT_32: usize = 5;
    pub const UINT_64: usize = 9;
    pub const INT_8: usize = 2;
    pub const INT_16: usize = 3;
    pub const INT_32: usize = 5;
    pub const INT_64: usize = 9;
    pub const FLOAT_32: usize = 5;
    pub const FLOAT_64: usize = 9;

    pub const FIX_HEADER: usize = 1;
    pub const HEADER_8: usize = 2;
    pub const HEADER_16: usize = 3;
    pub const HEADER_32: usize = 5;

    pub const FIX_EXT_HEADER: usize = 2;
    pub const EXT_8_HEADER: usize = 3;
    pub const EXT_16_HEADER: usize = 4;
    pub const EXT_32_HEADER: usize = 6;

    pub const TIMESTAMP_32: usize = 6;
    pub const TIMESTAMP_64: usize = 10;
    pub const TIMESTAMP_96: usize = 15;
}
