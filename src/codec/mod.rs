//! Primitive readers and writers for every MessagePack token.
//!
//! Writers take a [`ByteSink`] and return the number of bytes written; a
//! failed write leaves the sink as it was. Readers take a
//! [`ByteSource`](crate::source::ByteSource), never advance it and return the
//! decoded value together with the number of bytes it occupied.

pub mod header;
pub mod payload;
pub mod scalar;
pub mod timestamp;
pub mod token;

pub use header::*;
pub use payload::*;
pub use scalar::*;
pub use timestamp::*;
pub use token::*;

use crate::error::Result;
use crate::sink::ByteSink;

/// Writes a tag byte followed by a fixed-size big-endian payload.
pub(crate) fn put_tagged<W: ByteSink + ?Sized, const N: usize>(
    sink: &mut W,
    tag: u8,
    payload: [u8; N],
) -> Result<usize> {
    let out = sink.claim(1 + N)?;
    out[0] = tag;
    out[1..].copy_from_slice(&payload);
    Ok(1 + N)
}
