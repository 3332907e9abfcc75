//! The timestamp extension (type id -1).
//!
//! Three wire layouts exist:
//!
//! - **timestamp 32**: fixext4, seconds as u32, no fractional part
//! - **timestamp 64**: fixext8, 30-bit nanoseconds over 34-bit seconds
//! - **timestamp 96**: ext8 of length 12, u32 nanoseconds then i64 seconds

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::header::read_extension_header;
use super::payload::write_extension;
use super::put_tagged;
use crate::error::{MsgPackError, Result};
use crate::format::{code, len, DataFamily};
use crate::sink::ByteSink;
use crate::source::ByteSource;

/// Extension type id reserved for timestamps.
pub const TIMESTAMP_TYPE: i8 = -1;

const MAX_NANOSECONDS: u32 = 999_999_999;
const NANOS_PER_SECOND: u32 = 1_000_000_000;
const SECONDS_MASK_64: u64 = 0x0000_0003_FFFF_FFFF;

/// A point in time as seconds and nanoseconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    seconds: i64,
    nanoseconds: u32,
}

impl Timestamp {
    pub const UNIX_EPOCH: Timestamp = Timestamp {
        seconds: 0,
        nanoseconds: 0,
    };

    /// Fails with [`MsgPackError::ValueOutOfRange`] if `nanoseconds` exceeds 999 999 999.
    pub fn new(seconds: i64, nanoseconds: u32) -> Result<Self> {
        if nanoseconds > MAX_NANOSECONDS {
            return Err(MsgPackError::out_of_range(nanoseconds, "timestamp nanoseconds"));
        }
        Ok(Self {
            seconds,
            nanoseconds,
        })
    }

    pub fn from_unix_seconds(seconds: i64) -> Self {
        Self {
            seconds,
            nanoseconds: 0,
        }
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanoseconds(&self) -> u32 {
        self.nanoseconds
    }

    /// Packs into the timestamp 64 layout, or `None` if the seconds need more
    /// than 34 bits.
    pub fn epoch64(&self) -> Option<u64> {
        if self.seconds >> 34 != 0 {
            return None;
        }
        Some((u64::from(self.nanoseconds) << 34) | self.seconds as u64)
    }

    fn from_epoch64(packed: u64) -> Result<Self> {
        let nanoseconds = (packed >> 34) as u32;
        Self::new((packed & SECONDS_MASK_64) as i64, nanoseconds)
    }

    /// Decodes an extension payload of 4, 8 or 12 bytes.
    pub fn from_payload(data: &[u8]) -> Result<Self> {
        if let Ok(seconds) = <[u8; 4]>::try_from(data) {
            return Ok(Self::from_unix_seconds(i64::from(u32::from_be_bytes(seconds))));
        }
        if let Ok(packed) = <[u8; 8]>::try_from(data) {
            return Self::from_epoch64(u64::from_be_bytes(packed));
        }
        match <[u8; 12]>::try_from(data) {
            Ok(raw) => {
                let [n0, n1, n2, n3, seconds @ ..] = raw;
                Self::new(i64::from_be_bytes(seconds), u32::from_be_bytes([n0, n1, n2, n3]))
            }
            Err(_) => Err(MsgPackError::LengthMismatch {
                expected: 12,
                actual: data.len(),
            }),
        }
    }

    /// Encodes the smallest extension payload for this timestamp.
    pub fn to_payload(&self) -> Vec<u8> {
        let (buf, len) = self.payload();
        buf[..len].to_vec()
    }

    fn payload(&self) -> ([u8; 12], usize) {
        let mut buf = [0u8; 12];
        let len = match self.epoch64() {
            Some(packed) if packed >> 32 == 0 => {
                buf[..4].copy_from_slice(&(packed as u32).to_be_bytes());
                4
            }
            Some(packed) => {
                buf[..8].copy_from_slice(&packed.to_be_bytes());
                8
            }
            None => {
                buf[..4].copy_from_slice(&self.nanoseconds.to_be_bytes());
                buf[4..].copy_from_slice(&self.seconds.to_be_bytes());
                12
            }
        };
        (buf, len)
    }

    /// Converts to a `SystemTime`, or `None` if it cannot be represented.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        let nanos = Duration::from_nanos(u64::from(self.nanoseconds));
        let base = if self.seconds >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(self.seconds as u64))?
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(self.seconds.unsigned_abs()))?
        };
        base.checked_add(nanos)
    }
}

impl TryFrom<SystemTime> for Timestamp {
    type Error = MsgPackError;

    fn try_from(time: SystemTime) -> Result<Self> {
        let out_of_range = |secs: u64| MsgPackError::out_of_range(secs, "timestamp seconds");
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => {
                let secs = after.as_secs();
                let seconds = i64::try_from(secs).map_err(|_| out_of_range(secs))?;
                Self::new(seconds, after.subsec_nanos())
            }
            Err(e) => {
                let before = e.duration();
                let secs = before.as_secs();
                let whole = i64::try_from(secs).map_err(|_| out_of_range(secs))?;
                match before.subsec_nanos() {
                    0 => Self::new(-whole, 0),
                    n => Self::new(-whole - 1, NANOS_PER_SECOND - n),
                }
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanoseconds)
    }
}

/// Writes the 32-bit layout. The seconds must fit in a `u32` and the
/// nanoseconds must be zero.
pub fn write_timestamp32<W: ByteSink + ?Sized>(sink: &mut W, ts: &Timestamp) -> Result<usize> {
    let seconds = u32::try_from(ts.seconds)
        .map_err(|_| MsgPackError::out_of_range(ts.seconds, "timestamp 32 seconds"))?;
    if ts.nanoseconds != 0 {
        return Err(MsgPackError::out_of_range(ts.nanoseconds, "timestamp 32 nanoseconds"));
    }
    let [a, b, c, d] = seconds.to_be_bytes();
    put_tagged(sink, code::FIX_EXT_4, [TIMESTAMP_TYPE as u8, a, b, c, d])
}

/// Writes the 64-bit layout. The seconds must fit in 34 unsigned bits.
pub fn write_timestamp64<W: ByteSink + ?Sized>(sink: &mut W, ts: &Timestamp) -> Result<usize> {
    let packed = ts
        .epoch64()
        .ok_or_else(|| MsgPackError::out_of_range(ts.seconds, "timestamp 64 seconds"))?;
    let [a, b, c, d, e, f, g, h] = packed.to_be_bytes();
    put_tagged(sink, code::FIX_EXT_8, [TIMESTAMP_TYPE as u8, a, b, c, d, e, f, g, h])
}

/// Writes the 96-bit layout, which holds any [`Timestamp`].
pub fn write_timestamp96<W: ByteSink + ?Sized>(sink: &mut W, ts: &Timestamp) -> Result<usize> {
    let mut payload = [0u8; len::TIMESTAMP_96 - 1];
    payload[0] = 12;
    payload[1] = TIMESTAMP_TYPE as u8;
    payload[2..6].copy_from_slice(&ts.nanoseconds.to_be_bytes());
    payload[6..].copy_from_slice(&ts.seconds.to_be_bytes());
    put_tagged(sink, code::EXT_8, payload)
}

/// Writes the smallest layout that holds `ts`.
pub fn write_timestamp<W: ByteSink + ?Sized>(sink: &mut W, ts: &Timestamp) -> Result<usize> {
    let (payload, len) = ts.payload();
    write_extension(sink, TIMESTAMP_TYPE, &payload[..len])
}

/// Reads a timestamp in any of the three layouts.
pub fn read_timestamp<S: ByteSource>(src: &S) -> Result<(Timestamp, usize)> {
    let tag = src.peek_first()?;
    if !matches!(tag, code::FIX_EXT_4 | code::FIX_EXT_8 | code::EXT_8) {
        return Err(MsgPackError::wrong_code(tag, DataFamily::Extension));
    }
    let (ext, header_len) = read_extension_header(src)?;
    if ext.type_id != TIMESTAMP_TYPE {
        return Err(MsgPackError::WrongExtensionType {
            expected: TIMESTAMP_TYPE,
            actual: ext.type_id,
        });
    }
    if tag == code::EXT_8 && ext.length != 12 {
        return Err(MsgPackError::LengthMismatch {
            expected: 12,
            actual: ext.length,
        });
    }
    let mut raw = [0u8; 12];
    let payload = &mut raw[..ext.length];
    src.slice(header_len, ext.length)?.fill(payload)?;
    Ok((Timestamp::from_payload(payload)?, header_len + ext.length))
}

pub fn try_write_timestamp<W: ByteSink + ?Sized>(sink: &mut W, ts: &Timestamp) -> Option<usize> {
    write_timestamp(sink, ts).ok()
}

pub fn try_read_timestamp<S: ByteSource>(src: &S) -> Option<(Timestamp, usize)> {
    read_timestamp(src).ok()
}
