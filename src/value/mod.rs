//! Dynamic MessagePack values.
//!
//! [`Value`] mirrors the wire format's type families one to one. Encoding is
//! always minimal; decoding accepts any tier and is depth-limited by
//! [`DecodeOptions`].

mod decode;
mod encode;

pub use decode::{read_value, read_value_with, DecodeOptions, DEFAULT_MAX_DEPTH};
pub use encode::write_value;

use std::fmt;

use crate::codec::{Timestamp, TIMESTAMP_TYPE};

/// Any MessagePack value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    /// Every integer that fits in `i64`, whatever tier it was read from.
    Integer(i64),
    /// Only used for integers above `i64::MAX`.
    UInteger(u64),
    F32(f32),
    F64(f64),
    String(String),
    Binary(Vec<u8>),
    Array(Vec<Value>),
    /// Key/value pairs in wire order. Keys may be any value and may repeat.
    Map(Vec<(Value, Value)>),
    Extension(i8, Vec<u8>),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns the value as a string reference, if it is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an i64, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::UInteger(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(i) => u64::try_from(*i).ok(),
            Self::UInteger(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up the first entry whose key is the string `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Interprets a timestamp extension, if this is one.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Extension(TIMESTAMP_TYPE, data) => Timestamp::from_payload(data).ok(),
            _ => None,
        }
    }
}

// -- Convenience conversions --

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Self::Integer(i),
            Err(_) => Self::UInteger(u),
        }
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::F32(f)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::F64(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(entries: Vec<(Value, Value)>) -> Self {
        Self::Map(entries)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Self::Extension(TIMESTAMP_TYPE, ts.to_payload())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::UInteger(u) => write!(f, "{u}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::Extension(type_id, data) => write!(f, "ext({type_id}, <{} bytes>)", data.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let value = Value::Map(vec![
            (Value::from("a"), Value::from(vec![Value::from(1), Value::Nil])),
            (Value::from(true), Value::Binary(vec![1, 2])),
            (Value::from(u64::MAX), Value::Extension(4, vec![0; 3])),
        ]);
        assert_eq!(
            value.to_string(),
            "{\"a\": [1, nil], true: <2 bytes>, 18446744073709551615: ext(4, <3 bytes>)}"
        );
    }

    #[test]
    fn unsigned_conversion_prefers_signed_variant() {
        assert_eq!(Value::from(5u64), Value::Integer(5));
        assert_eq!(Value::from(u64::MAX), Value::UInteger(u64::MAX));
        assert_eq!(Value::UInteger(u64::MAX).as_i64(), None);
        assert_eq!(Value::Integer(-1).as_u64(), None);
    }

    #[test]
    fn map_lookup_by_string_key() {
        let value = Value::from(vec![
            (Value::from(1), Value::from("one")),
            (Value::from("name"), Value::from("msgpack")),
        ]);
        assert_eq!(value.get("name").and_then(Value::as_str), Some("msgpack"));
        assert_eq!(value.get("missing"), None);
    }

    #[test]
    fn timestamp_extension_round_trip() {
        for ts in [
            Timestamp::from_unix_seconds(7),
            Timestamp::new(7, 9).unwrap(),
            Timestamp::new(-7, 9).unwrap(),
        ] {
            let value = Value::from(ts);
            assert_eq!(value.as_timestamp(), Some(ts));
        }
        assert_eq!(Value::Extension(1, vec![0; 4]).as_timestamp(), None);
    }
}
