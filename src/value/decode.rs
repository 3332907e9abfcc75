//! Bytes → `Value`.

use super::Value;
use crate::codec::{
    read_array_header, read_binary_header, read_bool, read_extension_header, read_f32, read_f64,
    read_integer, read_map_header, read_nil, read_string, Integer,
};
use crate::error::{MsgPackError, Result};
use crate::format::{code, data_family, DataFamily};
use crate::source::ByteSource;

/// Nesting limit applied by [`read_value`].
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Settings for [`read_value_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Maximum number of nested arrays and maps. Deeper input fails with
    /// [`MsgPackError::DepthLimitExceeded`].
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Decodes one value with the default options.
pub fn read_value<S: ByteSource>(src: &S) -> Result<(Value, usize)> {
    read_value_with(src, &DecodeOptions::default())
}

/// Decodes one value; returns it with the number of bytes it occupied.
///
/// Containers are built on an explicit stack, so stack usage does not grow
/// with nesting depth.
pub fn read_value_with<S: ByteSource>(src: &S, options: &DecodeOptions) -> Result<(Value, usize)> {
    let mut open: Vec<Frame> = Vec::new();
    let mut offset = 0usize;

    loop {
        let cursor = src.skip(offset)?;
        let tag = match cursor.peek_first() {
            Ok(tag) => tag,
            // Running out between elements means the container was truncated.
            Err(MsgPackError::EmptyInput) if !open.is_empty() => {
                return Err(MsgPackError::UnexpectedEndOfInput {
                    needed: offset + 1,
                    available: offset,
                });
            }
            Err(e) => return Err(e),
        };

        let (mut value, n) = match data_family(tag) {
            DataFamily::Array => {
                check_depth(options, open.len())?;
                let (count, header) = read_array_header(&cursor)?;
                if count > 0 {
                    let items = Vec::with_capacity(bounded_capacity(&cursor, count, header));
                    open.push(Frame::Array {
                        items,
                        remaining: count,
                    });
                    offset += header;
                    continue;
                }
                (Value::Array(Vec::new()), header)
            }
            DataFamily::Map => {
                check_depth(options, open.len())?;
                let (count, header) = read_map_header(&cursor)?;
                if count > 0 {
                    let entries = Vec::with_capacity(bounded_capacity(&cursor, count, header) / 2);
                    open.push(Frame::Map {
                        entries,
                        key: None,
                        remaining: count,
                    });
                    offset += header;
                    continue;
                }
                (Value::Map(Vec::new()), header)
            }
            _ => decode_leaf(&cursor, tag)?,
        };
        offset += n;

        // Hand the finished value to its parent, closing every container it
        // completes.
        loop {
            let Some(mut frame) = open.pop() else {
                return Ok((value, offset));
            };
            frame.push(value);
            if !frame.is_complete() {
                open.push(frame);
                break;
            }
            value = frame.finish();
        }
    }
}

/// A container whose elements are still being decoded.
enum Frame {
    Array {
        items: Vec<Value>,
        remaining: usize,
    },
    /// `remaining` counts pairs; `key` holds a key waiting for its value.
    Map {
        entries: Vec<(Value, Value)>,
        key: Option<Value>,
        remaining: usize,
    },
}

impl Frame {
    fn push(&mut self, value: Value) {
        match self {
            Self::Array { items, remaining } => {
                items.push(value);
                *remaining -= 1;
            }
            Self::Map {
                entries,
                key,
                remaining,
            } => match key.take() {
                None => *key = Some(value),
                Some(k) => {
                    entries.push((k, value));
                    *remaining -= 1;
                }
            },
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Array { remaining, .. } | Self::Map { remaining, .. } => *remaining == 0,
        }
    }

    fn finish(self) -> Value {
        match self {
            Self::Array { items, .. } => Value::Array(items),
            Self::Map { entries, .. } => Value::Map(entries),
        }
    }
}

/// Decodes any value that is not an array or a map.
fn decode_leaf<S: ByteSource>(src: &S, tag: u8) -> Result<(Value, usize)> {
    match data_family(tag) {
        DataFamily::Nil => Ok((Value::Nil, read_nil(src)?)),
        DataFamily::Boolean => read_bool(src).map(|(b, n)| (Value::Boolean(b), n)),
        DataFamily::Integer => {
            let (int, n) = read_integer(src)?;
            let value = match int {
                Integer::Signed(i) => Value::Integer(i),
                Integer::Unsigned(u) => Value::from(u),
            };
            Ok((value, n))
        }
        DataFamily::Float if tag == code::FLOAT_32 => {
            read_f32(src).map(|(v, n)| (Value::F32(v), n))
        }
        DataFamily::Float => read_f64(src).map(|(v, n)| (Value::F64(v), n)),
        DataFamily::String => read_string(src).map(|(s, n)| (Value::String(s), n)),
        DataFamily::Binary => {
            let (length, header) = read_binary_header(src)?;
            let data = copy_payload(src, header, length)?;
            Ok((Value::Binary(data), header + length))
        }
        DataFamily::Extension => {
            let (ext, header) = read_extension_header(src)?;
            let data = copy_payload(src, header, ext.length)?;
            Ok((Value::Extension(ext.type_id, data), header + ext.length))
        }
        DataFamily::Array | DataFamily::Map | DataFamily::NeverUsed => {
            Err(MsgPackError::InvalidDataCode(tag))
        }
    }
}

fn check_depth(options: &DecodeOptions, depth: usize) -> Result<()> {
    if depth >= options.max_depth {
        tracing::debug!(max_depth = options.max_depth, "value nesting limit reached");
        return Err(MsgPackError::DepthLimitExceeded(options.max_depth));
    }
    Ok(())
}

/// Every element takes at least one byte, so a declared count larger than the
/// remaining input is never preallocated.
fn bounded_capacity<S: ByteSource>(src: &S, count: usize, header: usize) -> usize {
    let remaining = src.total_len().unwrap_or(0).saturating_sub(header);
    count.min(remaining)
}

fn copy_payload<S: ByteSource>(src: &S, header: usize, length: usize) -> Result<Vec<u8>> {
    let body = src.slice(header, length)?;
    let mut data = vec![0u8; length];
    body.fill(&mut data)?;
    Ok(data)
}
