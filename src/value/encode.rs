//! `Value` → bytes.

use super::Value;
use crate::codec::{
    write_array_header, write_binary, write_bool, write_extension, write_f32, write_f64,
    write_i64, write_map_header, write_nil, write_string, write_u64,
};
use crate::error::Result;
use crate::sink::ByteSink;

/// Encodes a `Value` using the smallest representation of every element.
///
/// Returns the number of bytes written. On a fixed-capacity sink a failure
/// part-way through a container leaves the elements written so far in place.
pub fn write_value<W: ByteSink + ?Sized>(sink: &mut W, value: &Value) -> Result<usize> {
    match value {
        Value::Nil => write_nil(sink),
        Value::Boolean(b) => write_bool(sink, *b),
        Value::Integer(i) => write_i64(sink, *i),
        Value::UInteger(u) => write_u64(sink, *u),
        Value::F32(v) => write_f32(sink, *v),
        Value::F64(v) => write_f64(sink, *v),
        Value::String(s) => write_string(sink, s),
        Value::Binary(b) => write_binary(sink, b),
        Value::Array(items) => {
            let mut written = write_array_header(sink, items.len())?;
            for item in items {
                written += write_value(sink, item)?;
            }
            Ok(written)
        }
        Value::Map(entries) => {
            let mut written = write_map_header(sink, entries.len())?;
            for (key, val) in entries {
                written += write_value(sink, key)?;
                written += write_value(sink, val)?;
            }
            Ok(written)
        }
        Value::Extension(type_id, data) => write_extension(sink, *type_id, data),
    }
}
