//! Writes MessagePack tokens to an async byte stream.

use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::codec::skip_token;
use crate::error::{MsgPackError, Result};
use crate::value::{write_value, Value};

/// Writes encoded values to an `AsyncWrite` stream.
pub struct TokenWriter<W> {
    writer: W,
    buf: BytesMut,
}

impl<W: AsyncWrite + Unpin> TokenWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: BytesMut::new(),
        }
    }

    /// Encodes `value` and writes it; returns the encoded length.
    pub async fn write_value(&mut self, value: &Value) -> Result<usize> {
        self.buf.clear();
        let n = write_value(&mut self.buf, value)?;
        self.writer.write_all(&self.buf).await?;
        Ok(n)
    }

    /// Writes an already-encoded token. `token` must hold exactly one
    /// complete value.
    pub async fn write_raw(&mut self, token: &[u8]) -> Result<()> {
        let len = skip_token(&token)?;
        if len != token.len() {
            return Err(MsgPackError::LengthMismatch {
                expected: len,
                actual: token.len(),
            });
        }
        self.writer.write_all(token).await?;
        Ok(())
    }

    /// Flushes the underlying writer.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::stream::TokenReader;
    use crate::value::read_value;
    use std::io::Cursor;

    #[tokio::test]
    async fn write_values() {
        let mut output = Vec::new();
        let mut writer = TokenWriter::new(&mut output);
        assert_eq!(writer.write_value(&Value::from("a")).await.unwrap(), 2);
        assert_eq!(writer.write_value(&Value::from(-1)).await.unwrap(), 1);
        writer.flush().await.unwrap();
        drop(writer);
        assert_eq!(output, vec![0xA1, 0x61, 0xFF]);
    }

    #[tokio::test]
    async fn raw_tokens_must_be_complete() {
        let mut output = Vec::new();
        let mut writer = TokenWriter::new(&mut output);
        writer.write_raw(&[0x92, 0x01, 0x02]).await.unwrap();

        let err = writer.write_raw(&[0x92, 0x01]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
        let err = writer.write_raw(&[0x01, 0x02]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        drop(writer);
        assert_eq!(output, vec![0x92, 0x01, 0x02]);
    }

    #[tokio::test]
    async fn writer_to_reader_round_trip() {
        let values = vec![
            Value::from(vec![Value::from(1), Value::from("two"), Value::F64(3.0)]),
            Value::Map(vec![(Value::from("k"), Value::Binary(vec![9; 1000]))]),
            Value::Nil,
        ];
        let mut writer = TokenWriter::new(Vec::new());
        for value in &values {
            writer.write_value(value).await.unwrap();
        }
        let encoded = writer.into_inner();

        let mut reader = TokenReader::new(Cursor::new(encoded)).with_read_size(7);
        let mut decoded = Vec::new();
        while let Some(token) = reader.read_token().await.unwrap() {
            let src: &[u8] = &token;
            let (value, n) = read_value(&src).unwrap();
            assert_eq!(n, token.len());
            decoded.push(value);
        }
        assert_eq!(decoded, values);
    }
}
