//! Reads complete MessagePack tokens from an async byte stream.

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::codec::TokenScanner;
use crate::error::{MsgPackError, Result};
use crate::source::Segments;

/// Default number of bytes requested per read.
pub const DEFAULT_READ_SIZE: usize = 8 * 1024;

/// Default upper bound on the size of a single token.
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 16 * 1024 * 1024;

/// Splits an `AsyncRead` stream into encoded tokens.
///
/// Incoming reads are kept as separate segments; a token that spans several
/// reads is only copied once, when it is handed out. The token being
/// assembled is scanned incrementally, never from its start again.
pub struct TokenReader<R> {
    reader: R,
    segments: Segments,
    scanner: TokenScanner,
    read_size: usize,
    max_token_size: usize,
}

impl<R: AsyncRead + Unpin> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            segments: Segments::new(),
            scanner: TokenScanner::new(),
            read_size: DEFAULT_READ_SIZE,
            max_token_size: DEFAULT_MAX_TOKEN_SIZE,
        }
    }

    /// Sets how many bytes are requested from the stream per read.
    pub fn with_read_size(mut self, size: usize) -> Self {
        self.read_size = size.max(1);
        self
    }

    /// Sets the largest token the reader accepts. A token whose headers
    /// already declare more than this fails with
    /// [`MsgPackError::LengthOverflow`] before its body is read.
    pub fn with_max_token_size(mut self, size: usize) -> Self {
        self.max_token_size = size;
        self
    }

    /// Number of bytes read from the stream but not yet returned.
    pub fn buffered(&self) -> u64 {
        self.segments.len()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads the next complete token.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly between tokens and
    /// [`MsgPackError::UnexpectedEndOfInput`] when it ends inside one.
    pub async fn read_token(&mut self) -> Result<Option<Bytes>> {
        loop {
            if !self.segments.is_empty() {
                if let Some(len) = self.scanner.scan(&self.segments.as_source())? {
                    return self.take(len).map(Some);
                }
                let needed = self.scanner.needed();
                if needed > self.max_token_size {
                    tracing::debug!(needed, max = self.max_token_size, "token too large");
                    return Err(MsgPackError::LengthOverflow(needed as u64));
                }
            }

            let mut chunk = BytesMut::with_capacity(self.read_size);
            let n = self.reader.read_buf(&mut chunk).await?;
            if n == 0 {
                if self.segments.is_empty() {
                    return Ok(None);
                }
                let needed = self.scanner.needed();
                let available = self.buffered();
                tracing::debug!(needed, available, "stream ended inside a token");
                return Err(MsgPackError::UnexpectedEndOfInput {
                    needed,
                    available: available as usize,
                });
            }
            self.segments.push(chunk.freeze());
            tracing::trace!(read = n, buffered = self.buffered(), "read chunk");
        }
    }

    fn take(&mut self, len: usize) -> Result<Bytes> {
        if len > self.max_token_size {
            return Err(MsgPackError::LengthOverflow(len as u64));
        }
        let token = self.segments.split_to(len);
        self.scanner.reset();
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    #[tokio::test]
    async fn read_consecutive_tokens() {
        let data: Vec<u8> = vec![
            0x01, // fixint
            0x92, 0xA1, b'a', 0xC3, // ["a", true]
            0xCD, 0xC5, 0x49, // 50505
        ];
        let mut reader = TokenReader::new(Cursor::new(data));
        assert_eq!(&reader.read_token().await.unwrap().unwrap()[..], &[0x01]);
        assert_eq!(
            &reader.read_token().await.unwrap().unwrap()[..],
            &[0x92, 0xA1, b'a', 0xC3]
        );
        assert_eq!(
            &reader.read_token().await.unwrap().unwrap()[..],
            &[0xCD, 0xC5, 0x49]
        );
        assert!(reader.read_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tokens_spanning_tiny_reads() {
        let mut data = vec![0xDC, 0x00, 0x03, 0x01, 0xA3, b'x', b'y', b'z', 0xC0];
        data.push(0xC2);
        let mut reader = TokenReader::new(Cursor::new(data)).with_read_size(1);
        let token = reader.read_token().await.unwrap().unwrap();
        assert_eq!(token.len(), 9);
        assert_eq!(&reader.read_token().await.unwrap().unwrap()[..], &[0xC2]);
        assert_eq!(reader.buffered(), 0);
        assert!(reader.read_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_stream() {
        let mut reader = TokenReader::new(Cursor::new(Vec::new()));
        assert!(reader.read_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stream_ends_inside_token() {
        let data: Vec<u8> = vec![0x92, 0x01];
        let mut reader = TokenReader::new(Cursor::new(data)).with_read_size(1);
        let err = reader.read_token().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    }

    #[tokio::test]
    async fn oversized_token() {
        let mut data = vec![0xC5, 0x01, 0x00];
        data.extend_from_slice(&[0u8; 256]);
        let mut reader = TokenReader::new(Cursor::new(data))
            .with_read_size(16)
            .with_max_token_size(64);
        let err = reader.read_token().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthOverflow);
    }

    #[tokio::test]
    async fn declared_length_is_rejected_before_buffering() {
        let mut data = vec![0xC6, 0x7F, 0xFF, 0xFF, 0xFF];
        data.extend_from_slice(&[0u8; 4096]);
        let mut reader = TokenReader::new(Cursor::new(data))
            .with_read_size(16)
            .with_max_token_size(1024);
        let err = reader.read_token().await.unwrap_err();
        assert!(matches!(err, MsgPackError::LengthOverflow(n) if n == 5 + 0x7FFF_FFFF));
        assert!(reader.buffered() < 1024);
    }

    #[tokio::test]
    async fn large_token_over_small_reads() {
        let count = 50_000u32;
        let mut data = vec![0xDD];
        data.extend_from_slice(&count.to_be_bytes());
        data.extend((0..count).map(|i| (i % 128) as u8));
        data.push(0xC3);

        let mut reader = TokenReader::new(Cursor::new(data.clone())).with_read_size(64);
        let token = reader.read_token().await.unwrap().unwrap();
        assert_eq!(&token[..], &data[..data.len() - 1]);
        assert_eq!(&reader.read_token().await.unwrap().unwrap()[..], &[0xC3]);
        assert!(reader.read_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scanning_restarts_for_each_token() {
        let data: Vec<u8> = vec![0x92, 0x01, 0x02, 0x81, 0xA1, b'k', 0x90, 0x07];
        let mut reader = TokenReader::new(Cursor::new(data)).with_read_size(2);
        assert_eq!(&reader.read_token().await.unwrap().unwrap()[..], &[0x92, 0x01, 0x02]);
        assert_eq!(
            &reader.read_token().await.unwrap().unwrap()[..],
            &[0x81, 0xA1, b'k', 0x90]
        );
        assert_eq!(&reader.read_token().await.unwrap().unwrap()[..], &[0x07]);
        assert!(reader.read_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_token() {
        let data: Vec<u8> = vec![0x91, 0xC1];
        let mut reader = TokenReader::new(Cursor::new(data));
        let err = reader.read_token().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDataCode);
    }
}
