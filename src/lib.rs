//! A MessagePack wire format engine.
//!
//! This crate encodes and decodes the MessagePack binary format token by
//! token. Writers always emit the shortest legal encoding; readers accept any
//! legal encoding and work the same over one contiguous buffer or a chain of
//! discontiguous chunks.
//!
//! # Architecture
//!
//! - **`format`**: Data codes, type families and size classes
//! - **`source`**: Read-side byte views (`&[u8]` and chunked `Sequence`)
//! - **`sink`**: Write-side destinations (fixed slices and growable buffers)
//! - **`codec`**: Scalar, header, payload and timestamp codecs, plus the token skipper
//! - **`pool`**: Reusable buffers for decoded payloads
//! - **`value`**: Dynamic `Value` tree built on the codec
//! - **`stream`**: Async token framing over `AsyncRead`/`AsyncWrite`
//!
//! # Example
//!
//! ```
//! use msgpack_spec::codec::{read_u16, skip_token, write_u64};
//!
//! let mut buf = Vec::new();
//! write_u64(&mut buf, 50505).unwrap();
//! assert_eq!(buf, [0xcd, 0xc5, 0x49]);
//!
//! let src: &[u8] = &buf;
//! assert_eq!(read_u16(&src).unwrap(), (50505, 3));
//! assert_eq!(skip_token(&src).unwrap(), 3);
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod pool;
pub mod sink;
pub mod source;
pub mod stream;
pub mod value;

pub use error::{ErrorKind, MsgPackError, Result};
pub use pool::{BufferPool, PooledBuf};
pub use sink::ByteSink;
pub use source::{ByteSource, Segments, Sequence};
pub use value::Value;
