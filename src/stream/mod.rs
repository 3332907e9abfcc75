//! Async framing of MessagePack tokens over byte streams.
//!
//! MessagePack is self-delimiting, so a stream of values needs no length
//! prefix: the reader accumulates I/O chunks until the token skipper reports a
//! complete value.

pub mod reader;
pub mod writer;

pub use reader::TokenReader;
pub use writer::TokenWriter;
