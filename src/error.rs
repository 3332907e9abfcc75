//! Error types for MessagePack encoding and decoding.

use std::fmt;

use crate::format::DataFamily;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MsgPackError>;

/// Errors that can occur while reading, writing or skipping MessagePack data.
#[derive(Debug, thiserror::Error)]
pub enum MsgPackError {
    #[error("wrong data code 0x{code:02x}, expected {expected}")]
    WrongDataCode { code: u8, expected: DataFamily },

    #[error("invalid data code 0x{0:02x}")]
    InvalidDataCode(u8),

    #[error("unexpected end of input: need {needed} bytes but only {available} remaining")]
    UnexpectedEndOfInput { needed: usize, available: usize },

    #[error("cannot read from empty input")]
    EmptyInput,

    #[error("buffer too small: need {needed} bytes but only {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("length {0} exceeds the addressable size")]
    LengthOverflow(u64),

    #[error("length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid UTF-8 text (valid up to byte {valid_up_to})")]
    InvalidText { valid_up_to: usize },

    #[error("value {value} is out of range for {target}")]
    ValueOutOfRange { value: i128, target: &'static str },

    #[error("wrong extension type {actual}, expected {expected}")]
    WrongExtensionType { expected: i8, actual: i8 },

    #[error("nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Copyable discriminant of [`MsgPackError`], convenient for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    WrongDataCode,
    InvalidDataCode,
    UnexpectedEndOfInput,
    EmptyInput,
    BufferTooSmall,
    LengthOverflow,
    LengthMismatch,
    InvalidText,
    ValueOutOfRange,
    WrongExtensionType,
    DepthLimitExceeded,
    Io,
}

impl MsgPackError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WrongDataCode { .. } => ErrorKind::WrongDataCode,
            Self::InvalidDataCode(_) => ErrorKind::InvalidDataCode,
            Self::UnexpectedEndOfInput { .. } => ErrorKind::UnexpectedEndOfInput,
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            Self::LengthOverflow(_) => ErrorKind::LengthOverflow,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::InvalidText { .. } => ErrorKind::InvalidText,
            Self::ValueOutOfRange { .. } => ErrorKind::ValueOutOfRange,
            Self::WrongExtensionType { .. } => ErrorKind::WrongExtensionType,
            Self::DepthLimitExceeded(_) => ErrorKind::DepthLimitExceeded,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Builds the error returned when a tag does not belong to the expected family.
    ///
    /// The reserved tag is always reported as [`MsgPackError::InvalidDataCode`],
    /// whatever the caller was trying to read.
    pub(crate) fn wrong_code(code: u8, expected: DataFamily) -> Self {
        if code == crate::format::code::NEVER_USED {
            Self::InvalidDataCode(code)
        } else {
            Self::WrongDataCode { code, expected }
        }
    }

    pub(crate) fn out_of_range(value: impl Into<i128>, target: &'static str) -> Self {
        Self::ValueOutOfRange {
            value: value.into(),
            target,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<std::str::Utf8Error> for MsgPackError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::InvalidText {
            valid_up_to: e.valid_up_to(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_code_is_always_invalid() {
        let err = MsgPackError::wrong_code(0xc1, DataFamily::Integer);
        assert_eq!(err.kind(), ErrorKind::InvalidDataCode);

        let err = MsgPackError::wrong_code(0xc0, DataFamily::Integer);
        assert_eq!(err.kind(), ErrorKind::WrongDataCode);
    }

    #[test]
    fn display_includes_code_in_hex() {
        let err = MsgPackError::wrong_code(0xa3, DataFamily::Boolean);
        assert_eq!(err.to_string(), "wrong data code 0xa3, expected boolean");
    }

    #[test]
    fn utf8_error_converts_to_invalid_text() {
        let bytes = [0x61, 0xff];
        let err: MsgPackError = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(matches!(err, MsgPackError::InvalidText { valid_up_to: 1 }));
    }
}
