//! Fixed-layout binary property streams.
//!
//! Persisted modifier state uses a hand-laid little-endian format. Field order
//! and widths are fixed for every system that stores per-entity modifiers.
//!
//! Strings are prefixed with their byte length as a `u16`.

use crate::error::{EngineError, ErrorSeverity};

/// Errors raised while encoding or decoding a property stream.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error(
        "unexpected end of stream reading {field}: needed {needed} bytes, {remaining} remaining"
    )]
    UnexpectedEof {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid {field} tag {value}")]
    InvalidTag { field: &'static str, value: u16 },

    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} is {len} bytes, longer than a u16 length prefix allows")]
    StringTooLong { field: &'static str, len: usize },

    #[error("{field} count {len} does not fit a u16 prefix")]
    TooManyEntries { field: &'static str, len: usize },
}

impl EngineError for CodecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Serialization
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnexpectedEof { .. } => "CODEC_UNEXPECTED_EOF",
            Self::InvalidTag { .. } => "CODEC_INVALID_TAG",
            Self::InvalidUtf8 { .. } => "CODEC_INVALID_UTF8",
            Self::StringTooLong { .. } => "CODEC_STRING_TOO_LONG",
            Self::TooManyEntries { .. } => "CODEC_TOO_MANY_ENTRIES",
        }
    }
}

/// Growable output buffer for property streams.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropWriter {
    buf: Vec<u8>,
}

impl PropWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a collection length as a `u16` prefix.
    pub fn write_len(&mut self, field: &'static str, len: usize) -> Result<(), CodecError> {
        let len = u16::try_from(len).map_err(|_| CodecError::TooManyEntries { field, len })?;
        self.write_u16(len);
        Ok(())
    }

    /// Writes a `u16` byte length followed by the UTF-8 bytes.
    pub fn write_str(&mut self, field: &'static str, value: &str) -> Result<(), CodecError> {
        let len = u16::try_from(value.len()).map_err(|_| CodecError::StringTooLong {
            field,
            len: value.len(),
        })?;
        self.write_u16(len);
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Cursor over a borrowed property stream.
#[derive(Clone, Debug)]
pub struct PropReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> PropReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, CodecError> {
        let [byte] = self.take::<1>(field)?;
        Ok(byte)
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.take::<2>(field)?))
    }

    pub fn read_len(&mut self, field: &'static str) -> Result<usize, CodecError> {
        Ok(self.read_u16(field)? as usize)
    }

    pub fn read_str(&mut self, field: &'static str) -> Result<String, CodecError> {
        let len = self.read_u16(field)? as usize;
        let bytes = self.take_slice(field, len)?;
        core::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidUtf8 { field })
    }

    /// Bytes left after the current offset.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn take<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], CodecError> {
        let slice = self.take_slice(field, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn take_slice(&mut self, field: &'static str, needed: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(CodecError::UnexpectedEof {
                field,
                needed,
                remaining,
            });
        }

        let slice = &self.data[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(slice)
    }
}
