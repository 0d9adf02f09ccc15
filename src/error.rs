//! Error types for sgjw

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Out-of-bounds access reported by the byte codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access of {len} bytes at offset {offset} exceeds buffer of {available} bytes")]
pub struct CodecError {
    pub offset: usize,
    pub len: usize,
    pub available: usize,
}

/// Fieldless discriminant of [`Error`], one per failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    AllocationFailed,
    ReadSizeMismatch,
    InvalidSignature,
    InvalidOffset,
    FieldDecodeFailed,
    FieldEncodeFailed,
    InvalidParameters,
    FileWriteFailed,
    Io,
}

/// Sgjw-specific error type
#[derive(Debug, Error)]
pub enum Error {
    /// Host file does not exist
    #[error("no such file: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A field buffer sized from wire data could not be reserved
    #[error("failed to allocate {size} bytes for {field}")]
    AllocationFailed { field: &'static str, size: usize },

    /// Bytes read differ from the size the filesystem reported
    #[error("read {actual} bytes, file reports {expected}")]
    ReadSizeMismatch { expected: u64, actual: u64 },

    /// Trailing 16-byte signature missing or corrupt
    #[error("trailer signature missing or corrupt")]
    InvalidSignature,

    /// Block offset absent, zero, or not representable
    #[error("invalid block offset: {reason}")]
    InvalidOffset { reason: &'static str },

    /// A field could not be decoded from the buffer
    #[error("failed to decode {field}: {reason}")]
    FieldDecodeFailed {
        field: &'static str,
        reason: String,
        #[source]
        source: Option<CodecError>,
    },

    /// A field could not be encoded into the block
    #[error("failed to encode {field}: {reason}")]
    FieldEncodeFailed {
        field: &'static str,
        reason: String,
        #[source]
        source: Option<CodecError>,
    },

    /// Caller supplied an unusable argument
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// Appending the block to the host file failed
    #[error("failed to write {}", path.display())]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure while reading the host file
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Get the discriminant for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound { .. } => ErrorKind::FileNotFound,
            Error::AllocationFailed { .. } => ErrorKind::AllocationFailed,
            Error::ReadSizeMismatch { .. } => ErrorKind::ReadSizeMismatch,
            Error::InvalidSignature => ErrorKind::InvalidSignature,
            Error::InvalidOffset { .. } => ErrorKind::InvalidOffset,
            Error::FieldDecodeFailed { .. } => ErrorKind::FieldDecodeFailed,
            Error::FieldEncodeFailed { .. } => ErrorKind::FieldEncodeFailed,
            Error::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Error::FileWriteFailed { .. } => ErrorKind::FileWriteFailed,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn decode(field: &'static str, source: CodecError) -> Self {
        Error::FieldDecodeFailed {
            field,
            reason: "out of bounds".into(),
            source: Some(source),
        }
    }

    pub(crate) fn encode(field: &'static str, reason: impl Into<String>) -> Self {
        Error::FieldEncodeFailed {
            field,
            reason: reason.into(),
            source: None,
        }
    }
}
