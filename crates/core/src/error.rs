//! Error types for SBF
//!
//! This module defines every failure the codec, envelope and mapper can report.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! All errors are fatal to the current encode/decode call. None of them
//! describe a transient condition, so nothing is retried internally.

use crate::tag::WireTag;
use std::io;
use thiserror::Error;

/// Result type alias for SBF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SBF encoding, decoding and mapping
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying stream (other than end-of-stream)
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// Stream does not start with the `SBF` magic marker
    #[error("Invalid file magic {found:02X?}, expected \"SBF\"")]
    BadMagic {
        /// Bytes found where the magic was expected
        found: [u8; 3],
    },

    /// Stream was written by an incompatible format revision
    #[error("Format version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version this implementation reads and writes
        expected: u16,
        /// Version stored in the stream
        found: u16,
    },

    /// Compression flag byte is neither 0 nor 1
    #[error("Invalid compression flag 0x{0:02X}")]
    InvalidCompressionFlag(u8),

    /// Compressed payload could not be decompressed
    #[error("Decompression failed: {0}")]
    Decompression(String),

    /// Type has no wire tag
    #[error("Type {0} is not supported")]
    UnsupportedType(String),

    /// Value is neither native, a record, nor representable as text
    #[error("Unable to map {type_name} to a natively supported type: {reason}")]
    UnmappableType {
        /// Name of the offending type
        type_name: String,
        /// Why the text codec rejected it
        reason: String,
    },

    /// Value shape cannot populate the requested target type
    #[error("Unable to map {found} to {target}")]
    UnmappableShape {
        /// Requested target type
        target: String,
        /// Tag of the value that was supplied
        found: WireTag,
    },

    /// Tag byte is `Dynamic` in a value position, or unknown
    #[error("Invalid entry tag 0x{0:02X}")]
    InvalidTag(u8),

    /// Element does not match the declared tag of its collection
    #[error("Tag mismatch: expected {expected}, found {found}")]
    TagMismatch {
        /// Tag declared by the collection header
        expected: WireTag,
        /// Tag of the element being written
        found: WireTag,
    },

    /// Input ended in the middle of an entry
    #[error("Unexpected end of stream")]
    UnexpectedEndOfStream,

    /// Payload bytes are malformed (invalid UTF-8, overlong length)
    #[error("Data corruption: {0}")]
    Corrupted(String),

    /// Dictionary contains the same key twice
    #[error("Duplicate dictionary key: {0}")]
    DuplicateKey(String),

    /// Bytes remain after the single root entry
    #[error("Trailing data after root entry")]
    TrailingData,

    /// Configured depth or length limit was exceeded.
    ///
    /// The default codec configuration caps nesting at 128 collections, so
    /// deeper trees fail here on both encode and decode unless the depth
    /// limit is raised.
    #[error("Limit exceeded: {what} is {actual}, limit is {limit}")]
    LimitExceeded {
        /// Which limit was hit
        what: &'static str,
        /// Configured limit
        limit: u64,
        /// Observed value
        actual: u64,
    },
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEndOfStream
        } else {
            Error::Io(e)
        }
    }
}

impl Error {
    /// Create an unmappable-shape error for a target type name.
    pub fn unmappable_shape(target: impl Into<String>, found: WireTag) -> Self {
        Error::UnmappableShape {
            target: target.into(),
            found,
        }
    }

    /// Create an unmappable-type error with the underlying reason.
    pub fn unmappable_type(type_name: impl Into<String>, reason: impl ToString) -> Self {
        Error::UnmappableType {
            type_name: type_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this error means the stream is not a readable SBF artifact
    /// (bad header or incompatible version).
    pub fn is_header_error(&self) -> bool {
        matches!(
            self,
            Error::BadMagic { .. } | Error::VersionMismatch { .. } | Error::InvalidCompressionFlag(_)
        )
    }

    /// Check if this error indicates malformed or truncated stream content.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::InvalidTag(_)
                | Error::UnexpectedEndOfStream
                | Error::Corrupted(_)
                | Error::DuplicateKey(_)
                | Error::TrailingData
                | Error::Decompression(_)
        )
    }
}
