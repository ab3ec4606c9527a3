//! Binary format layer for SBF
//!
//! This crate handles everything that touches bytes:
//!
//! - Entry codec: recursive read/write of one tagged value
//! - Container envelope: magic, format version, compression flag
//! - zstd compression of the payload
//! - Codec configuration (compression level, depth and length limits)
//!
//! Nesting depth is bounded. The default configuration rejects trees with
//! more than [`config::DEFAULT_MAX_DEPTH`] nested collections; use
//! [`CodecConfig::with_max_depth`] for deeper ones.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config; // Compression level, depth and length limits
pub mod entry; // Recursive tagged-value codec
pub mod envelope; // File-level framing and compression

pub use config::{CodecConfig, CodecConfigError};
pub use entry::{read_entry, write_entry, EntryCodec};
pub use envelope::{
    deserialize_raw, peek_header, read_envelope, serialize_raw, write_envelope, Envelope,
    EnvelopeHeader, ENVELOPE_HEADER_SIZE, SBF_EXTENSION, SBF_FORMAT_VERSION, SBF_MAGIC,
};
