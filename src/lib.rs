//! SBF - compact, self-describing binary serialization
//!
//! SBF persists structured records and generic value trees as a small,
//! tagged binary stream wrapped in a versioned envelope with optional zstd
//! compression.
//!
//! # Quick Start
//!
//! ```
//! use sbf::record;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Settings {
//!     name: String,
//!     volume: u8,
//!     recent: Vec<String>,
//! }
//!
//! record! {
//!     Settings {
//!         name as "Name" => [formerly("Title")],
//!         volume as "Volume",
//!         recent as "Recent",
//!     }
//! }
//!
//! let settings = Settings {
//!     name: "default".into(),
//!     volume: 80,
//!     recent: vec!["a.sbf".into()],
//! };
//! let bytes = sbf::serialize(&settings, true)?;
//! let back: Settings = sbf::deserialize(&bytes)?;
//! assert_eq!(back, settings);
//! # Ok::<(), sbf::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `sbf-core`: wire tags, type registry, the closed [`Value`] model, errors
//! - `sbf-format`: entry codec and container envelope
//! - `sbf-mapper`: records and other Rust types to/from [`Value`]
//!
//! Tools that edit value trees directly use [`serialize_raw`] and
//! [`deserialize_raw`], which bypass the mapper.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod file; // .sbf file helpers
mod serializer; // Envelope + mapper handle

pub use file::{load, load_raw, save, save_raw};
pub use serializer::{deserialize, serialize, Serializer};

pub use sbf_core::{
    is_native, tag_of, type_of, Array, Error, Map, Result, TypeDescriptor, Value, WireTag,
};
pub use sbf_format::{
    deserialize_raw, peek_header, read_envelope, serialize_raw, write_envelope, CodecConfig,
    CodecConfigError, Envelope, EnvelopeHeader, SBF_EXTENSION, SBF_FORMAT_VERSION, SBF_MAGIC,
};
pub use sbf_mapper::{
    record, Field, JsonTextCodec, Mappable, Mapper, Record, Text, TextCodec, TextCodecError,
    Visibility,
};
