//! Core types for SBF
//!
//! This crate defines the foundational types every other SBF crate builds on:
//! - WireTag: One-byte discriminator for a value's physical encoding
//! - TypeDescriptor: Type Registry mapping between types and wire tags
//! - Value: Closed value model (nine scalars, strings, arrays, maps)
//! - Error: Error taxonomy shared by the codec, envelope and mapper

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod registry;
pub mod tag;
pub mod value;

pub use error::{Error, Result};
pub use registry::{is_native, tag_of, type_of, TypeDescriptor};
pub use tag::WireTag;
pub use value::{Array, Map, Value};
