//! Structure mapper for SBF
//!
//! Bridges application records to the generic container model:
//!
//! - Mappable: conversion of a Rust type to/from a native [`Value`]
//! - Record: explicit per-type descriptor table (names, visibility,
//!   exclusion, force-include, former names), usually built with [`record!`]
//! - Mapper: walks descriptor tables and owns the text fallback codec
//! - Text: wrapper routing types outside the closed model through text

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mappable; // Mappable trait and impls for native/collection types
pub mod mapper; // Record <-> container walk
pub mod record; // Field descriptors, Record trait, record! macro
pub mod text; // Text fallback capability

pub use mappable::{mapped_tag, Mappable};
pub use mapper::Mapper;
pub use record::{Field, Record, Visibility};
pub use text::{JsonTextCodec, Text, TextCodec, TextCodecError};

// Used by `record!` expansions
pub use sbf_core::{Error, Result, TypeDescriptor, Value};
