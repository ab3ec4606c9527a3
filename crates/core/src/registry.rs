//! Type Registry
//!
//! Bidirectional mapping between type descriptors and wire tags. Scalars map
//! 1:1; arrays and maps are recognized structurally from their element/key/value
//! descriptors, so any array or map over native types qualifies without
//! registration.
//!
//! The mapping is a `match` over closed enums: it is immutable and can be
//! shared across threads without synchronization.

use crate::error::{Error, Result};
use crate::tag::WireTag;
use std::fmt;

/// Canonical description of a type as seen by the registry and the mapper
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// `u8`
    Byte,
    /// `bool`
    Bool,
    /// `i16`
    Short,
    /// `u16`
    UShort,
    /// `i32`
    Int,
    /// `u32`
    UInt,
    /// `i64`
    Long,
    /// `u64`
    ULong,
    /// `f32`
    Float,
    /// `String`
    String,
    /// Any native value; element type carried inline (`Dynamic`)
    Any,
    /// Array whose element type is carried out-of-band
    AnyArray,
    /// Map whose key/value types are carried out-of-band
    AnyMap,
    /// Array with a known element type
    Array(Box<TypeDescriptor>),
    /// Map with known key and value types
    Map(Box<TypeDescriptor>, Box<TypeDescriptor>),
    /// Structured record with a descriptor table
    Record(&'static str),
    /// Type outside the closed model (text fallback only)
    Opaque(&'static str),
}

impl TypeDescriptor {
    /// Array of the given element type
    pub fn array_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(element))
    }

    /// Map of the given key and value types
    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map(Box::new(key), Box::new(value))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Byte => f.write_str("u8"),
            TypeDescriptor::Bool => f.write_str("bool"),
            TypeDescriptor::Short => f.write_str("i16"),
            TypeDescriptor::UShort => f.write_str("u16"),
            TypeDescriptor::Int => f.write_str("i32"),
            TypeDescriptor::UInt => f.write_str("u32"),
            TypeDescriptor::Long => f.write_str("i64"),
            TypeDescriptor::ULong => f.write_str("u64"),
            TypeDescriptor::Float => f.write_str("f32"),
            TypeDescriptor::String => f.write_str("String"),
            TypeDescriptor::Any => f.write_str("any"),
            TypeDescriptor::AnyArray => f.write_str("[any]"),
            TypeDescriptor::AnyMap => f.write_str("{any: any}"),
            TypeDescriptor::Array(element) => write!(f, "[{}]", element),
            TypeDescriptor::Map(key, value) => write!(f, "{{{}: {}}}", key, value),
            TypeDescriptor::Record(name) | TypeDescriptor::Opaque(name) => f.write_str(name),
        }
    }
}

/// Resolve the wire tag for a type.
///
/// Fails with `UnsupportedType` for records, opaque types, and arrays or maps
/// whose element types are not themselves native.
pub fn tag_of(ty: &TypeDescriptor) -> Result<WireTag> {
    match ty {
        TypeDescriptor::Byte => Ok(WireTag::Byte),
        TypeDescriptor::Bool => Ok(WireTag::Bool),
        TypeDescriptor::Short => Ok(WireTag::Short),
        TypeDescriptor::UShort => Ok(WireTag::UShort),
        TypeDescriptor::Int => Ok(WireTag::Int),
        TypeDescriptor::UInt => Ok(WireTag::UInt),
        TypeDescriptor::Long => Ok(WireTag::Long),
        TypeDescriptor::ULong => Ok(WireTag::ULong),
        TypeDescriptor::Float => Ok(WireTag::Float),
        TypeDescriptor::String => Ok(WireTag::String),
        TypeDescriptor::Any => Ok(WireTag::Dynamic),
        TypeDescriptor::AnyArray => Ok(WireTag::Array),
        TypeDescriptor::AnyMap => Ok(WireTag::Dictionary),
        TypeDescriptor::Array(element) => {
            tag_of(element).map_err(|_| Error::UnsupportedType(ty.to_string()))?;
            Ok(WireTag::Array)
        }
        TypeDescriptor::Map(key, value) => {
            tag_of(key).map_err(|_| Error::UnsupportedType(ty.to_string()))?;
            tag_of(value).map_err(|_| Error::UnsupportedType(ty.to_string()))?;
            Ok(WireTag::Dictionary)
        }
        TypeDescriptor::Record(_) | TypeDescriptor::Opaque(_) => {
            Err(Error::UnsupportedType(ty.to_string()))
        }
    }
}

/// Canonical descriptor for a wire tag.
///
/// Array and Dictionary resolve to the abstract `AnyArray`/`AnyMap`; the
/// concrete element types travel in the collection header.
pub fn type_of(tag: WireTag) -> TypeDescriptor {
    match tag {
        WireTag::Byte => TypeDescriptor::Byte,
        WireTag::Bool => TypeDescriptor::Bool,
        WireTag::Short => TypeDescriptor::Short,
        WireTag::UShort => TypeDescriptor::UShort,
        WireTag::Int => TypeDescriptor::Int,
        WireTag::UInt => TypeDescriptor::UInt,
        WireTag::Long => TypeDescriptor::Long,
        WireTag::ULong => TypeDescriptor::ULong,
        WireTag::Float => TypeDescriptor::Float,
        WireTag::String => TypeDescriptor::String,
        WireTag::Array => TypeDescriptor::AnyArray,
        WireTag::Dictionary => TypeDescriptor::AnyMap,
        WireTag::Dynamic => TypeDescriptor::Any,
    }
}

/// Check if a type round-trips through a wire tag without transformation.
pub fn is_native(ty: &TypeDescriptor) -> bool {
    tag_of(ty).is_ok()
}
