//! Wire tag vocabulary
//!
//! A [`WireTag`] is the one-byte discriminator written in front of every
//! self-describing entry and inside array/dictionary headers.
//!
//! ## Tag Values
//!
//! These values are part of the on-disk format and MUST NOT change:
//! - Byte = 0, Bool = 1
//! - Short = 2, UShort = 3, Int = 4, UInt = 5, Long = 6, ULong = 7
//! - Float = 8, String = 9
//! - Array = 10, Dictionary = 11
//! - Dynamic = 255
//!
//! `Dynamic` is a meta-tag: in a collection header it means "each element
//! writes its own tag". It is never the kind of a stored value.

use crate::error::{Error, Result};
use std::fmt;

/// One-byte discriminator identifying the physical encoding of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum WireTag {
    /// Unsigned 8-bit integer
    Byte = 0,
    /// Boolean stored as one byte
    Bool = 1,
    /// Signed 16-bit integer
    Short = 2,
    /// Unsigned 16-bit integer
    UShort = 3,
    /// Signed 32-bit integer
    Int = 4,
    /// Unsigned 32-bit integer
    UInt = 5,
    /// Signed 64-bit integer
    Long = 6,
    /// Unsigned 64-bit integer
    ULong = 7,
    /// 32-bit IEEE-754 float
    Float = 8,
    /// Length-prefixed UTF-8 text
    String = 9,
    /// Homogeneous array
    Array = 10,
    /// Key/value map
    Dictionary = 11,
    /// Tag is written inline per element rather than implied by context
    Dynamic = 255,
}

impl WireTag {
    /// All tags that describe a storable value kind (everything but `Dynamic`).
    pub const VALUE_TAGS: [WireTag; 12] = [
        WireTag::Byte,
        WireTag::Bool,
        WireTag::Short,
        WireTag::UShort,
        WireTag::Int,
        WireTag::UInt,
        WireTag::Long,
        WireTag::ULong,
        WireTag::Float,
        WireTag::String,
        WireTag::Array,
        WireTag::Dictionary,
    ];

    /// Convert to byte representation
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Try to create from byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(WireTag::Byte),
            1 => Some(WireTag::Bool),
            2 => Some(WireTag::Short),
            3 => Some(WireTag::UShort),
            4 => Some(WireTag::Int),
            5 => Some(WireTag::UInt),
            6 => Some(WireTag::Long),
            7 => Some(WireTag::ULong),
            8 => Some(WireTag::Float),
            9 => Some(WireTag::String),
            10 => Some(WireTag::Array),
            11 => Some(WireTag::Dictionary),
            255 => Some(WireTag::Dynamic),
            _ => None,
        }
    }

    /// Human-readable tag name
    pub fn name(self) -> &'static str {
        match self {
            WireTag::Byte => "Byte",
            WireTag::Bool => "Bool",
            WireTag::Short => "Short",
            WireTag::UShort => "UShort",
            WireTag::Int => "Int",
            WireTag::UInt => "UInt",
            WireTag::Long => "Long",
            WireTag::ULong => "ULong",
            WireTag::Float => "Float",
            WireTag::String => "String",
            WireTag::Array => "Array",
            WireTag::Dictionary => "Dictionary",
            WireTag::Dynamic => "Dynamic",
        }
    }

    /// Payload width in bytes for fixed-width scalars, `None` otherwise
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            WireTag::Byte | WireTag::Bool => Some(1),
            WireTag::Short | WireTag::UShort => Some(2),
            WireTag::Int | WireTag::UInt | WireTag::Float => Some(4),
            WireTag::Long | WireTag::ULong => Some(8),
            WireTag::String | WireTag::Array | WireTag::Dictionary | WireTag::Dynamic => None,
        }
    }

    /// Check if this tag is one of the scalar kinds (including String)
    pub fn is_scalar(self) -> bool {
        !matches!(
            self,
            WireTag::Array | WireTag::Dictionary | WireTag::Dynamic
        )
    }

    /// Check if this tag is the `Dynamic` meta-tag
    pub fn is_dynamic(self) -> bool {
        self == WireTag::Dynamic
    }
}

impl TryFrom<u8> for WireTag {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        WireTag::from_byte(byte).ok_or(Error::InvalidTag(byte))
    }
}

impl From<WireTag> for u8 {
    fn from(tag: WireTag) -> u8 {
        tag.as_byte()
    }
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
