//! Value types for SBF
//!
//! This module defines the closed value model every encode/decode passes
//! through:
//! - Value: the nine fixed-width scalars, strings, arrays and maps
//! - Array: element tag plus items (the tag survives even when empty)
//! - Map: key tag, value tag and insertion-ordered entries
//!
//! ## Equality
//!
//! Values compare structurally. Different kinds are never equal
//! (`Int(1) != Long(1)`), floats follow IEEE-754 (`NaN != NaN`), and maps
//! compare independently of entry order.
//!
//! ## Map Keys
//!
//! Any value may be a map key. Key identity uses [`Value::key_eq`], which
//! compares floats by bit pattern so every key is equal to itself.

use crate::error::{Error, Result};
use crate::tag::WireTag;
use rustc_hash::FxHashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value representable by a wire tag
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unsigned 8-bit integer
    Byte(u8),
    /// Boolean
    Bool(bool),
    /// Signed 16-bit integer
    Short(i16),
    /// Unsigned 16-bit integer
    UShort(u16),
    /// Signed 32-bit integer
    Int(i32),
    /// Unsigned 32-bit integer
    UInt(u32),
    /// Signed 64-bit integer
    Long(i64),
    /// Unsigned 64-bit integer
    ULong(u64),
    /// 32-bit float
    Float(f32),
    /// UTF-8 string
    String(String),
    /// Array of values sharing an element tag
    Array(Array),
    /// Key/value map
    Map(Map),
}

macro_rules! scalar_accessors {
    ($($method:ident => $variant:ident : $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Get as `", stringify!($ty), "` if this is a ", stringify!($variant), " value")]
            pub fn $method(&self) -> Option<$ty> {
                match self {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        )*
    };
}

impl Value {
    /// Wire tag describing this value's encoding (never `Dynamic`)
    pub fn tag(&self) -> WireTag {
        match self {
            Value::Byte(_) => WireTag::Byte,
            Value::Bool(_) => WireTag::Bool,
            Value::Short(_) => WireTag::Short,
            Value::UShort(_) => WireTag::UShort,
            Value::Int(_) => WireTag::Int,
            Value::UInt(_) => WireTag::UInt,
            Value::Long(_) => WireTag::Long,
            Value::ULong(_) => WireTag::ULong,
            Value::Float(_) => WireTag::Float,
            Value::String(_) => WireTag::String,
            Value::Array(_) => WireTag::Array,
            Value::Map(_) => WireTag::Dictionary,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.tag().name()
    }

    scalar_accessors! {
        as_byte => Byte: u8,
        as_bool => Bool: bool,
        as_short => Short: i16,
        as_ushort => UShort: u16,
        as_int => Int: i32,
        as_uint => UInt: u32,
        as_long => Long: i64,
        as_ulong => ULong: u64,
        as_float => Float: f32,
    }

    /// Get as string slice if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as array if this is an Array value
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as map if this is a Map value
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Key identity: structural equality with floats compared bit-for-bit.
    pub fn key_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Array(a), Value::Array(b)) => {
                a.element_tag == b.element_tag
                    && a.items.len() == b.items.len()
                    && a.items.iter().zip(&b.items).all(|(x, y)| x.key_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.key_tag == b.key_tag
                    && a.value_tag == b.value_tag
                    && a.len() == b.len()
                    && a.entries.iter().all(|(k, v)| match b.get(k) {
                        Some(other) => v.key_eq(other),
                        None => false,
                    })
            }
            _ => self == other,
        }
    }
}

fn hash_key<H: Hasher>(value: &Value, state: &mut H) {
    value.tag().hash(state);
    match value {
        Value::Byte(v) => v.hash(state),
        Value::Bool(v) => v.hash(state),
        Value::Short(v) => v.hash(state),
        Value::UShort(v) => v.hash(state),
        Value::Int(v) => v.hash(state),
        Value::UInt(v) => v.hash(state),
        Value::Long(v) => v.hash(state),
        Value::ULong(v) => v.hash(state),
        Value::Float(v) => v.to_bits().hash(state),
        Value::String(v) => v.hash(state),
        Value::Array(a) => {
            a.element_tag.hash(state);
            a.items.len().hash(state);
            for item in &a.items {
                hash_key(item, state);
            }
        }
        // Entry order is not part of map identity
        Value::Map(m) => m.len().hash(state),
    }
}

/// Borrowed key with hashing consistent with [`Value::key_eq`]
struct KeyRef<'a>(&'a Value);

impl PartialEq for KeyRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.key_eq(other.0)
    }
}

impl Eq for KeyRef<'_> {}

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_key(self.0, state)
    }
}

fn check_tag(declared: WireTag, value: &Value) -> Result<()> {
    if declared.is_dynamic() || declared == value.tag() {
        Ok(())
    } else {
        Err(Error::TagMismatch {
            expected: declared,
            found: value.tag(),
        })
    }
}

// ============================================================================
// Array
// ============================================================================

/// Array of values that all match one element tag
///
/// An element tag of `Dynamic` admits values of any kind; each element is
/// then written with its own tag byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    element_tag: WireTag,
    items: Vec<Value>,
}

impl Array {
    /// Create an empty array with the given element tag
    pub fn new(element_tag: WireTag) -> Self {
        Array {
            element_tag,
            items: Vec::new(),
        }
    }

    /// Create a heterogeneous array (element tag `Dynamic`)
    pub fn dynamic(items: Vec<Value>) -> Self {
        Array {
            element_tag: WireTag::Dynamic,
            items,
        }
    }

    /// Create an array, checking every item against the element tag
    pub fn from_items(element_tag: WireTag, items: Vec<Value>) -> Result<Self> {
        for item in &items {
            check_tag(element_tag, item)?;
        }
        Ok(Array { element_tag, items })
    }

    /// Append an item, checking it against the element tag
    pub fn push(&mut self, value: Value) -> Result<()> {
        check_tag(self.element_tag, &value)?;
        self.items.push(value);
        Ok(())
    }

    /// Declared element tag
    pub fn element_tag(&self) -> WireTag {
        self.element_tag
    }

    /// Items in order
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Consume the array, returning its items
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the array has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

// ============================================================================
// Map
// ============================================================================

/// Key/value map with declared key and value tags
///
/// Entries keep insertion order. Keys are unique under [`Value::key_eq`].
#[derive(Debug, Clone)]
pub struct Map {
    key_tag: WireTag,
    value_tag: WireTag,
    entries: Vec<(Value, Value)>,
}

impl Map {
    /// Create an empty map with the given key and value tags
    pub fn new(key_tag: WireTag, value_tag: WireTag) -> Self {
        Map {
            key_tag,
            value_tag,
            entries: Vec::new(),
        }
    }

    /// Create an empty generic container (String keys, Dynamic values)
    pub fn container() -> Self {
        Map::new(WireTag::String, WireTag::Dynamic)
    }

    /// Create a map from entries, checking tags and key uniqueness
    pub fn from_entries(
        key_tag: WireTag,
        value_tag: WireTag,
        entries: Vec<(Value, Value)>,
    ) -> Result<Self> {
        let mut seen = FxHashSet::default();
        for (key, value) in &entries {
            check_tag(key_tag, key)?;
            check_tag(value_tag, value)?;
            if !seen.insert(KeyRef(key)) {
                return Err(Error::DuplicateKey(key.to_string()));
            }
        }
        Ok(Map {
            key_tag,
            value_tag,
            entries,
        })
    }

    /// Insert an entry, replacing and returning the previous value for an equal key
    pub fn insert(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
        check_tag(self.key_tag, &key)?;
        check_tag(self.value_tag, &value)?;
        match self.entries.iter_mut().find(|(k, _)| k.key_eq(&key)) {
            Some((_, existing)) => Ok(Some(std::mem::replace(existing, value))),
            None => {
                self.entries.push((key, value));
                Ok(None)
            }
        }
    }

    /// Look up a value by key
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.key_eq(key))
            .map(|(_, v)| v)
    }

    /// Look up a value by string key
    pub fn get_str(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(name))
            .map(|(_, v)| v)
    }

    /// Remove an entry by key
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k.key_eq(key))?;
        Some(self.entries.remove(index).1)
    }

    /// Remove an entry by string key
    pub fn remove_str(&mut self, name: &str) -> Option<Value> {
        let index = self
            .entries
            .iter()
            .position(|(k, _)| k.as_str() == Some(name))?;
        Some(self.entries.remove(index).1)
    }

    /// Check if the map contains a key
    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Declared key tag
    pub fn key_tag(&self) -> WireTag {
        self.key_tag
    }

    /// Declared value tag
    pub fn value_tag(&self) -> WireTag {
        self.value_tag
    }

    /// Check if this map has the generic container shape (String keys)
    pub fn is_container(&self) -> bool {
        self.key_tag == WireTag::String
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    /// Consume the map, returning its entries
    pub fn into_entries(self) -> Vec<(Value, Value)> {
        self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.key_tag == other.key_tag
            && self.value_tag == other.value_tag
            && self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k) == Some(v))
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl From<Vec<$ty>> for Value {
                fn from(items: Vec<$ty>) -> Self {
                    Value::Array(Array {
                        element_tag: WireTag::$variant,
                        items: items.into_iter().map(Value::$variant).collect(),
                    })
                }
            }
        )*
    };
}

impl_scalar_from! {
    u8 => Byte,
    bool => Bool,
    i16 => Short,
    u16 => UShort,
    i32 => Int,
    u32 => UInt,
    i64 => Long,
    u64 => ULong,
    f32 => Float,
    String => String,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::dynamic(items))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::UShort(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::ULong(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::Array(a) => {
                f.write_str("[")?;
                for (i, item) in a.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}
