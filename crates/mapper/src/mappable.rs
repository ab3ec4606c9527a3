//! Mappable trait and implementations for native and collection types
//!
//! A `Mappable` type knows its [`TypeDescriptor`] and how to convert itself
//! to and from a native [`Value`]. Native scalars convert 1:1; collections
//! convert element-wise; records go through their descriptor table.
//!
//! ## Target Resolution
//!
//! - `Value` is the "any" target and passes through unchanged
//! - a scalar target takes its exact kind, or parses a String through the
//!   mapper's text codec
//! - every other shape is `UnmappableShape`

use crate::mapper::Mapper;
use sbf_core::{tag_of, Array, Error, Map, Result, TypeDescriptor, Value, WireTag};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Conversion between a Rust type and the native value model
pub trait Mappable: Sized {
    /// Descriptor of this type as seen by the registry
    fn descriptor() -> TypeDescriptor;

    /// Map this value to a native value
    fn to_native(&self, mapper: &Mapper) -> Result<Value>;

    /// Populate this type from a native value
    fn from_native(value: Value, mapper: &Mapper) -> Result<Self>;
}

/// Wire tag of the mapped form of a type.
///
/// Records map to Dictionary, opaque types to String, and collections keep
/// their container tag even when their elements are not natively encodable.
pub fn mapped_tag(ty: &TypeDescriptor) -> WireTag {
    match ty {
        TypeDescriptor::Record(_) => WireTag::Dictionary,
        TypeDescriptor::Opaque(_) => WireTag::String,
        TypeDescriptor::Array(_) => WireTag::Array,
        TypeDescriptor::Map(..) => WireTag::Dictionary,
        other => tag_of(other).unwrap_or(WireTag::Dynamic),
    }
}

macro_rules! impl_scalar_mappable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Mappable for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::$variant
                }

                fn to_native(&self, _mapper: &Mapper) -> Result<Value> {
                    Ok(Value::$variant(*self))
                }

                fn from_native(value: Value, mapper: &Mapper) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        Value::String(text) => mapper.parse_text(&text),
                        other => Err(Error::unmappable_shape(stringify!($ty), other.tag())),
                    }
                }
            }
        )*
    };
}

impl_scalar_mappable! {
    u8 => Byte,
    bool => Bool,
    i16 => Short,
    u16 => UShort,
    i32 => Int,
    u32 => UInt,
    i64 => Long,
    u64 => ULong,
    f32 => Float,
}

impl Mappable for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::String
    }

    fn to_native(&self, _mapper: &Mapper) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }

    fn from_native(value: Value, _mapper: &Mapper) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::unmappable_shape("String", other.tag())),
        }
    }
}

impl Mappable for Value {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Any
    }

    fn to_native(&self, _mapper: &Mapper) -> Result<Value> {
        Ok(self.clone())
    }

    fn from_native(value: Value, _mapper: &Mapper) -> Result<Self> {
        Ok(value)
    }
}

impl<T: Mappable> Mappable for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array_of(T::descriptor())
    }

    fn to_native(&self, mapper: &Mapper) -> Result<Value> {
        let items = self
            .iter()
            .map(|item| item.to_native(mapper))
            .collect::<Result<Vec<_>>>()?;
        let array = Array::from_items(mapped_tag(&T::descriptor()), items)?;
        Ok(Value::Array(array))
    }

    fn from_native(value: Value, mapper: &Mapper) -> Result<Self> {
        match value {
            Value::Array(array) => array
                .into_items()
                .into_iter()
                .map(|item| T::from_native(item, mapper))
                .collect(),
            other => Err(Error::unmappable_shape(
                Self::descriptor().to_string(),
                other.tag(),
            )),
        }
    }
}

fn map_to_native<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    mapper: &Mapper,
) -> Result<Value>
where
    K: Mappable + 'a,
    V: Mappable + 'a,
{
    let entries = entries
        .map(|(k, v)| Ok((k.to_native(mapper)?, v.to_native(mapper)?)))
        .collect::<Result<Vec<_>>>()?;
    let map = Map::from_entries(
        mapped_tag(&K::descriptor()),
        mapped_tag(&V::descriptor()),
        entries,
    )?;
    Ok(Value::Map(map))
}

fn map_from_native<K, V, C>(value: Value, mapper: &Mapper, target: TypeDescriptor) -> Result<C>
where
    K: Mappable,
    V: Mappable,
    C: FromIterator<(K, V)>,
{
    match value {
        Value::Map(map) => map
            .into_entries()
            .into_iter()
            .map(|(k, v)| Ok((K::from_native(k, mapper)?, V::from_native(v, mapper)?)))
            .collect(),
        other => Err(Error::unmappable_shape(target.to_string(), other.tag())),
    }
}

impl<K, V, S> Mappable for HashMap<K, V, S>
where
    K: Mappable + Eq + Hash,
    V: Mappable,
    S: BuildHasher + Default,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map_of(K::descriptor(), V::descriptor())
    }

    fn to_native(&self, mapper: &Mapper) -> Result<Value> {
        map_to_native(self.iter(), mapper)
    }

    fn from_native(value: Value, mapper: &Mapper) -> Result<Self> {
        map_from_native(value, mapper, Self::descriptor())
    }
}

impl<K, V> Mappable for BTreeMap<K, V>
where
    K: Mappable + Ord,
    V: Mappable,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map_of(K::descriptor(), V::descriptor())
    }

    fn to_native(&self, mapper: &Mapper) -> Result<Value> {
        map_to_native(self.iter(), mapper)
    }

    fn from_native(value: Value, mapper: &Mapper) -> Result<Self> {
        map_from_native(value, mapper, Self::descriptor())
    }
}
