//! Record <-> container walk
//!
//! The [`Mapper`] turns records into Generic Containers (String keys,
//! Dynamic values, members in declaration order) and back, using only the
//! descriptor tables built by [`record!`](crate::record). It also owns the
//! text codec used for values outside the closed model.

use crate::mappable::Mappable;
use crate::record::Record;
use crate::text::{JsonTextCodec, TextCodec};
use rustc_hash::FxHashMap;
use sbf_core::{Error, Map, Result, Value, WireTag};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Structure mapper.
///
/// Stateless apart from the injected text codec; cheap to clone and safe to
/// share across threads.
#[derive(Clone)]
pub struct Mapper {
    text: Arc<dyn TextCodec>,
}

impl Default for Mapper {
    fn default() -> Self {
        Mapper::with_codec(JsonTextCodec)
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("text_codec", &self.text.codec_id())
            .finish()
    }
}

impl Mapper {
    /// Mapper with the default JSON text codec
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper with a custom text codec
    pub fn with_codec(codec: impl TextCodec + 'static) -> Self {
        Mapper {
            text: Arc::new(codec),
        }
    }

    /// Text codec used for the fallback path
    pub fn text_codec(&self) -> &dyn TextCodec {
        self.text.as_ref()
    }

    /// Map any mappable value to its native form
    pub fn to_container<T: Mappable>(&self, value: &T) -> Result<Value> {
        value.to_native(self)
    }

    /// Map a native value to `T`
    pub fn from_container<T: Mappable>(&self, value: Value) -> Result<T> {
        T::from_native(value, self)
    }

    /// Render a value through the text codec
    pub fn to_text<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json =
            serde_json::to_value(value).map_err(|e| Error::unmappable_type(type_name::<T>(), e))?;
        self.text
            .encode(&json)
            .map_err(|e| Error::unmappable_type(type_name::<T>(), e))
    }

    /// Parse text produced by [`Mapper::to_text`]
    pub fn parse_text<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        let json = self
            .text
            .decode(text)
            .map_err(|e| Error::unmappable_type(type_name::<T>(), e))?;
        serde_json::from_value(json).map_err(|e| Error::unmappable_type(type_name::<T>(), e))
    }

    /// Build a Generic Container from a record's encoded members
    pub fn record_to_container<T: Record>(&self, record: &T) -> Result<Value> {
        let fields = T::fields();
        let mut entries = Vec::with_capacity(fields.len());
        for field in fields.iter().filter(|f| f.is_encoded()) {
            let value = field.read(record, self)?;
            entries.push((Value::String(field.name().to_string()), value));
        }
        let map = Map::from_entries(WireTag::String, WireTag::Dynamic, entries)?;
        Ok(Value::Map(map))
    }

    /// Populate a record from a Generic Container.
    ///
    /// Each decodable member takes its current key; when that is absent the
    /// former names are tried in declared order. Lookups never consume a
    /// key, so every member sees the whole container regardless of
    /// declaration order. Members found under no key keep their default.
    /// Non-String keys are ignored.
    pub fn record_from_container<T: Record>(&self, value: Value) -> Result<T> {
        let map = match value {
            Value::Map(map) if matches!(map.key_tag(), WireTag::String | WireTag::Dynamic) => map,
            other => return Err(Error::unmappable_shape(T::NAME, other.tag())),
        };

        let members: FxHashMap<String, Value> = map
            .into_entries()
            .into_iter()
            .filter_map(|(key, value)| match key {
                Value::String(name) => Some((name, value)),
                _ => None,
            })
            .collect();

        let mut record = T::default();
        for field in T::fields().iter().filter(|f| f.is_decoded()) {
            let found = match members.get(field.name()).cloned() {
                Some(value) => Some(value),
                None => field.former_names().iter().find_map(|former| {
                    let value = members.get(*former)?.clone();
                    debug!(
                        target: "sbf::mapper",
                        record = T::NAME,
                        member = field.name(),
                        former = *former,
                        "Resolved member from former name"
                    );
                    Some(value)
                }),
            };
            if let Some(value) = found {
                field.write(&mut record, value, self)?;
            }
        }
        Ok(record)
    }
}
