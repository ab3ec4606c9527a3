//! Text fallback capability.
//!
//! Values that are neither native nor records are stored as an opaque String
//! produced by an injected [`TextCodec`]. The mapper serializes the value to a
//! `serde_json::Value` first, so codecs only deal with one intermediate form.

use crate::mapper::Mapper;
use crate::mappable::Mappable;
use sbf_core::{Error, Result, TypeDescriptor, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::type_name;
use std::ops::{Deref, DerefMut};

/// Object-to-text codec supplied by the embedding application.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync` so one mapper can be shared across threads.
pub trait TextCodec: Send + Sync {
    /// Render a value as text.
    fn encode(&self, value: &serde_json::Value) -> std::result::Result<String, TextCodecError>;

    /// Parse text produced by [`TextCodec::encode`].
    fn decode(&self, text: &str) -> std::result::Result<serde_json::Value, TextCodecError>;

    /// Unique codec identifier.
    fn codec_id(&self) -> &str;
}

/// Text codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Text codec error (codec={codec_id}): {detail}")]
pub struct TextCodecError {
    /// Human-readable error description
    pub detail: String,
    /// Codec ID that failed
    pub codec_id: String,
}

impl TextCodecError {
    /// Create an error with codec context.
    pub fn new(detail: impl Into<String>, codec_id: impl Into<String>) -> Self {
        TextCodecError {
            detail: detail.into(),
            codec_id: codec_id.into(),
        }
    }
}

/// Compact JSON text codec (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTextCodec;

impl TextCodec for JsonTextCodec {
    fn encode(&self, value: &serde_json::Value) -> std::result::Result<String, TextCodecError> {
        serde_json::to_string(value).map_err(|e| TextCodecError::new(e.to_string(), "json"))
    }

    fn decode(&self, text: &str) -> std::result::Result<serde_json::Value, TextCodecError> {
        serde_json::from_str(text).map_err(|e| TextCodecError::new(e.to_string(), "json"))
    }

    fn codec_id(&self) -> &str {
        "json"
    }
}

/// Field wrapper that maps `T` through the mapper's text codec.
///
/// Use it for members whose type is outside the closed model, e.g. timestamps
/// or enums: `created: Text<DateTime<Utc>>`. Serde sees straight through it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Text<T>(pub T);

impl<T> Text<T> {
    /// Unwrap the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Text<T> {
    fn from(value: T) -> Self {
        Text(value)
    }
}

impl<T> Deref for Text<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Text<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Serialize + DeserializeOwned> Mappable for Text<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Opaque(type_name::<T>())
    }

    fn to_native(&self, mapper: &Mapper) -> Result<Value> {
        mapper.to_text(&self.0).map(Value::String)
    }

    fn from_native(value: Value, mapper: &Mapper) -> Result<Self> {
        match value {
            Value::String(text) => mapper.parse_text(&text).map(Text),
            other => Err(Error::unmappable_shape(type_name::<T>(), other.tag())),
        }
    }
}
