//! Serializer handle
//!
//! Binds an [`Envelope`] (codec limits, compression level) to a [`Mapper`]
//! (text codec) so records go to bytes in one call.

use sbf_core::Result;
use sbf_format::{CodecConfig, CodecConfigError, Envelope};
use sbf_mapper::{Mappable, Mapper};
use std::io::{Read, Write};

/// Record serializer
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    envelope: Envelope,
    mapper: Mapper,
}

impl Serializer {
    /// Create a serializer with a validated configuration and the default mapper
    pub fn new(config: &CodecConfig) -> std::result::Result<Self, CodecConfigError> {
        Ok(Serializer {
            envelope: Envelope::new(config)?,
            mapper: Mapper::default(),
        })
    }

    /// Replace the mapper (e.g. to inject a custom text codec)
    pub fn with_mapper(mut self, mapper: Mapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Envelope used for framing
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Mapper used for records
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// Map `record` and write it as an envelope
    pub fn write<T: Mappable, W: Write>(&self, writer: W, record: &T, compress: bool) -> Result<()> {
        let value = self.mapper.to_container(record)?;
        self.envelope.write(writer, &value, compress)
    }

    /// Read an envelope and map the root to `T`
    pub fn read<T: Mappable, R: Read>(&self, reader: R) -> Result<T> {
        let value = self.envelope.read(reader)?;
        self.mapper.from_container(value)
    }

    /// Serialize `record` to bytes
    pub fn serialize<T: Mappable>(&self, record: &T, compress: bool) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf, record, compress)?;
        Ok(buf)
    }

    /// Deserialize a `T` from bytes
    pub fn deserialize<T: Mappable>(&self, bytes: &[u8]) -> Result<T> {
        self.read(bytes)
    }
}

/// Serialize a record with the default configuration.
pub fn serialize<T: Mappable>(record: &T, compress: bool) -> Result<Vec<u8>> {
    Serializer::default().serialize(record, compress)
}

/// Deserialize a record with the default configuration.
pub fn deserialize<T: Mappable>(bytes: &[u8]) -> Result<T> {
    Serializer::default().deserialize(bytes)
}
