//! Entry codec
//!
//! Recursive read/write of a single tagged value against a stream.
//!
//! # Binary Format
//!
//! ```text
//! entry        := TAG value            ; only when the tag is not implied
//! value(scalar) := fixed-width LE bytes
//! value(string) := len:varint7 UTF-8 bytes
//! value(array)  := count:u32 elemTag:u8 (elemTag-implied value){count}
//! value(dict)   := count:u32 keyTag:u8 valueTag:u8 (key, value){count}
//! ```
//!
//! All integers are little-endian. An implied tag of `Dynamic` means the
//! tag byte is written inline; inside collections this lets heterogeneous
//! elements describe themselves while homogeneous ones skip the byte.

use crate::config::CodecConfig;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use sbf_core::{Array, Error, Map, Result, Value, WireTag};
use std::io::{Read, Write};

/// Upper bound on pre-allocated collection capacity.
///
/// A corrupted count must not allocate before the stream proves it holds
/// that many entries.
const PREALLOC_LIMIT: usize = 1024;

/// Maximum bytes in a 7-bit length prefix for a u32.
const MAX_LENGTH_PREFIX_BYTES: u32 = 5;

/// Entry codec with depth and length limits
#[derive(Debug, Clone)]
pub struct EntryCodec {
    max_depth: usize,
    max_length: u32,
}

impl Default for EntryCodec {
    fn default() -> Self {
        EntryCodec::new(&CodecConfig::default())
    }
}

impl EntryCodec {
    /// Create a codec with the limits from `config`
    pub fn new(config: &CodecConfig) -> Self {
        EntryCodec {
            max_depth: config.max_depth,
            max_length: config.max_length,
        }
    }

    /// Write `value` as an entry.
    ///
    /// With `implied == Dynamic` the value's tag byte is written first;
    /// otherwise the tag is known from context and only the payload is written.
    pub fn write<W: Write>(&self, writer: &mut W, value: &Value, implied: WireTag) -> Result<()> {
        self.write_at(writer, value, implied, 0)
    }

    /// Write only the payload of `value` under an explicit tag.
    ///
    /// `Dynamic` is a meta-marker and never a storable kind, so passing it
    /// here fails with `InvalidTag`.
    pub fn write_payload<W: Write>(&self, writer: &mut W, tag: WireTag, value: &Value) -> Result<()> {
        self.write_payload_at(writer, tag, value, 0)
    }

    /// Read one entry.
    ///
    /// With `implied == Dynamic` a tag byte is read first.
    pub fn read<R: Read>(&self, reader: &mut R, implied: WireTag) -> Result<Value> {
        self.read_at(reader, implied, 0)
    }

    fn write_at<W: Write>(
        &self,
        writer: &mut W,
        value: &Value,
        implied: WireTag,
        depth: usize,
    ) -> Result<()> {
        let tag = if implied.is_dynamic() {
            let tag = value.tag();
            writer.write_u8(tag.as_byte())?;
            tag
        } else {
            implied
        };
        self.write_payload_at(writer, tag, value, depth)
    }

    fn write_payload_at<W: Write>(
        &self,
        writer: &mut W,
        tag: WireTag,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        match (tag, value) {
            (WireTag::Dynamic, _) => return Err(Error::InvalidTag(WireTag::Dynamic.as_byte())),
            (WireTag::Byte, Value::Byte(v)) => writer.write_u8(*v)?,
            (WireTag::Bool, Value::Bool(v)) => writer.write_u8(u8::from(*v))?,
            (WireTag::Short, Value::Short(v)) => writer.write_i16::<LittleEndian>(*v)?,
            (WireTag::UShort, Value::UShort(v)) => writer.write_u16::<LittleEndian>(*v)?,
            (WireTag::Int, Value::Int(v)) => writer.write_i32::<LittleEndian>(*v)?,
            (WireTag::UInt, Value::UInt(v)) => writer.write_u32::<LittleEndian>(*v)?,
            (WireTag::Long, Value::Long(v)) => writer.write_i64::<LittleEndian>(*v)?,
            (WireTag::ULong, Value::ULong(v)) => writer.write_u64::<LittleEndian>(*v)?,
            (WireTag::Float, Value::Float(v)) => writer.write_f32::<LittleEndian>(*v)?,
            (WireTag::String, Value::String(s)) => self.write_string(writer, s)?,
            (WireTag::Array, Value::Array(array)) => {
                self.check_depth(depth)?;
                let element_tag = array.element_tag();
                writer.write_u32::<LittleEndian>(self.check_count("array length", array.len())?)?;
                writer.write_u8(element_tag.as_byte())?;
                for item in array.iter() {
                    self.write_at(writer, item, element_tag, depth + 1)?;
                }
            }
            (WireTag::Dictionary, Value::Map(map)) => {
                self.check_depth(depth)?;
                let (key_tag, value_tag) = (map.key_tag(), map.value_tag());
                writer.write_u32::<LittleEndian>(self.check_count("dictionary length", map.len())?)?;
                writer.write_u8(key_tag.as_byte())?;
                writer.write_u8(value_tag.as_byte())?;
                for (key, value) in map.iter() {
                    self.write_at(writer, key, key_tag, depth + 1)?;
                    self.write_at(writer, value, value_tag, depth + 1)?;
                }
            }
            (expected, value) => {
                return Err(Error::TagMismatch {
                    expected,
                    found: value.tag(),
                })
            }
        }
        Ok(())
    }

    fn read_at<R: Read>(&self, reader: &mut R, implied: WireTag, depth: usize) -> Result<Value> {
        let tag = if implied.is_dynamic() {
            WireTag::try_from(reader.read_u8()?)?
        } else {
            implied
        };

        let value = match tag {
            WireTag::Dynamic => return Err(Error::InvalidTag(WireTag::Dynamic.as_byte())),
            WireTag::Byte => Value::Byte(reader.read_u8()?),
            // Only 1 reads as true
            WireTag::Bool => Value::Bool(reader.read_u8()? == 1),
            WireTag::Short => Value::Short(reader.read_i16::<LittleEndian>()?),
            WireTag::UShort => Value::UShort(reader.read_u16::<LittleEndian>()?),
            WireTag::Int => Value::Int(reader.read_i32::<LittleEndian>()?),
            WireTag::UInt => Value::UInt(reader.read_u32::<LittleEndian>()?),
            WireTag::Long => Value::Long(reader.read_i64::<LittleEndian>()?),
            WireTag::ULong => Value::ULong(reader.read_u64::<LittleEndian>()?),
            WireTag::Float => Value::Float(reader.read_f32::<LittleEndian>()?),
            WireTag::String => Value::String(self.read_string(reader)?),
            WireTag::Array => {
                self.check_depth(depth)?;
                let count = self.read_count(reader, "array length")?;
                let element_tag = WireTag::try_from(reader.read_u8()?)?;
                let mut items = Vec::with_capacity(count.min(PREALLOC_LIMIT));
                for _ in 0..count {
                    items.push(self.read_at(reader, element_tag, depth + 1)?);
                }
                Value::Array(Array::from_items(element_tag, items)?)
            }
            WireTag::Dictionary => {
                self.check_depth(depth)?;
                let count = self.read_count(reader, "dictionary length")?;
                let key_tag = WireTag::try_from(reader.read_u8()?)?;
                let value_tag = WireTag::try_from(reader.read_u8()?)?;
                let mut entries = Vec::with_capacity(count.min(PREALLOC_LIMIT));
                for _ in 0..count {
                    let key = self.read_at(reader, key_tag, depth + 1)?;
                    let value = self.read_at(reader, value_tag, depth + 1)?;
                    entries.push((key, value));
                }
                Value::Map(Map::from_entries(key_tag, value_tag, entries)?)
            }
        };
        Ok(value)
    }

    fn write_string<W: Write>(&self, writer: &mut W, s: &str) -> Result<()> {
        let bytes = s.as_bytes();
        let len = self.check_count("string length", bytes.len())?;
        write_length_prefix(writer, len)?;
        writer.write_all(bytes)?;
        Ok(())
    }

    fn read_string<R: Read>(&self, reader: &mut R) -> Result<String> {
        let len = read_length_prefix(reader)?;
        self.check_limit("string length", u64::from(len))?;

        let mut buf = Vec::with_capacity((len as usize).min(PREALLOC_LIMIT));
        reader.take(u64::from(len)).read_to_end(&mut buf)?;
        if buf.len() != len as usize {
            return Err(Error::UnexpectedEndOfStream);
        }
        String::from_utf8(buf)
            .map_err(|e| Error::Corrupted(format!("invalid UTF-8 in string: {}", e)))
    }

    fn read_count<R: Read>(&self, reader: &mut R, what: &'static str) -> Result<usize> {
        let count = reader.read_u32::<LittleEndian>()?;
        self.check_limit(what, u64::from(count))?;
        Ok(count as usize)
    }

    fn check_count(&self, what: &'static str, len: usize) -> Result<u32> {
        self.check_limit(what, len as u64)?;
        Ok(len as u32)
    }

    fn check_limit(&self, what: &'static str, actual: u64) -> Result<()> {
        if actual > u64::from(self.max_length) {
            return Err(Error::LimitExceeded {
                what,
                limit: u64::from(self.max_length),
                actual,
            });
        }
        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(Error::LimitExceeded {
                what: "nesting depth",
                limit: self.max_depth as u64,
                actual: depth as u64 + 1,
            });
        }
        Ok(())
    }
}

/// Write `len` as little-endian 7-bit groups, high bit set on all but the last.
fn write_length_prefix<W: Write>(writer: &mut W, mut len: u32) -> Result<()> {
    while len >= 0x80 {
        writer.write_u8((len as u8) | 0x80)?;
        len >>= 7;
    }
    writer.write_u8(len as u8)?;
    Ok(())
}

fn read_length_prefix<R: Read>(reader: &mut R) -> Result<u32> {
    let mut len = 0u32;
    for i in 0..MAX_LENGTH_PREFIX_BYTES {
        let byte = reader.read_u8()?;
        let shift = i * 7;
        // The fifth group only has room for the top four bits of a u32
        if i == MAX_LENGTH_PREFIX_BYTES - 1 && byte > 0x0F {
            return Err(Error::Corrupted("overlong string length prefix".to_string()));
        }
        len |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(len);
        }
    }
    Err(Error::Corrupted("overlong string length prefix".to_string()))
}

/// Write `value` as an entry using the default codec limits.
pub fn write_entry<W: Write>(writer: &mut W, value: &Value, implied: WireTag) -> Result<()> {
    EntryCodec::default().write(writer, value, implied)
}

/// Read one entry using the default codec limits.
pub fn read_entry<R: Read>(reader: &mut R, implied: WireTag) -> Result<Value> {
    EntryCodec::default().read(reader, implied)
}
