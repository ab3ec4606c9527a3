//! Container envelope
//!
//! File-level framing around exactly one root entry.
//!
//! ## File Layout
//!
//! ```text
//! +------------------+
//! | Magic (3 bytes)  |  "SBF"
//! +------------------+
//! | Version (2)      |  Format version (0), LE
//! +------------------+
//! | Compressed (1)   |  0 = plain, 1 = zstd
//! +------------------+
//! | Payload          |  Root entry (Dynamic-tagged), optionally one zstd frame
//! +------------------+
//! ```
//!
//! There is no payload length: the payload ends where the stream ends (or
//! where the zstd frame ends). Bytes after the root entry are rejected.

use crate::config::{CodecConfig, CodecConfigError};
use crate::entry::EntryCodec;
use byteorder::{LittleEndian, ReadBytesExt};
use sbf_core::{type_of, Error, Result, Value, WireTag};
use std::io::{self, Read, Write};
use tracing::{debug, warn};

/// File magic bytes
pub const SBF_MAGIC: &[u8; 3] = b"SBF";

/// Format version this implementation reads and writes
pub const SBF_FORMAT_VERSION: u16 = 0;

/// Header size: Magic(3) + Version(2) + Compressed(1)
pub const ENVELOPE_HEADER_SIZE: usize = 6;

/// Conventional file extension for SBF artifacts
pub const SBF_EXTENSION: &str = "sbf";

/// Parsed envelope header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeHeader {
    /// Format version
    pub version: u16,
    /// Whether the payload is zstd-compressed
    pub compressed: bool,
}

impl EnvelopeHeader {
    /// Create a header for the current format version
    pub fn new(compressed: bool) -> Self {
        EnvelopeHeader {
            version: SBF_FORMAT_VERSION,
            compressed,
        }
    }

    /// Serialize header to bytes (including magic)
    pub fn to_bytes(&self) -> [u8; ENVELOPE_HEADER_SIZE] {
        let version = self.version.to_le_bytes();
        [
            SBF_MAGIC[0],
            SBF_MAGIC[1],
            SBF_MAGIC[2],
            version[0],
            version[1],
            u8::from(self.compressed),
        ]
    }

    /// Read and validate a header from the start of a stream.
    ///
    /// The magic is checked before the rest is read so a foreign file
    /// reports `BadMagic` rather than a short read.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 3];
        reader.read_exact(&mut magic)?;
        if &magic != SBF_MAGIC {
            return Err(Error::BadMagic { found: magic });
        }

        let version = reader.read_u16::<LittleEndian>()?;
        if version != SBF_FORMAT_VERSION {
            return Err(Error::VersionMismatch {
                expected: SBF_FORMAT_VERSION,
                found: version,
            });
        }

        let compressed = match reader.read_u8()? {
            0 => false,
            1 => true,
            other => return Err(Error::InvalidCompressionFlag(other)),
        };

        Ok(EnvelopeHeader {
            version,
            compressed,
        })
    }
}

/// Envelope reader/writer bound to one codec configuration
#[derive(Debug, Clone)]
pub struct Envelope {
    codec: EntryCodec,
    compression_level: i32,
}

impl Default for Envelope {
    fn default() -> Self {
        let config = CodecConfig::default();
        Envelope {
            codec: EntryCodec::new(&config),
            compression_level: config.compression_level,
        }
    }
}

impl Envelope {
    /// Create an envelope with a validated configuration
    pub fn new(config: &CodecConfig) -> std::result::Result<Self, CodecConfigError> {
        config.validate()?;
        Ok(Envelope {
            codec: EntryCodec::new(config),
            compression_level: config.compression_level,
        })
    }

    /// Entry codec used for the payload
    pub fn codec(&self) -> &EntryCodec {
        &self.codec
    }

    /// Write header and root entry to `writer`
    pub fn write<W: Write>(&self, mut writer: W, value: &Value, compress: bool) -> Result<()> {
        writer.write_all(&EnvelopeHeader::new(compress).to_bytes())?;

        if compress {
            let mut encoder = zstd::Encoder::new(writer, self.compression_level)?;
            self.codec.write(&mut encoder, value, WireTag::Dynamic)?;
            encoder.finish()?.flush()?;
        } else {
            self.codec.write(&mut writer, value, WireTag::Dynamic)?;
            writer.flush()?;
        }

        debug!(target: "sbf::envelope", compressed = compress, root = %type_of(value.tag()), "Wrote envelope");
        Ok(())
    }

    /// Read header and root entry from `reader`
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Value> {
        let header = EnvelopeHeader::read_from(&mut reader).map_err(|e| {
            if e.is_header_error() {
                warn!(target: "sbf::envelope", error = %e, "Rejected envelope header");
            }
            e
        })?;

        let value = if header.compressed {
            let mut decoder = zstd::Decoder::new(SourceReader::new(reader))?;
            match self.read_root(&mut decoder) {
                Ok(value) => value,
                // I/O errors the source did not raise came from zstd
                Err(Error::Io(io)) if !decoder.get_ref().get_ref().failed => {
                    return Err(Error::Decompression(io.to_string()))
                }
                Err(e) => return Err(e),
            }
        } else {
            self.read_root(&mut reader)?
        };

        debug!(target: "sbf::envelope", compressed = header.compressed, root = %type_of(value.tag()), "Read envelope");
        Ok(value)
    }

    /// Serialize a root value to bytes
    pub fn serialize(&self, value: &Value, compress: bool) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf, value, compress)?;
        Ok(buf)
    }

    /// Deserialize a root value from bytes
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Value> {
        self.read(bytes)
    }

    fn read_root<R: Read>(&self, reader: &mut R) -> Result<Value> {
        let value = self.codec.read(reader, WireTag::Dynamic)?;
        let mut extra = [0u8; 1];
        if reader.read(&mut extra)? != 0 {
            return Err(Error::TrailingData);
        }
        Ok(value)
    }
}

/// Reader under the zstd decoder that records whether the source failed.
struct SourceReader<R> {
    inner: R,
    failed: bool,
}

impl<R> SourceReader<R> {
    fn new(inner: R) -> Self {
        SourceReader {
            inner,
            failed: false,
        }
    }
}

impl<R: Read> Read for SourceReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).map_err(|e| {
            if e.kind() != io::ErrorKind::Interrupted {
                self.failed = true;
            }
            e
        })
    }
}

/// Serialize a native value with the default configuration.
pub fn serialize_raw(value: &Value, compress: bool) -> Result<Vec<u8>> {
    Envelope::default().serialize(value, compress)
}

/// Deserialize a native value with the default configuration.
pub fn deserialize_raw(bytes: &[u8]) -> Result<Value> {
    Envelope::default().deserialize(bytes)
}

/// Write an envelope to a stream with the default configuration.
pub fn write_envelope<W: Write>(writer: W, value: &Value, compress: bool) -> Result<()> {
    Envelope::default().write(writer, value, compress)
}

/// Read an envelope from a stream with the default configuration.
///
/// The whole stream is consumed: anything after the root entry is
/// `TrailingData`.
pub fn read_envelope<R: Read>(reader: R) -> Result<Value> {
    Envelope::default().read(reader)
}

/// Validate and return the header without decoding the payload.
pub fn peek_header(bytes: &[u8]) -> Result<EnvelopeHeader> {
    let mut reader = bytes;
    EnvelopeHeader::read_from(&mut reader)
}
