//! Codec configuration.
//!
//! This module provides configuration for the entry codec and the envelope.

/// Default zstd compression level.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Default maximum nesting depth of arrays and dictionaries.
///
/// With the default configuration, encoding or decoding a tree with more
/// than 128 nested collections fails with `Error::LimitExceeded`. Raise
/// [`CodecConfig::max_depth`] to handle deeper trees.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Largest element count or string byte length the format allows.
///
/// Counts are stored as u32 but older readers treat them as signed 32-bit.
pub const MAX_FORMAT_LENGTH: u32 = i32::MAX as u32;

/// Codec configuration parameters.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// zstd level used when compression is requested (default: 3).
    pub compression_level: i32,

    /// Maximum nesting depth of collections (default: 128).
    ///
    /// Applies to both encode and decode so a crafted stream cannot drive
    /// unbounded recursion. Deeper trees fail with `Error::LimitExceeded`.
    pub max_depth: usize,

    /// Maximum element count of one collection and maximum byte length of
    /// one string (default: `MAX_FORMAT_LENGTH`).
    pub max_length: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: MAX_FORMAT_LENGTH,
        }
    }
}

impl CodecConfig {
    /// Create a new codec configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression level (builder pattern).
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    /// Set maximum nesting depth (builder pattern).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set maximum collection/string length (builder pattern).
    pub fn with_max_length(mut self, length: u32) -> Self {
        self.max_length = length;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), CodecConfigError> {
        if !(1..=22).contains(&self.compression_level) {
            return Err(CodecConfigError::CompressionLevelOutOfRange(
                self.compression_level,
            ));
        }
        if self.max_depth == 0 {
            return Err(CodecConfigError::ZeroDepth);
        }
        if self.max_length == 0 || self.max_length > MAX_FORMAT_LENGTH {
            return Err(CodecConfigError::LengthOutOfRange(self.max_length));
        }
        Ok(())
    }

    /// Create a configuration for testing (tight limits, fast compression).
    pub fn for_testing() -> Self {
        CodecConfig {
            compression_level: 1,
            max_depth: 16,
            max_length: 64 * 1024,
        }
    }
}

/// Codec configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecConfigError {
    /// Compression level is outside zstd's 1..=22 range.
    #[error("Compression level {0} is outside 1..=22")]
    CompressionLevelOutOfRange(i32),

    /// Maximum depth of zero would reject every collection.
    #[error("Maximum depth must be at least 1")]
    ZeroDepth,

    /// Maximum length is zero or above the format ceiling.
    #[error("Maximum length {0} must be between 1 and 2147483647")]
    LengthOutOfRange(u32),
}
