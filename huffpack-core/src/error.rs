//! Error types for huffpack operations.
//!
//! A single error enum covers every failure the codec can report: the
//! "no benefit" refusal, header format violations, truncated bitstreams and
//! I/O errors from the underlying reader or writer.

use std::io;
use thiserror::Error;

/// The main error type for huffpack operations.
#[derive(Debug, Error)]
pub enum HuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Compression would not make the data smaller and was not forced.
    #[error("Compression does not save any space ({savings_bits} bits saved)")]
    NoSavings {
        /// Estimated savings in bits (zero or negative).
        savings_bits: i64,
    },

    /// Magic number at the start of the stream does not match.
    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// Expected magic number.
        expected: u32,
        /// Value found in the stream.
        found: u32,
    },

    /// Header format discriminator is not one this codec knows.
    #[error("Unknown header format: {found:#010x}")]
    UnknownFormat {
        /// Discriminator found in the stream.
        found: u32,
    },

    /// Stored tree is malformed.
    #[error("Invalid Huffman tree: {message}")]
    InvalidTree {
        /// Description of the problem.
        message: String,
    },

    /// Bitstream ended before the end-of-data code was decoded.
    #[error("Truncated stream at bit position {bit_position}")]
    Truncated {
        /// Number of bits consumed before the stream ran out.
        bit_position: u64,
    },

    /// A symbol count does not fit the 32-bit header field.
    #[error("Count {count} for symbol {symbol} does not fit in 32 bits")]
    CountOverflow {
        /// Symbol whose count overflowed.
        symbol: u16,
        /// The count.
        count: u64,
    },

    /// Source yielded a different number of symbols on the encoding pass
    /// than on the frequency pass.
    #[error("Source changed between passes: planned {planned} symbols, encoded {encoded}")]
    SourceChanged {
        /// Symbols counted by the frequency pass.
        planned: u64,
        /// Symbols read by the encoding pass.
        encoded: u64,
    },

    /// Invalid bit width requested from a bit reader or writer.
    #[error("Invalid bit width: {0} (must be 1-32)")]
    InvalidBitWidth(u8),
}

/// Result type alias for huffpack operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create a no-savings error.
    pub fn no_savings(savings_bits: i64) -> Self {
        Self::NoSavings { savings_bits }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: u32, found: u32) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create an unknown format error.
    pub fn unknown_format(found: u32) -> Self {
        Self::UnknownFormat { found }
    }

    /// Create an invalid tree error.
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64) -> Self {
        Self::Truncated { bit_position }
    }

    /// Create a count overflow error.
    pub fn count_overflow(symbol: u16, count: u64) -> Self {
        Self::CountOverflow { symbol, count }
    }

    /// Create a source changed error.
    pub fn source_changed(planned: u64, encoded: u64) -> Self {
        Self::SourceChanged { planned, encoded }
    }

    /// True for errors that mean the stream is not a valid huffpack file.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic { .. } | Self::UnknownFormat { .. } | Self::InvalidTree { .. }
        )
    }
}
