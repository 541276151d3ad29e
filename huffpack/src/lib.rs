//! # huffpack: Pure Rust Static Huffman Compression
//!
//! This crate compresses byte streams with a static Huffman code built from
//! the input's own symbol frequencies.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Two header formats**: store the 256 symbol counts, or the tree shape
//! - **Deterministic**: identical input always gives identical output
//! - **Refuses to grow data**: compression that would not save space fails
//!   with `NoSavings` unless forced
//!
//! ## Stream Format
//!
//! All fields are packed MSB-first:
//!
//! - **Magic number** (32 bits): `0xface8200`
//! - **Format** (32 bits): `0xface8100` (counts) or `0xface8200` (tree)
//! - **Header body**: 256 x 32-bit counts, or the pre-order tree
//! - **Codes**: one prefix code per input byte
//! - **Terminator**: the code of the synthetic end-of-data symbol
//! - **Padding**: zero bits up to the next byte boundary
//!
//! ## Example
//!
//! ```rust
//! use huffpack::{HuffConfig, compress, decompress};
//!
//! let original = b"abracadabra abracadabra abracadabra abracadabra";
//!
//! let compressed = compress(original, HuffConfig::TREE).unwrap();
//! assert!(compressed.len() < original.len());
//!
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Refusal
//!
//! Short inputs rarely pay for their header:
//!
//! ```rust
//! use huffpack::{HuffConfig, HuffError, compress, decompress};
//!
//! let err = compress(b"hi", HuffConfig::COUNTS).unwrap_err();
//! assert!(matches!(err, HuffError::NoSavings { .. }));
//!
//! let forced = compress(b"hi", HuffConfig::COUNTS.with_force(true)).unwrap();
//! assert_eq!(decompress(&forced).unwrap(), b"hi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod encoder;
mod format;
mod frequency;
mod header;
mod table;
mod tree;

pub use config::HuffConfig;
pub use decoder::{DecompressSummary, HuffDecoder, StreamInfo};
pub use encoder::{CompressSummary, CompressionPlan, HuffEncoder};
pub use format::{
    ALPHABET_SIZE, BITS_PER_INT, BITS_PER_WORD, HeaderFormat, LEAF_VALUE_BITS, MAGIC_NUMBER,
    PSEUDO_EOF, STORE_COUNTS, STORE_TREE,
};
pub use frequency::FrequencyTable;
pub use header::{CountsHeader, HeaderCodec, MAX_TREE_DEPTH, PRELUDE_BITS, TreeHeader};
pub use huffpack_core::{HuffError, Result, StatusObserver};
pub use table::{Code, EncodingTable, MAX_CODE_LENGTH};
pub use tree::{HuffmanTree, Node};

use std::io::Cursor;

/// Compress `data` with the given configuration.
///
/// # Example
///
/// ```rust
/// use huffpack::{compress, HuffConfig};
///
/// let data = vec![b'x'; 1000];
/// let compressed = compress(&data, HuffConfig::TREE).unwrap();
/// assert!(compressed.len() < data.len() / 4);
/// ```
pub fn compress(data: &[u8], config: HuffConfig) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    HuffEncoder::new(config).compress(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Decompress a huffpack stream. The header format is read from the stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    HuffDecoder::new().decompress(data, &mut output)?;
    Ok(output)
}

/// Estimate the compressed size of `data` without producing output.
///
/// # Example
///
/// ```rust
/// use huffpack::{estimate, HeaderFormat};
///
/// let plan = estimate(b"aaaaa", HeaderFormat::Tree).unwrap();
/// // one bit per 'a' plus one bit for the end marker
/// assert_eq!(plan.encoded_bits - plan.header_bits, 6);
/// ```
pub fn estimate(data: &[u8], format: HeaderFormat) -> Result<CompressionPlan> {
    HuffEncoder::new(HuffConfig::new(format)).preprocess(&mut Cursor::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_tree() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT".repeat(8);
        let compressed = compress(&original, HuffConfig::TREE).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_counts() {
        let original = b"This is a test of compression! ".repeat(100);
        let compressed = compress(&original, HuffConfig::COUNTS).unwrap();
        assert!(compressed.len() < original.len());
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_empty_input_forced() {
        for config in [HuffConfig::COUNTS, HuffConfig::TREE] {
            let compressed = compress(b"", config.with_force(true)).unwrap();
            assert_eq!(decompress(&compressed).unwrap(), b"");
        }
    }

    #[test]
    fn test_empty_input_refused() {
        let err = compress(b"", HuffConfig::TREE).unwrap_err();
        assert!(matches!(err, HuffError::NoSavings { .. }));
    }

    #[test]
    fn test_all_byte_values() {
        let original: Vec<u8> = (0..=255).collect();
        let compressed = compress(&original, HuffConfig::TREE.with_force(true)).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_estimate_matches_compress() {
        let original = b"estimate me precisely".repeat(30);
        let plan = estimate(&original, HeaderFormat::Tree).unwrap();
        let compressed = compress(&original, HuffConfig::TREE).unwrap();
        assert_eq!(compressed.len() as u64, plan.compressed_len());
    }
}
