//! Symbol alphabet and on-disk constants.
//!
//! Every compressed stream starts with two 32-bit fields: the magic number
//! and a discriminator naming how the Huffman tree is stored.

use huffpack_core::error::{HuffError, Result};
use std::fmt;

/// Number of distinct input symbols (one per byte value).
pub const ALPHABET_SIZE: usize = 256;

/// Synthetic end-of-data symbol. Only ever a tree leaf, never input data.
pub const PSEUDO_EOF: u16 = ALPHABET_SIZE as u16;

/// Width of one input symbol in bits.
pub const BITS_PER_WORD: u8 = 8;

/// Width of the magic number, the discriminator and each stored count.
pub const BITS_PER_INT: u8 = 32;

/// Width of a leaf value in the stored tree; one more than a symbol so that
/// `PSEUDO_EOF` fits.
pub const LEAF_VALUE_BITS: u8 = BITS_PER_WORD + 1;

/// Magic number identifying huffpack streams.
pub const MAGIC_NUMBER: u32 = 0xface_8200;

/// Discriminator for the counts header.
pub const STORE_COUNTS: u32 = 0xface_8100;

/// Discriminator for the pre-order tree header.
pub const STORE_TREE: u32 = 0xface_8200;

/// How the Huffman tree is persisted in the stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderFormat {
    /// All 256 symbol counts, 32 bits each. The decoder rebuilds the tree.
    Counts,
    /// Pre-order tree shape: `0` for an internal node, `1` plus a 9-bit
    /// value for a leaf.
    #[default]
    Tree,
}

impl HeaderFormat {
    /// The 32-bit discriminator written after the magic number.
    pub fn discriminator(self) -> u32 {
        match self {
            Self::Counts => STORE_COUNTS,
            Self::Tree => STORE_TREE,
        }
    }

    /// Parse a discriminator read from a stream.
    pub fn from_discriminator(value: u32) -> Result<Self> {
        match value {
            STORE_COUNTS => Ok(Self::Counts),
            STORE_TREE => Ok(Self::Tree),
            other => Err(HuffError::unknown_format(other)),
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Counts => "counts",
            Self::Tree => "tree",
        }
    }
}

impl fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
