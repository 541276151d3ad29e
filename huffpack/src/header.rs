//! Stream header: prelude plus one of two tree encodings.
//!
//! ```text
//! +--------------+---------------+----------------------------------+
//! | magic (32)   | format (32)   | body                             |
//! +--------------+---------------+----------------------------------+
//!                                  counts: 256 x 32-bit counts
//!                                  tree:   pre-order, 0 = internal,
//!                                          1 + 9-bit value = leaf
//! ```

use crate::format::{
    ALPHABET_SIZE, BITS_PER_INT, HeaderFormat, LEAF_VALUE_BITS, MAGIC_NUMBER, PSEUDO_EOF,
};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use huffpack_core::bitstream::{BitReader, BitWriter};
use huffpack_core::error::{HuffError, Result};
use std::io::{Read, Write};

/// Bits taken by the magic number and the format discriminator.
pub const PRELUDE_BITS: u64 = 2 * BITS_PER_INT as u64;

/// Deepest tree a tree header may describe. A tree over 257 leaves is
/// never deeper than 256.
pub const MAX_TREE_DEPTH: usize = ALPHABET_SIZE;

/// One way of persisting the information needed to rebuild the tree.
pub trait HeaderCodec {
    /// Format this codec reads and writes.
    fn format(&self) -> HeaderFormat;

    /// Size of the header body in bits, prelude excluded.
    fn body_bits(&self, tree: &HuffmanTree) -> u64;

    /// Check that the header can be written, before any output is produced.
    fn validate(&self, _frequencies: &FrequencyTable) -> Result<()> {
        Ok(())
    }

    /// Write the header body.
    fn write_body<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        frequencies: &FrequencyTable,
        tree: &HuffmanTree,
    ) -> Result<()>;

    /// Read the header body and rebuild the tree.
    fn read_body<R: Read>(&self, reader: &mut BitReader<R>) -> Result<HuffmanTree>;
}

/// Header body holding all 256 symbol counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountsHeader;

impl HeaderCodec for CountsHeader {
    fn format(&self) -> HeaderFormat {
        HeaderFormat::Counts
    }

    fn body_bits(&self, _tree: &HuffmanTree) -> u64 {
        ALPHABET_SIZE as u64 * BITS_PER_INT as u64
    }

    fn validate(&self, frequencies: &FrequencyTable) -> Result<()> {
        for (symbol, count) in frequencies.iter_nonzero() {
            if u32::try_from(count).is_err() {
                return Err(HuffError::count_overflow(symbol as u16, count));
            }
        }
        Ok(())
    }

    fn write_body<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        frequencies: &FrequencyTable,
        _tree: &HuffmanTree,
    ) -> Result<()> {
        for (symbol, &count) in frequencies.counts().iter().enumerate() {
            let value = u32::try_from(count)
                .map_err(|_| HuffError::count_overflow(symbol as u16, count))?;
            writer.write_bits(value, BITS_PER_INT)?;
        }
        Ok(())
    }

    fn read_body<R: Read>(&self, reader: &mut BitReader<R>) -> Result<HuffmanTree> {
        let mut counts = [0u64; ALPHABET_SIZE];
        for count in counts.iter_mut() {
            *count = reader.read_bits(BITS_PER_INT)? as u64;
        }
        Ok(HuffmanTree::build(&FrequencyTable::from_counts(counts)))
    }
}

/// Header body holding the tree shape in pre-order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeHeader;

impl TreeHeader {
    fn write_node<W: Write>(writer: &mut BitWriter<W>, node: &Node) -> Result<()> {
        match node {
            Node::Leaf { symbol, .. } => {
                writer.write_bit(true)?;
                writer.write_bits(*symbol as u32, LEAF_VALUE_BITS)
            }
            Node::Internal { left, right, .. } => {
                writer.write_bit(false)?;
                Self::write_node(writer, left)?;
                Self::write_node(writer, right)
            }
        }
    }

    fn read_node<R: Read>(reader: &mut BitReader<R>, depth: usize) -> Result<Node> {
        if depth > MAX_TREE_DEPTH {
            return Err(HuffError::invalid_tree(format!(
                "tree deeper than {MAX_TREE_DEPTH} levels"
            )));
        }

        if reader.read_bit()? {
            let value = reader.read_bits(LEAF_VALUE_BITS)?;
            if value > PSEUDO_EOF as u32 {
                return Err(HuffError::invalid_tree(format!(
                    "leaf value {value} out of range"
                )));
            }
            Ok(Node::leaf(value as u16, 0))
        } else {
            let left = Self::read_node(reader, depth + 1)?;
            let right = Self::read_node(reader, depth + 1)?;
            Ok(Node::internal(left, right))
        }
    }
}

impl HeaderCodec for TreeHeader {
    fn format(&self) -> HeaderFormat {
        HeaderFormat::Tree
    }

    fn body_bits(&self, tree: &HuffmanTree) -> u64 {
        tree.internal_count() as u64 + tree.leaf_count() as u64 * (LEAF_VALUE_BITS as u64 + 1)
    }

    fn write_body<W: Write>(
        &self,
        writer: &mut BitWriter<W>,
        _frequencies: &FrequencyTable,
        tree: &HuffmanTree,
    ) -> Result<()> {
        Self::write_node(writer, tree.root())
    }

    fn read_body<R: Read>(&self, reader: &mut BitReader<R>) -> Result<HuffmanTree> {
        let root = Self::read_node(reader, 0)?;
        HuffmanTree::from_root(root)
    }
}

/// Prelude naming the codec's format, then the codec's body.
fn write_with<C: HeaderCodec, W: Write>(
    codec: &C,
    writer: &mut BitWriter<W>,
    frequencies: &FrequencyTable,
    tree: &HuffmanTree,
) -> Result<()> {
    writer.write_bits(MAGIC_NUMBER, BITS_PER_INT)?;
    writer.write_bits(codec.format().discriminator(), BITS_PER_INT)?;
    codec.write_body(writer, frequencies, tree)
}

impl HeaderFormat {
    /// Total header size in bits, prelude included.
    pub fn header_bits(self, tree: &HuffmanTree) -> u64 {
        PRELUDE_BITS
            + match self {
                Self::Counts => CountsHeader.body_bits(tree),
                Self::Tree => TreeHeader.body_bits(tree),
            }
    }

    pub(crate) fn validate(self, frequencies: &FrequencyTable) -> Result<()> {
        match self {
            Self::Counts => CountsHeader.validate(frequencies),
            Self::Tree => TreeHeader.validate(frequencies),
        }
    }

    /// Write prelude and body.
    pub fn write_header<W: Write>(
        self,
        writer: &mut BitWriter<W>,
        frequencies: &FrequencyTable,
        tree: &HuffmanTree,
    ) -> Result<()> {
        match self {
            Self::Counts => write_with(&CountsHeader, writer, frequencies, tree),
            Self::Tree => write_with(&TreeHeader, writer, frequencies, tree),
        }
    }

    /// Read and check the prelude, returning the stream's format.
    pub fn read_prelude<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let magic = reader.read_bits(BITS_PER_INT)?;
        if magic != MAGIC_NUMBER {
            return Err(HuffError::invalid_magic(MAGIC_NUMBER, magic));
        }
        Self::from_discriminator(reader.read_bits(BITS_PER_INT)?)
    }

    /// Read the header body for this format.
    pub fn read_body<R: Read>(self, reader: &mut BitReader<R>) -> Result<HuffmanTree> {
        match self {
            Self::Counts => CountsHeader.read_body(reader),
            Self::Tree => TreeHeader.read_body(reader),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn header_bytes(format: HeaderFormat, data: &[u8]) -> (Vec<u8>, u64, HuffmanTree) {
        let freq = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::build(&freq);
        let mut writer = BitWriter::new(Vec::new());
        format.write_header(&mut writer, &freq, &tree).unwrap();
        let bits = writer.bits_written();
        (writer.finish().unwrap(), bits, tree)
    }

    #[test]
    fn test_counts_header_size() {
        let (bytes, bits, tree) = header_bytes(HeaderFormat::Counts, b"hello");
        assert_eq!(bits, 64 + 256 * 32);
        assert_eq!(bits, HeaderFormat::Counts.header_bits(&tree));
        assert_eq!(bytes.len(), 8 + 1024);
        assert_eq!(&bytes[..8], &[0xfa, 0xce, 0x82, 0x00, 0xfa, 0xce, 0x81, 0x00]);
    }

    #[test]
    fn test_prelude_names_format() {
        for format in [HeaderFormat::Counts, HeaderFormat::Tree] {
            let (bytes, _, _) = header_bytes(format, b"prelude");
            let discriminator = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
            assert_eq!(discriminator, format.discriminator());
        }
        assert_eq!(CountsHeader.format(), HeaderFormat::Counts);
        assert_eq!(TreeHeader.format(), HeaderFormat::Tree);
    }

    #[test]
    fn test_tree_header_size() {
        let (_, bits, tree) = header_bytes(HeaderFormat::Tree, b"aaaaa");
        // root (1) + two leaves (10 each)
        assert_eq!(bits, 64 + 1 + 2 * 10);
        assert_eq!(bits, HeaderFormat::Tree.header_bits(&tree));
    }

    #[test]
    fn test_headers_rebuild_same_tree() {
        let data = b"she sells sea shells by the sea shore";
        for format in [HeaderFormat::Counts, HeaderFormat::Tree] {
            let (bytes, _, tree) = header_bytes(format, data);
            let mut reader = BitReader::new(Cursor::new(bytes));
            assert_eq!(HeaderFormat::read_prelude(&mut reader).unwrap(), format);
            let rebuilt = format.read_body(&mut reader).unwrap();

            assert_eq!(rebuilt.leaf_count(), tree.leaf_count());
            assert_eq!(
                crate::table::EncodingTable::from_tree(&rebuilt).unwrap(),
                crate::table::EncodingTable::from_tree(&tree).unwrap()
            );
        }
    }

    #[test]
    fn test_bad_magic() {
        let (mut bytes, _, _) = header_bytes(HeaderFormat::Tree, b"abc");
        bytes[0] ^= 0xFF;
        let mut reader = BitReader::new(Cursor::new(bytes));
        let err = HeaderFormat::read_prelude(&mut reader).unwrap_err();
        assert!(matches!(err, HuffError::InvalidMagic { .. }));
    }

    #[test]
    fn test_leaf_value_out_of_range() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(false).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bits(300, LEAF_VALUE_BITS).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bits(PSEUDO_EOF as u32, LEAF_VALUE_BITS).unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(bytes));
        let err = TreeHeader.read_body(&mut reader).unwrap_err();
        assert!(matches!(err, HuffError::InvalidTree { .. }));
    }

    #[test]
    fn test_too_deep_tree() {
        let bytes = vec![0u8; 64];
        let mut reader = BitReader::new(Cursor::new(bytes));
        let err = TreeHeader.read_body(&mut reader).unwrap_err();
        assert!(matches!(err, HuffError::InvalidTree { .. }));
    }

    #[test]
    fn test_leaf_root_rejected() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        writer.write_bits(PSEUDO_EOF as u32, LEAF_VALUE_BITS).unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(bytes));
        assert!(TreeHeader.read_body(&mut reader).unwrap_err().is_format_error());
    }

    #[test]
    fn test_count_overflow() {
        let mut counts = [0u64; ALPHABET_SIZE];
        counts[7] = u32::MAX as u64 + 1;
        let freq = FrequencyTable::from_counts(counts);
        let err = CountsHeader.validate(&freq).unwrap_err();
        assert!(matches!(err, HuffError::CountOverflow { symbol: 7, .. }));
        assert!(TreeHeader.validate(&freq).is_ok());
    }
}
