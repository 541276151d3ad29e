//! Symbol to code mapping derived from a Huffman tree.

use crate::format::{ALPHABET_SIZE, PSEUDO_EOF};
use crate::tree::{HuffmanTree, Node};
use huffpack_core::bitstream::BitWriter;
use huffpack_core::error::{HuffError, Result};
use std::fmt;
use std::io::Write;

/// Longest code an `EncodingTable` can hold.
pub const MAX_CODE_LENGTH: u8 = 128;

/// A prefix code: `len` bits stored right-aligned in `bits`, first bit most
/// significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// Extend the code by one bit (`false` = left edge, `true` = right).
    fn push(self, bit: bool) -> Self {
        Self {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        }
    }

    /// Number of bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// True for the empty code, which a valid table never contains.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The code bits, right-aligned.
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && other
                .bits
                .checked_shr((other.len - self.len) as u32)
                .unwrap_or(0)
                == self.bits
    }

    /// Write the code MSB-first.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        let mut remaining = self.len;
        while remaining > 0 {
            let chunk = remaining.min(32);
            remaining -= chunk;
            let value = (self.bits >> remaining) as u32;
            writer.write_bits(value, chunk)?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            let bit = (self.bits >> i) & 1;
            f.write_str(if bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codes for every leaf of a tree, indexed by symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingTable {
    codes: [Option<Code>; ALPHABET_SIZE + 1],
}

impl EncodingTable {
    /// Walk the tree from the root's children; left edges append `0`,
    /// right edges append `1`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let (left, right) = match tree.root() {
            Node::Internal { left, right, .. } => (left, right),
            Node::Leaf { .. } => return Err(HuffError::invalid_tree("root is a leaf")),
        };

        let mut codes = [None; ALPHABET_SIZE + 1];
        let root_code = Code { bits: 0, len: 0 };
        let mut stack: Vec<(&Node, Code)> =
            vec![(right, root_code.push(true)), (left, root_code.push(false))];

        while let Some((node, code)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    let slot = codes.get_mut(*symbol as usize).ok_or_else(|| {
                        HuffError::invalid_tree(format!("leaf value {symbol} out of range"))
                    })?;
                    *slot = Some(code);
                }
                Node::Internal { left, right, .. } => {
                    if code.len >= MAX_CODE_LENGTH {
                        return Err(HuffError::invalid_tree(format!(
                            "code longer than {MAX_CODE_LENGTH} bits"
                        )));
                    }
                    stack.push((right, code.push(true)));
                    stack.push((left, code.push(false)));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Code for `symbol` (`0..=255` or `PSEUDO_EOF`).
    pub fn get(&self, symbol: u16) -> Option<Code> {
        self.codes.get(symbol as usize).copied().flatten()
    }

    /// Code of the end-of-data marker.
    pub fn eof_code(&self) -> Option<Code> {
        self.get(PSEUDO_EOF)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u16, c)))
    }
}
