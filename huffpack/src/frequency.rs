//! Symbol frequency counting.

use crate::format::{ALPHABET_SIZE, BITS_PER_WORD};
use huffpack_core::bitstream::BitReader;
use huffpack_core::error::Result;
use std::io::Read;

/// Occurrence count of every byte value in an input.
///
/// `PSEUDO_EOF` has no slot here; tree construction always gives it
/// weight 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create an all-zero table.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Create a table from explicit counts (e.g. a decoded header).
    pub fn from_counts(counts: [u64; ALPHABET_SIZE]) -> Self {
        Self { counts }
    }

    /// Count the symbols of an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.record(byte);
        }
        table
    }

    /// Count `BITS_PER_WORD`-bit symbols read from `reader` until it runs
    /// out of bits.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut bits = BitReader::new(reader);
        let mut table = Self::new();
        while let Some(symbol) = bits.try_read_bits(BITS_PER_WORD)? {
            table.record(symbol as u8);
        }
        Ok(table)
    }

    /// Add one occurrence of `symbol`.
    #[inline]
    pub fn record(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    /// Count for `symbol`.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// All counts, indexed by symbol.
    pub fn counts(&self) -> &[u64; ALPHABET_SIZE] {
        &self.counts
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(symbol, count)` pairs with non-zero count, in symbol order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
