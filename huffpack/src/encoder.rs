//! Huffman encoder (compression).

use crate::config::HuffConfig;
use crate::format::{BITS_PER_WORD, HeaderFormat, PSEUDO_EOF};
use crate::frequency::FrequencyTable;
use crate::table::EncodingTable;
use crate::tree::HuffmanTree;
use huffpack_core::bitstream::{BitReader, BitWriter};
use huffpack_core::error::{HuffError, Result};
use huffpack_core::traits::{NullObserver, StatusObserver};
use std::io::{self, Read, Seek, Write};

/// Size estimate computed before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionPlan {
    /// Header format the estimate is for.
    pub format: HeaderFormat,
    /// Number of input symbols.
    pub symbol_count: u64,
    /// Input size in bits.
    pub original_bits: u64,
    /// Header size in bits, prelude included.
    pub header_bits: u64,
    /// Exact output size in bits: header, codes and terminator, no padding.
    pub encoded_bits: u64,
}

impl CompressionPlan {
    /// `original_bits - encoded_bits`; positive when compression helps.
    pub fn savings_bits(&self) -> i64 {
        self.original_bits as i64 - self.encoded_bits as i64
    }

    /// True if the output would be strictly smaller than the input.
    pub fn is_beneficial(&self) -> bool {
        self.savings_bits() > 0
    }

    /// Output size in bytes after padding.
    pub fn compressed_len(&self) -> u64 {
        self.encoded_bits.div_ceil(8)
    }
}

/// What a finished compression wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressSummary {
    /// The estimate the run was based on.
    pub plan: CompressionPlan,
    /// Bits written, padding excluded.
    pub bits_written: u64,
    /// Bytes written, padding included.
    pub bytes_written: u64,
}

/// Everything derived from the frequency pass.
#[derive(Debug)]
struct Prepared {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    table: EncodingTable,
    plan: CompressionPlan,
}

/// Huffman encoder for compression.
///
/// Compression reads the source twice: once to count symbols and once to
/// encode them, so the source must be seekable.
pub struct HuffEncoder {
    config: HuffConfig,
    observer: Box<dyn StatusObserver>,
    prepared: Option<Prepared>,
}

impl HuffEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: HuffConfig) -> Self {
        Self {
            config,
            observer: Box::new(NullObserver),
            prepared: None,
        }
    }

    /// Attach a status observer.
    pub fn with_observer(mut self, observer: impl StatusObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// The encoder's configuration.
    pub fn config(&self) -> HuffConfig {
        self.config
    }

    /// Count symbols, build the tree and code table, and estimate the
    /// output size.
    ///
    /// The source is rewound first. The result is kept for the next call
    /// to [`compress`](Self::compress).
    pub fn preprocess<R: Read + Seek>(&mut self, source: &mut R) -> Result<CompressionPlan> {
        source.rewind()?;
        self.observer.update("counting symbol frequencies");
        let frequencies = FrequencyTable::from_reader(&mut *source)?;

        self.observer.update("building Huffman tree");
        let tree = HuffmanTree::build(&frequencies);
        let table = EncodingTable::from_tree(&tree)?;

        let plan = Self::plan(self.config.format, &frequencies, &tree, &table)?;
        tracing::debug!(
            format = %plan.format,
            symbols = plan.symbol_count,
            distinct = frequencies.distinct(),
            savings_bits = plan.savings_bits(),
            "preprocessed input"
        );
        self.observer.update(&format!(
            "estimated savings: {} bits",
            plan.savings_bits()
        ));

        self.prepared = Some(Prepared {
            frequencies,
            tree,
            table,
            plan,
        });
        Ok(plan)
    }

    fn plan(
        format: HeaderFormat,
        frequencies: &FrequencyTable,
        tree: &HuffmanTree,
        table: &EncodingTable,
    ) -> Result<CompressionPlan> {
        format.validate(frequencies)?;

        let header_bits = format.header_bits(tree);
        let mut body_bits = 0u64;
        for (symbol, count) in frequencies.iter_nonzero() {
            let code = table.get(symbol as u16).ok_or_else(|| {
                HuffError::invalid_tree(format!("no code for symbol {symbol}"))
            })?;
            body_bits += code.len() as u64 * count;
        }
        let eof = table
            .eof_code()
            .ok_or_else(|| HuffError::invalid_tree("no code for end of data"))?;

        let symbol_count = frequencies.total();
        Ok(CompressionPlan {
            format,
            symbol_count,
            original_bits: symbol_count * BITS_PER_WORD as u64,
            header_bits,
            encoded_bits: header_bits + body_bits + eof.len() as u64,
        })
    }

    /// Compress `source` into `sink`.
    ///
    /// Runs [`preprocess`](Self::preprocess) first unless it was already
    /// called. Fails with [`HuffError::NoSavings`](huffpack_core::HuffError::NoSavings) before writing anything
    /// if the output would not be smaller and `force` is not set.
    ///
    /// Fails with [`HuffError::SourceChanged`](huffpack_core::HuffError::SourceChanged) if the encoding pass
    /// reads a different number of symbols than were counted. Part of the
    /// stream may already have reached the sink.
    pub fn compress<R: Read + Seek, W: Write>(
        &mut self,
        source: &mut R,
        sink: W,
    ) -> Result<CompressSummary> {
        if self.prepared.is_none() {
            self.preprocess(source)?;
        }
        let Prepared {
            frequencies,
            tree,
            table,
            plan,
        } = self
            .prepared
            .take()
            .expect("BUG: preprocess always leaves a prepared state");

        if !self.config.force && !plan.is_beneficial() {
            self.observer.update("compression does not save any space");
            return Err(HuffError::no_savings(plan.savings_bits()));
        }

        source.rewind()?;
        let mut writer = BitWriter::new(sink);

        self.observer.update("writing header");
        plan.format.write_header(&mut writer, &frequencies, &tree)?;

        self.observer.update("encoding data");
        let mut reader = BitReader::new(&mut *source);
        let mut encoded = 0u64;
        while let Some(symbol) = reader.try_read_bits(BITS_PER_WORD)? {
            encoded += 1;
            let code = table.get(symbol as u16).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("symbol {symbol} was not seen in the frequency pass"),
                )
            })?;
            code.write_to(&mut writer)?;
        }
        if encoded != plan.symbol_count {
            self.observer.update("source changed during compression");
            return Err(HuffError::source_changed(plan.symbol_count, encoded));
        }

        // Codes always exist for PSEUDO_EOF; checked in `plan`.
        if let Some(eof) = table.get(PSEUDO_EOF) {
            eof.write_to(&mut writer)?;
        }

        let bits_written = writer.bits_written();
        writer.finish()?;

        tracing::debug!(
            format = %plan.format,
            bits_written,
            original_bits = plan.original_bits,
            "compressed stream"
        );
        self.observer.update("compression complete");

        Ok(CompressSummary {
            plan,
            bits_written,
            bytes_written: bits_written.div_ceil(8),
        })
    }
}

impl std::fmt::Debug for HuffEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuffEncoder")
            .field("config", &self.config)
            .field("prepared", &self.prepared.as_ref().map(|p| p.plan))
            .finish_non_exhaustive()
    }
}
