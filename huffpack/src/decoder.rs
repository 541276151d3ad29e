//! Huffman decoder (decompression).
//!
//! Decoding walks the tree one bit at a time: `0` goes left, `1` goes
//! right. Reaching a leaf emits its byte and restarts at the root, until the
//! `PSEUDO_EOF` leaf ends the stream. Trailing padding bits are ignored.

use crate::format::{HeaderFormat, PSEUDO_EOF};
use crate::tree::{HuffmanTree, Node};
use huffpack_core::bitstream::BitReader;
use huffpack_core::error::Result;
use huffpack_core::traits::{NullObserver, StatusObserver};
use std::io::{BufWriter, Read, Write};

/// What a finished decompression read and wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressSummary {
    /// Header format of the stream.
    pub format: HeaderFormat,
    /// Bits consumed, header included, padding excluded.
    pub bits_read: u64,
    /// Decoded bytes written to the sink.
    pub bytes_written: u64,
}

/// Header facts about a compressed stream, without decoding the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    /// Header format.
    pub format: HeaderFormat,
    /// Header size in bits, prelude included.
    pub header_bits: u64,
    /// The rebuilt tree.
    pub tree: HuffmanTree,
    /// Original length in bytes, known only for the counts format.
    pub original_len: Option<u64>,
}

/// Huffman decoder for decompression.
pub struct HuffDecoder {
    observer: Box<dyn StatusObserver>,
}

impl HuffDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self {
            observer: Box::new(NullObserver),
        }
    }

    /// Attach a status observer.
    pub fn with_observer(mut self, observer: impl StatusObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    fn read_header<R: Read>(reader: &mut BitReader<R>) -> Result<(HeaderFormat, HuffmanTree)> {
        let format = HeaderFormat::read_prelude(reader)?;
        let tree = format.read_body(reader)?;
        Ok((format, tree))
    }

    /// Read only the header of a compressed stream.
    pub fn inspect<R: Read>(&mut self, source: R) -> Result<StreamInfo> {
        let mut reader = BitReader::new(source);
        let (format, tree) = Self::read_header(&mut reader)?;

        let original_len = match format {
            // Tree weight counts PSEUDO_EOF once.
            HeaderFormat::Counts => Some(tree.weight() - 1),
            HeaderFormat::Tree => None,
        };

        Ok(StreamInfo {
            format,
            header_bits: reader.bits_read(),
            tree,
            original_len,
        })
    }

    /// Decompress `source` into `sink`.
    ///
    /// Fails with a format error for a bad magic number, an unknown header
    /// format or a malformed tree, and with [`HuffError::Truncated`](huffpack_core::HuffError::Truncated) if the
    /// input ends before the end-of-data code. Bytes decoded before a
    /// failure may already have reached the sink.
    pub fn decompress<R: Read, W: Write>(
        &mut self,
        source: R,
        sink: W,
    ) -> Result<DecompressSummary> {
        let mut reader = BitReader::new(source);

        self.observer.update("reading header");
        let (format, tree) = Self::read_header(&mut reader)?;
        tracing::debug!(
            %format,
            header_bits = reader.bits_read(),
            leaves = tree.leaf_count(),
            "read header"
        );

        self.observer.update("decoding data");
        let mut out = BufWriter::new(sink);
        let mut bytes_written = 0u64;

        let root = tree.root();
        let mut node = root;
        loop {
            match node {
                Node::Leaf { symbol, .. } => {
                    if *symbol == PSEUDO_EOF {
                        break;
                    }
                    out.write_all(&[*symbol as u8])?;
                    bytes_written += 1;
                    node = root;
                }
                Node::Internal { left, right, .. } => {
                    node = if reader.read_bit()? { right } else { left };
                }
            }
        }
        out.flush()?;

        let bits_read = reader.bits_read();
        tracing::debug!(%format, bits_read, bytes_written, "decompressed stream");
        self.observer.update("decompression complete");

        Ok(DecompressSummary {
            format,
            bits_read,
            bytes_written,
        })
    }
}

impl Default for HuffDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HuffDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuffDecoder").finish_non_exhaustive()
    }
}
