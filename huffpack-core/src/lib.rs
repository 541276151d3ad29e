//! # huffpack Core
//!
//! Core components for the huffpack Huffman codec.
//!
//! This crate provides the building blocks the codec is layered on:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for 1-32 bit fields
//! - [`traits`]: the [`StatusObserver`] progress callback
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     compress / decompress / info / test                │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec (huffpack)                                    │
//! │     frequency table, tree, header formats, encoder     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, errors, status observer       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use huffpack_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0xABC, 12).unwrap();
//! let data = writer.finish().unwrap();
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{HuffError, Result};
pub use traits::{NullObserver, StatusObserver};
