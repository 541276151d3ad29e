//! Bit-level I/O for the Huffman codec.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! fields of 1 to 32 bits over any byte stream.
//!
//! # Bit Ordering
//!
//! huffpack packs bits MSB-first: the first bit written lands in the most
//! significant bit of the first byte, and multi-bit fields are stored with
//! their most significant bit first. A final partial byte is padded with
//! zero bits.
//!
//! # Example
//!
//! ```
//! use huffpack_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! let mut writer = BitWriter::new(&mut output);
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! writer.finish().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{HuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// Largest field width accepted by `read_bits`/`write_bits`.
pub const MAX_FIELD_BITS: u8 = 32;

#[inline]
fn low_mask(count: u8) -> u64 {
    if count >= 64 {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}

fn check_width(count: u8) -> Result<()> {
    if count == 0 || count > MAX_FIELD_BITS {
        return Err(HuffError::InvalidBitWidth(count));
    }
    Ok(())
}

/// MSB-first bit reader wrapping any `Read` implementation.
///
/// Wrap file handles in a `BufReader`; the reader pulls one byte at a time.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer, valid bits right-aligned.
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Pull one byte from the reader. `Ok(false)` at end of stream.
    fn pull_byte(&mut self) -> Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.buffer = (self.buffer << 8) | byte[0] as u64;
                    self.bits_in_buffer += 8;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read `count` bits (1-32), or `None` if fewer than `count` bits remain.
    ///
    /// This is the "no more bits" signal used when scanning input symbols.
    /// Reaching the end leaves the reader exhausted; the trailing partial
    /// field is dropped.
    pub fn try_read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        check_width(count)?;

        while self.bits_in_buffer < count {
            if !self.pull_byte()? {
                return Ok(None);
            }
        }

        let shift = self.bits_in_buffer - count;
        let value = (self.buffer >> shift) & low_mask(count);

        self.bits_in_buffer -= count;
        self.buffer &= low_mask(self.bits_in_buffer);
        self.total_bits_read += count as u64;

        Ok(Some(value as u32))
    }

    /// Read `count` bits (1-32), failing with `Truncated` at end of stream.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        let position = self.total_bits_read;
        self.try_read_bits(count)?
            .ok_or_else(|| HuffError::truncated(position))
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}

/// MSB-first bit writer wrapping any `Write` implementation.
///
/// Call `finish()` when done to pad and write the last partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer, pending bits right-aligned.
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written, padding excluded.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Total number of bits written so far, not counting final padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.writer.write_all(&[byte])?;
            self.bits_in_buffer -= 8;
        }
        self.buffer &= low_mask(self.bits_in_buffer);
        Ok(())
    }

    /// Write the low `count` bits (1-32) of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        check_width(count)?;

        let value = value as u64 & low_mask(count);
        self.buffer = (self.buffer << count) | value;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buffer = (self.buffer << 1) | bit as u64;
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer >= 8 {
            self.flush_bytes()?;
        }
        Ok(())
    }

    /// Pad the last partial byte with zeros, flush, and return the writer.
    pub fn finish(mut self) -> Result<W> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
            self.flush_bytes()?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}
