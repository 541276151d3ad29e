//! Info command implementation.

use crate::error::Result;
use huffpack::{EncodingTable, HuffDecoder, MAGIC_NUMBER, StreamInfo};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON serializable header information.
#[derive(Debug, Serialize)]
struct StreamInfoJson {
    file: String,
    size: u64,
    magic: String,
    format: String,
    discriminator: String,
    header_bits: u64,
    leaves: usize,
    internal_nodes: usize,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    codes: Option<Vec<CodeJson>>,
}

/// One symbol's code.
#[derive(Debug, Serialize)]
struct CodeJson {
    symbol: u16,
    code: String,
}

impl StreamInfoJson {
    fn new(file: &Path, size: u64, info: &StreamInfo) -> Self {
        // Trees read from a file may be deeper than a code can hold.
        let codes = EncodingTable::from_tree(&info.tree).ok().map(|table| {
            table
                .iter()
                .map(|(symbol, code)| CodeJson {
                    symbol,
                    code: code.to_string(),
                })
                .collect()
        });

        Self {
            file: file.display().to_string(),
            size,
            magic: format!("{:#010x}", MAGIC_NUMBER),
            format: info.format.name().to_string(),
            discriminator: format!("{:#010x}", info.format.discriminator()),
            header_bits: info.header_bits,
            leaves: info.tree.leaf_count(),
            internal_nodes: info.tree.internal_count(),
            depth: info.tree.depth(),
            original_size: info.original_len,
            codes,
        }
    }
}

pub fn cmd_info(file: &Path, json: bool) -> Result<()> {
    let size = std::fs::metadata(file)?.len();
    let reader = BufReader::new(File::open(file)?);
    let info = HuffDecoder::new().inspect(reader)?;
    let report = StreamInfoJson::new(file, size, &info);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", report.file);
    println!("Size: {} bytes", report.size);
    println!("Magic: {}", report.magic);
    println!("Format: {} ({})", report.format, report.discriminator);
    println!("Header: {} bits", report.header_bits);
    println!();
    println!("Tree:");
    println!("  Leaves: {}", report.leaves);
    println!("  Internal nodes: {}", report.internal_nodes);
    println!("  Depth: {}", report.depth);
    if let Some(original) = report.original_size {
        println!("  Original size: {} bytes", original);
    }
    Ok(())
}
