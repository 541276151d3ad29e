//! Decompress command implementation.

use crate::error::Result;
use crate::utils::{create_spinner, decompressed_name, ensure_distinct, spinner_observer};
use huffpack::HuffDecoder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub fn cmd_decompress(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output.map_or_else(|| decompressed_name(input), Path::to_path_buf);
    ensure_distinct(input, &output)?;
    let reader = BufReader::new(File::open(input)?);
    let writer = File::create(&output)?;

    let pb = create_spinner();
    let mut decoder = HuffDecoder::new().with_observer(spinner_observer(&pb));
    let result = decoder.decompress(reader, writer);
    pb.finish_and_clear();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            // A partial output is not a usable file.
            let _ = fs::remove_file(&output);
            return Err(e.into());
        }
    };

    println!(
        "{} -> {} ({} header)",
        input.display(),
        output.display(),
        summary.format
    );
    println!(
        "  {} bits read, {} bytes written",
        summary.bits_read, summary.bytes_written
    );
    Ok(())
}
