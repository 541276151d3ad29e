//! Compress command implementation.

use crate::error::Result;
use crate::utils::{
    compressed_name, create_spinner, ensure_distinct, savings_percent, spinner_observer,
};
use huffpack::{HeaderFormat, HuffConfig, HuffEncoder, HuffError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    format: HeaderFormat,
    force: bool,
) -> Result<()> {
    let output = output.map_or_else(|| compressed_name(input), Path::to_path_buf);
    ensure_distinct(input, &output)?;
    let mut reader = BufReader::new(File::open(input)?);

    let pb = create_spinner();
    let config = HuffConfig::new(format).with_force(force);
    let mut encoder = HuffEncoder::new(config).with_observer(spinner_observer(&pb));

    // Decide before touching the output path, so a refusal leaves no file.
    let plan = encoder.preprocess(&mut reader)?;
    if !force && !plan.is_beneficial() {
        pb.finish_and_clear();
        return Err(HuffError::no_savings(plan.savings_bits()).into());
    }

    let writer = BufWriter::new(File::create(&output)?);
    let summary = match encoder.compress(&mut reader, writer) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            let _ = fs::remove_file(&output);
            return Err(e.into());
        }
    };
    pb.finish_and_clear();

    let original = summary.plan.symbol_count;
    println!(
        "{} -> {} ({} header)",
        input.display(),
        output.display(),
        format
    );
    println!(
        "  {} bytes -> {} bytes ({:.1}% saved)",
        original,
        summary.bytes_written,
        savings_percent(original, summary.bytes_written)
    );
    Ok(())
}
