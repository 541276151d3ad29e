//! Utility functions for the CLI.

use crate::error::{CliError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extension given to compressed files.
pub const COMPRESSED_EXTENSION: &str = "hf";

/// Extension given to decompressed files whose name has no `.hf` to strip.
pub const RESTORED_EXTENSION: &str = "unhf";

/// Create a spinner that shows encoder and decoder status messages.
pub fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .expect("spinner template is valid"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Status observer that forwards messages to `pb`.
pub fn spinner_observer(pb: &ProgressBar) -> impl FnMut(&str) + 'static {
    let pb = pb.clone();
    move |status: &str| pb.set_message(status.to_string())
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// `notes.txt` becomes `notes.txt.hf`.
pub fn compressed_name(input: &Path) -> PathBuf {
    append_extension(input, COMPRESSED_EXTENSION)
}

/// `notes.txt.hf` becomes `notes.txt`; any other name gets `.unhf` appended.
pub fn decompressed_name(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == COMPRESSED_EXTENSION && input.file_stem().is_some() => {
            input.with_extension("")
        }
        _ => append_extension(input, RESTORED_EXTENSION),
    }
}

/// Refuse an output path that resolves to the input file.
///
/// An output that does not exist yet cannot be the input.
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    let input = fs::canonicalize(input)?;
    match fs::canonicalize(output) {
        Ok(output) if output == input => Err(CliError::SameFile { path: output }),
        _ => Ok(()),
    }
}

/// Path in the system temp directory, unique per test name and process.
#[cfg(test)]
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("huffpack_cli_test_{}_{}", std::process::id(), name))
}

/// Space saved as a percentage of `original`.
pub fn savings_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_name() {
        assert_eq!(compressed_name(Path::new("notes.txt")), PathBuf::from("notes.txt.hf"));
        assert_eq!(compressed_name(Path::new("dir/data")), PathBuf::from("dir/data.hf"));
    }

    #[test]
    fn test_decompressed_name() {
        assert_eq!(decompressed_name(Path::new("notes.txt.hf")), PathBuf::from("notes.txt"));
        assert_eq!(decompressed_name(Path::new("data.hf")), PathBuf::from("data"));
        assert_eq!(decompressed_name(Path::new("data.bin")), PathBuf::from("data.bin.unhf"));
        assert_eq!(decompressed_name(Path::new("data")), PathBuf::from("data.unhf"));
    }

    #[test]
    fn test_ensure_distinct() {
        let input = temp_path("distinct.txt");
        fs::write(&input, b"data").unwrap();

        let err = ensure_distinct(&input, &input).unwrap_err();
        assert!(matches!(err, CliError::SameFile { .. }));

        // Same file reached through a different spelling.
        let dir = input.parent().unwrap();
        let dotted = dir.join(".").join(input.file_name().unwrap());
        assert!(ensure_distinct(&input, &dotted).is_err());

        assert!(ensure_distinct(&input, &temp_path("distinct.txt.hf")).is_ok());
        let _ = fs::remove_file(&input);
    }

    #[test]
    fn test_savings_percent() {
        assert_eq!(savings_percent(0, 10), 0.0);
        assert_eq!(savings_percent(200, 50), 75.0);
        assert!(savings_percent(10, 20) < 0.0);
    }

    #[test]
    fn test_spinner_observer_sets_message() {
        let pb = ProgressBar::hidden();
        let mut observer = spinner_observer(&pb);
        observer("building Huffman tree");
        assert_eq!(pb.message(), "building Huffman tree");
    }
}
