//! Error type for CLI commands.

use huffpack::HuffError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Codec error.
    #[error(transparent)]
    Huff(#[from] HuffError),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output path names the input file.
    #[error("Output {} is the input file", path.display())]
    SameFile {
        /// The offending path.
        path: PathBuf,
    },

    /// Round trip did not reproduce the input.
    #[error("Round trip failed for {failed} format(s)")]
    RoundTripMismatch {
        /// Number of formats that failed.
        failed: usize,
    },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RoundTripMismatch { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::RoundTripMismatch { failed: 1 }.exit_code(), 2);
        let same = CliError::SameFile {
            path: PathBuf::from("a.txt"),
        };
        assert_eq!(same.exit_code(), 1);
        assert!(same.to_string().contains("a.txt"));
        assert_eq!(CliError::from(HuffError::no_savings(0)).exit_code(), 1);
    }
}
