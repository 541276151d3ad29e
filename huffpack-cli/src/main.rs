//! huffpack CLI - static Huffman compression from the command line
//!
//! Compresses single files with a Huffman code built from the file's own
//! byte frequencies, and restores them.

mod commands;
mod error;
mod utils;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use commands::{cmd_compress, cmd_decompress, cmd_info, cmd_test};
use huffpack::HeaderFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "huffpack")]
#[command(
    author,
    version,
    about = "Static Huffman compressor - Pure Rust"
)]
#[command(long_about = "
huffpack compresses a file with a Huffman code built from its own byte
frequencies. The code is stored in the output either as the 256 symbol
counts or as the shape of the tree.

Compression that would not make the file smaller is refused unless
--force is given.

Examples:
  huffpack compress notes.txt
  huffpack compress notes.txt --format counts -o notes.huff
  huffpack decompress notes.txt.hf
  huffpack info notes.txt.hf --json
  huffpack test notes.txt
")]
struct Cli {
    /// Log debug events to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: <input>.hf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header format
        #[arg(short, long, value_enum, default_value = "tree")]
        format: FormatArg,

        /// Write the output even if it is not smaller than the input
        #[arg(long)]
        force: bool,
    },

    /// Decompress a .hf file
    #[command(alias = "x")]
    Decompress {
        /// Compressed file
        input: PathBuf,

        /// Output file (default: input without .hf, or <input>.unhf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show header information of a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Compress and decompress a file in memory and verify the result
    #[command(alias = "t")]
    Test {
        /// File to test
        file: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Header format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum FormatArg {
    /// Store all 256 symbol counts
    Counts,
    /// Store the tree shape (default)
    #[default]
    Tree,
}

impl From<FormatArg> for HeaderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Counts => HeaderFormat::Counts,
            FormatArg::Tree => HeaderFormat::Tree,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            format,
            force,
        } => cmd_compress(&input, output.as_deref(), format.into(), force),
        Commands::Decompress { input, output } => cmd_decompress(&input, output.as_deref()),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Test { file } => cmd_test(&file),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compress_defaults() {
        let cli = Cli::parse_from(["huffpack", "compress", "a.txt"]);
        match cli.command {
            Commands::Compress {
                input,
                output,
                format,
                force,
            } => {
                assert_eq!(input, PathBuf::from("a.txt"));
                assert!(output.is_none());
                assert_eq!(HeaderFormat::from(format), HeaderFormat::Tree);
                assert!(!force);
            }
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_counts_format_flag() {
        let cli = Cli::parse_from(["huffpack", "-v", "c", "a.txt", "-f", "counts", "--force"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Compress { format, force, .. } => {
                assert_eq!(HeaderFormat::from(format), HeaderFormat::Counts);
                assert!(force);
            }
            _ => panic!("expected compress"),
        }
    }
}
