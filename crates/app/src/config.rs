//! Command-line configuration for the huffpack tool.
//!
//! Output paths default to the conventions of the original tool:
//! - `compress notes.txt`   writes `notes.bin`
//! - `decompress notes.bin` writes `notes_decompressed.txt`

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Lossless Huffman compressor
#[derive(Parser, Debug)]
#[command(name = "huffpack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show info-level logs (honours RUST_LOG when set)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print a compression summary
    #[arg(long, global = true)]
    pub stats: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file into a container
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output path (default: input with a .bin extension)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Restore a file from a container
    Decompress {
        /// Container to decompress
        input: PathBuf,

        /// Output path (default: <stem>_decompressed.txt)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Round-trip generated sample data in memory
    Demo {
        /// Random seed (default: time-based, printed for reproducibility)
        #[arg(long)]
        seed: Option<u64>,

        /// Sample size in bytes
        #[arg(long, default_value_t = 64 * 1024)]
        size: usize,
    },
}

/// Default output path for `compress`.
pub fn compressed_path(input: &Path) -> PathBuf {
    input.with_extension("bin")
}

/// Default output path for `decompress`.
pub fn decompressed_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_decompressed.txt", stem))
}

/// Seed for `demo` when none was given.
pub fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_path() {
        assert_eq!(compressed_path(Path::new("dir/sample.txt")), PathBuf::from("dir/sample.bin"));
        assert_eq!(compressed_path(Path::new("sample")), PathBuf::from("sample.bin"));
    }

    #[test]
    fn test_decompressed_path() {
        assert_eq!(
            decompressed_path(Path::new("dir/sample.bin")),
            PathBuf::from("dir/sample_decompressed.txt")
        );
    }

    #[test]
    fn test_parse_compress() {
        let cli = Cli::try_parse_from(["huffpack", "compress", "in.txt", "--out", "x.bin", "--stats"]).unwrap();

        assert!(cli.stats);
        match cli.command {
            Command::Compress { input, out } => {
                assert_eq!(input, PathBuf::from("in.txt"));
                assert_eq!(out, Some(PathBuf::from("x.bin")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_demo_defaults() {
        let cli = Cli::try_parse_from(["huffpack", "demo"]).unwrap();

        match cli.command {
            Command::Demo { seed, size } => {
                assert_eq!(seed, None);
                assert_eq!(size, 65536);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["huffpack", "-v", "-q", "demo"]).is_err());
    }
}
