//! huffpack: command-line front end for huffpack-core.
//!
//! Reads the whole input, runs the codec, and only writes the output file
//! once the pipeline has succeeded.

mod config;
mod input_gen;

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::{Cli, Command};
use huffpack_core::Codec;
use std::path::Path;
use tracing::info;

fn init_tracing(cli: &Cli) {
    // --quiet → off, --verbose → RUST_LOG or info, default → warn
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compress { ref input, ref out } => {
            let out = out.clone().unwrap_or_else(|| config::compressed_path(input));
            compress_file(input, &out, cli.stats)
        }
        Command::Decompress { ref input, ref out } => {
            let out = out.clone().unwrap_or_else(|| config::decompressed_path(input));
            decompress_file(input, &out)
        }
        Command::Demo { seed, size } => demo(seed, size, cli.stats),
    }
}

fn compress_file(input: &Path, out: &Path, print_stats: bool) -> Result<()> {
    let data = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let (container, stats) = Codec::compress_with_stats(&data)
        .with_context(|| format!("compressing {}", input.display()))?;

    std::fs::write(out, &container).with_context(|| format!("writing {}", out.display()))?;
    info!(input = %input.display(), output = %out.display(), bytes = container.len(), "compressed");

    println!("Compressed {} -> {}", input.display(), out.display());
    if print_stats {
        stats.print_summary();
    }
    Ok(())
}

fn decompress_file(input: &Path, out: &Path) -> Result<()> {
    let container = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let data = Codec::decompress(&container)
        .with_context(|| format!("decompressing {}", input.display()))?;

    std::fs::write(out, &data).with_context(|| format!("writing {}", out.display()))?;
    info!(input = %input.display(), output = %out.display(), bytes = data.len(), "decompressed");

    println!("Decompressed {} -> {}", input.display(), out.display());
    Ok(())
}

fn demo(seed: Option<u64>, size: usize, print_stats: bool) -> Result<()> {
    if size == 0 {
        bail!("--size must be at least 1");
    }

    let seed = seed.unwrap_or_else(config::time_seed);
    println!("Seed: {} (rerun with --seed {} to reproduce)", seed, seed);

    let data = input_gen::generate_sample_data(seed, size);
    let (container, stats) = Codec::compress_with_stats(&data)?;
    let restored = Codec::decompress(&container)?;

    if restored != data {
        bail!("round trip mismatch: {} bytes in, {} bytes out", data.len(), restored.len());
    }

    println!("Round trip OK: {} bytes -> {} bytes", data.len(), container.len());
    if print_stats {
        stats.print_summary();
    }
    Ok(())
}
