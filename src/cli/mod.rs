//! # CLI Module
//!
//! Command-line interface for image fingerprinting.
//!
//! ## Usage
//! ```bash
//! # Fingerprint some images
//! image-fingerprint hash photo.jpg scan.png
//!
//! # Every image under a directory, as JSON
//! image-fingerprint hash ~/Photos --recursive --output json
//!
//! # Expand hex to bits
//! image-fingerprint decode a14aa1dbdb818f97
//!
//! # Show both segments of a fingerprint as bits
//! image-fingerprint inspect "ffffffffffffffff|a14aa1dbdb818f970|480|640"
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use image_fingerprint::core::fingerprint::{Fingerprint, Fingerprinter};
use image_fingerprint::core::hasher::hex_to_binary;
use image_fingerprint::core::hasher::mmap_decode::{looks_like_image, read_file_bytes};
use image_fingerprint::core::NibblePacking;
use image_fingerprint::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Image Fingerprint - perceptual signatures for images
#[derive(Parser, Debug)]
#[command(name = "image-fingerprint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fingerprint image files
    Hash {
        /// Files or directories to fingerprint
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Pack all four bits of each nibble (not comparable with legacy fingerprints)
        #[arg(long)]
        exact_packing: bool,
    },
    /// Expand hex strings to binary
    Decode {
        /// Hex strings to decode
        #[arg(required = true)]
        hex: Vec<String>,
    },
    /// Show the fields of a fingerprint with both segments in binary
    Inspect {
        /// Fingerprint string, e.g. "ffff...|a14a...|480|640"
        fingerprint: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// One "<fingerprint>\t<path>" line per file
    Minimal,
}

/// What happened to one input file
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome {
    Fingerprinted { fingerprint: Fingerprint },
    /// Not decodable, or outside the size window
    NoFingerprint,
    /// Found while walking a directory and skipped by its header
    NotAnImage,
    Failed { message: String },
}

#[derive(Debug, Serialize)]
struct FileResult {
    path: PathBuf,
    #[serde(flatten)]
    outcome: Outcome,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash {
            paths,
            recursive,
            output,
            exact_packing,
        } => run_hash(paths, recursive, output, exact_packing),
        Commands::Decode { hex } => run_decode(&hex),
        Commands::Inspect { fingerprint } => run_inspect(&fingerprint),
    }
}

/// A file to fingerprint, and whether it was named explicitly
struct Input {
    path: PathBuf,
    explicit: bool,
}

fn collect_inputs(paths: &[PathBuf], recursive: bool) -> Vec<Input> {
    let mut inputs = Vec::new();

    for path in paths {
        if !path.is_dir() {
            inputs.push(Input {
                path: path.clone(),
                explicit: true,
            });
            continue;
        }

        let walker = WalkDir::new(path)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .sort_by_file_name();

        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() {
                inputs.push(Input {
                    path: entry.into_path(),
                    explicit: false,
                });
            }
        }
    }

    inputs
}

fn fingerprint_file(fingerprinter: &Fingerprinter, input: &Input) -> Outcome {
    let bytes = match read_file_bytes(&input.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return Outcome::Failed {
                message: e.to_string(),
            }
        }
    };

    if !input.explicit && !looks_like_image(&bytes) {
        debug!(path = %input.path.display(), "skipping non-image file");
        return Outcome::NotAnImage;
    }

    match fingerprinter.compute(&bytes) {
        Ok(Some(fingerprint)) => Outcome::Fingerprinted { fingerprint },
        Ok(None) => Outcome::NoFingerprint,
        Err(e) => Outcome::Failed {
            message: e.to_string(),
        },
    }
}

fn run_hash(
    paths: Vec<PathBuf>,
    recursive: bool,
    output: OutputFormat,
    exact_packing: bool,
) -> Result<()> {
    let packing = if exact_packing {
        NibblePacking::Exact
    } else {
        NibblePacking::Legacy
    };
    let fingerprinter = Fingerprinter::builder().packing(packing).build()?;

    let inputs = collect_inputs(&paths, recursive);
    debug!(files = inputs.len(), %packing, "fingerprinting");

    let progress = if matches!(output, OutputFormat::Pretty) && inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let results: Vec<FileResult> = inputs
        .par_iter()
        .map(|input| {
            let outcome = fingerprint_file(&fingerprinter, input);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            FileResult {
                path: input.path.clone(),
                outcome,
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match output {
        OutputFormat::Pretty => print_pretty_results(&Term::stdout(), &results),
        OutputFormat::Json => print_json_results(&results),
        OutputFormat::Minimal => print_minimal_results(&results),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, results: &[FileResult]) {
    let mut fingerprinted = 0;
    let mut without = 0;
    let mut failed = 0;

    for result in results {
        match &result.outcome {
            Outcome::Fingerprinted { fingerprint } => {
                fingerprinted += 1;
                term.write_line(&format!(
                    "{} {}",
                    style("✓").green().bold(),
                    display_path(&result.path)
                ))
                .ok();
                term.write_line(&format!("    {}", style(fingerprint).cyan()))
                    .ok();
            }
            Outcome::NoFingerprint => {
                without += 1;
                term.write_line(&format!(
                    "{} {} {}",
                    style("○").dim(),
                    display_path(&result.path),
                    style("(not an image, or outside 8..4000 px)").dim()
                ))
                .ok();
            }
            Outcome::NotAnImage => {}
            Outcome::Failed { message } => {
                failed += 1;
                term.write_line(&format!(
                    "{} {}: {}",
                    style("✗").red().bold(),
                    display_path(&result.path),
                    style(message).red()
                ))
                .ok();
            }
        }
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "  {} fingerprinted, {} without fingerprint, {} failed",
        style(fingerprinted).cyan(),
        style(without).yellow(),
        style(failed).red()
    ))
    .ok();
}

fn print_json_results(results: &[FileResult]) {
    let reported: Vec<&FileResult> = results
        .iter()
        .filter(|r| !matches!(r.outcome, Outcome::NotAnImage))
        .collect();

    match serde_json::to_string_pretty(&reported) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize results: {}", e),
    }
}

fn print_minimal_results(results: &[FileResult]) {
    for result in results {
        match &result.outcome {
            Outcome::Fingerprinted { fingerprint } => {
                println!("{}\t{}", fingerprint, result.path.display())
            }
            Outcome::NoFingerprint => println!("\t{}", result.path.display()),
            Outcome::NotAnImage | Outcome::Failed { .. } => {}
        }
    }
}

fn run_decode(hex: &[String]) -> Result<()> {
    for value in hex {
        println!("{}", hex_to_binary(value)?);
    }
    Ok(())
}

fn run_inspect(value: &str) -> Result<()> {
    let fingerprint: Fingerprint = value.parse()?;
    let bits = fingerprint.inspect()?;
    let term = Term::stdout();

    term.write_line(&format!(
        "{}  {} x {}",
        style("size").bold(),
        bits.width,
        bits.height
    ))
    .ok();
    term.write_line(&format!(
        "{}  {}  {}",
        style("aHash").bold(),
        fingerprint.average_hash,
        style(&bits.average_bits).dim()
    ))
    .ok();
    term.write_line(&format!(
        "{}  {}  {}",
        style("ref").bold(),
        fingerprint.reference_hash,
        style(&bits.reference_bits).dim()
    ))
    .ok();

    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
