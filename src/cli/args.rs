//! Command-line argument definitions for the ang scan reader
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{DecodeStrategy, ReaderConfig};
use crate::constants::DEFAULT_SAMPLE_POINTS;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ang scan reader
///
/// Reads EBSD orientation maps stored as TSL/EDAX `.ang` files and reports
/// their header, phase catalog and point data.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ang_scan",
    version,
    about = "Read and check EBSD orientation maps stored as .ang files",
    long_about = "Reads TSL/EDAX .ang orientation maps: the scan header, the phase catalog \
                  and the per-pixel orientation data of square and hexagonal grids. Use \
                  `info` to summarise one scan or `check` to validate many."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show warnings and errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress log output except warnings and errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the header, phases and a sample of the point data of one scan
    Info(InfoArgs),
    /// Read every .ang file under the given paths and report failures
    Check(CheckArgs),
}

/// Arguments for the info command
#[derive(Debug, Clone, Parser)]
pub struct InfoArgs {
    /// Scan file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// How point data is decoded
    #[arg(
        short = 's',
        long = "strategy",
        value_name = "STRATEGY",
        default_value_t = DecodeStrategy::MemoryMapped,
        help = "Point data decoder: mmap or buffered"
    )]
    pub strategy: DecodeStrategy,

    /// Points printed from each end of the data
    #[arg(
        short = 'n',
        long = "points",
        value_name = "COUNT",
        default_value_t = DEFAULT_SAMPLE_POINTS,
        help = "Number of points printed from the start and end of the data"
    )]
    pub points: usize,
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Files or directories to check; directories are searched recursively
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// How point data is decoded
    #[arg(
        short = 's',
        long = "strategy",
        value_name = "STRATEGY",
        default_value_t = DecodeStrategy::MemoryMapped,
        help = "Point data decoder: mmap or buffered"
    )]
    pub strategy: DecodeStrategy,

    /// Report format
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for the report"
    )]
    pub format: OutputFormat,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Log level implied by `--verbose` and `--quiet`
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

impl InfoArgs {
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::default().with_strategy(self.strategy)
    }
}

impl CheckArgs {
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::default().with_strategy(self.strategy)
    }
}
