//! ANG Scan Library
//!
//! A Rust library for reading EBSD orientation-map scans stored in the
//! TSL/EDAX `.ang` text format into flat, per-pixel arrays.
//!
//! This library provides tools for:
//! - Parsing `.ang` headers: scan metadata and the phase catalog
//! - Computing square and hexagonal grid geometry
//! - Decoding point data through a buffered line reader or a memory map
//! - Exclusive-access memory-mapped files with platform-specific hints
//! - Comprehensive error handling with enough context to locate file defects
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ang_scan::ScanStore;
//!
//! # fn example() -> ang_scan::Result<()> {
//! let scan = ScanStore::from_path("scan.ang")?;
//! println!(
//!     "{} points on a {} grid, {} phase(s)",
//!     scan.total_points(),
//!     scan.header().grid_type,
//!     scan.phases().len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod scan_store;
    pub mod services {
        pub mod ang_header;
        pub mod grid;
        pub mod mapped_file;
        pub mod point_decoder;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FileType, GridType, HklFamily, Phase, PhaseDefect, PointData, ScanHeader};
pub use app::scan_store::{ReadStats, ScanStore};
pub use app::services::mapped_file::{AccessHint, MappedFile};
pub use config::{DecodeStrategy, ReaderConfig};

use std::path::PathBuf;

/// Result type alias for ang scan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for reading `.ang` scans
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A mandatory top-level header key never appeared
    #[error("missing ang header value {field}")]
    MissingHeaderField { field: &'static str },

    /// A phase record is incomplete or inconsistent
    #[error("malformed record for phase {phase}: {defect}")]
    MalformedPhaseRecord { phase: usize, defect: PhaseDefect },

    /// Header line with a key outside the ang grammar
    #[error("unknown ang header keyword '{key}' on line {line}")]
    UnknownHeaderKey { key: String, line: usize },

    /// Phase sub-key found before any `Phase` line
    #[error("header keyword '{key}' on line {line} appears before any Phase record")]
    PhaseKeyOutsidePhase { key: String, line: usize },

    /// Header value could not be parsed for its key
    #[error("invalid value for ang header keyword '{key}': '{value}'")]
    InvalidHeaderValue { key: String, value: String },

    /// Grid type is not square or hexagonal
    #[error("unsupported grid type '{grid}' (only SqrGrid and HexGrid are supported)")]
    UnsupportedGridType { grid: String },

    /// Declared grid dimensions overflow the addressable point count
    #[error("grid dimensions overflow: {odd_columns}/{even_columns} columns x {rows} rows")]
    GridDimensionsOverflow {
        odd_columns: usize,
        even_columns: usize,
        rows: usize,
    },

    /// The grid is too large to allocate in this process
    #[error("cannot allocate point arrays for {points} data points")]
    PointAllocation {
        points: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    /// The header declares more points than the data section could hold
    #[error(
        "header declares {expected} data points but the {bytes}-byte data section holds at most {capacity}"
    )]
    DataSectionTooShort {
        expected: usize,
        capacity: usize,
        bytes: u64,
    },

    /// File extension is not readable by this crate
    #[error(
        "unsupported file type {file_type} for '{}' (currently only .ang files are supported)",
        .path.display()
    )]
    UnsupportedFileType { path: PathBuf, file_type: FileType },

    /// First data line has too few values
    #[error("unexpected number of ang values per point (got {found}, expected at least {required})")]
    TooFewColumns { found: usize, required: usize },

    /// The data section ended before the grid was filled
    #[error("file ended after reading {parsed} of {expected} data points")]
    TruncatedData { parsed: usize, expected: usize },

    /// A point record holds a non-numeric value
    #[error("invalid value '{text}' in column {column} of data point {point}")]
    InvalidPointField {
        point: usize,
        column: usize,
        text: String,
    },

    /// Grid traversal addressed a pixel outside the allocated arrays
    ///
    /// Hexagonal scans with an odd number of rows and `NCOLS_ODD` one larger
    /// than `NCOLS_EVEN` hit this on an intact file: the traversal starts
    /// with an even-width row, so the last odd-width row runs past the pixel
    /// count. The error then reflects that row order, not file corruption.
    #[error("data point {point} maps to pixel {index} outside the {total}-pixel grid")]
    PointOutsideGrid {
        point: usize,
        index: usize,
        total: usize,
    },

    /// Opening, resizing or mapping a file failed
    #[error("{} couldn't be memory mapped: {source}", .path.display())]
    MappingFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mutable access was requested from a read-only mapping
    #[error("write access to read only memory map isn't allowed")]
    WriteToReadOnlyMapping,

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a missing header field error
    pub fn missing_header_field(field: &'static str) -> Self {
        Self::MissingHeaderField { field }
    }

    /// Create a malformed phase record error
    pub fn malformed_phase(phase: usize, defect: PhaseDefect) -> Self {
        Self::MalformedPhaseRecord { phase, defect }
    }

    /// Create an invalid header value error
    pub fn invalid_header_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidHeaderValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a mapping failure from the OS error that caused it
    pub fn mapping_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MappingFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
