//! Application constants for the ang scan reader
//!
//! This module contains the header grammar keywords, column layout limits,
//! file extensions and default values used throughout the reader.

// =============================================================================
// Header Grammar
// =============================================================================

/// Prefix marking every header line
pub const HEADER_MARKER: u8 = b'#';

/// Top-level header keywords, exactly as written by the acquisition software
pub mod header_keys {
    pub const PIXELS_PER_MICRON: &str = "TEM_PIXperUM";
    pub const X_STAR: &str = "x-star";
    pub const Y_STAR: &str = "y-star";
    pub const Z_STAR: &str = "z-star";
    pub const WORKING_DISTANCE: &str = "WorkingDistance";
    pub const GRID: &str = "GRID:";
    pub const X_STEP: &str = "XSTEP:";
    pub const Y_STEP: &str = "YSTEP:";
    pub const COLUMNS_ODD: &str = "NCOLS_ODD:";
    pub const COLUMNS_EVEN: &str = "NCOLS_EVEN:";
    pub const ROWS: &str = "NROWS:";
    pub const OPERATOR: &str = "OPERATOR:";
    pub const SAMPLE_ID: &str = "SAMPLEID:";
    pub const SCAN_ID: &str = "SCANID:";

    /// Keyword opening a phase record
    pub const PHASE: &str = "Phase";
}

/// Keywords only valid inside a phase record
pub mod phase_keys {
    pub const MATERIAL_NAME: &str = "MaterialName";
    pub const FORMULA: &str = "Formula";
    pub const INFO: &str = "Info";
    pub const SYMMETRY: &str = "Symmetry";
    pub const NUMBER_FAMILIES: &str = "NumberFamilies";
    pub const LATTICE_CONSTANTS: &str = "LatticeConstants";
    pub const HKL_FAMILIES: &str = "hklFamilies";
    pub const ELASTIC_CONSTANTS: &str = "ElasticConstants";

    /// Written without a separating space before its first value
    pub const CATEGORIES: &str = "Categories";
}

/// Grid type tokens following `GRID:`
pub const SQUARE_GRID_TOKEN: &str = "SqrGrid";
pub const HEXAGONAL_GRID_TOKEN: &str = "HexGrid";

/// Values per `LatticeConstants` line (a, b, c, alpha, beta, gamma)
pub const LATTICE_CONSTANT_COUNT: usize = 6;

/// Rows (and values per row) of the elastic constant matrix
pub const ELASTIC_MATRIX_DIM: usize = 6;

/// Most hkl families reserved up front from a `NumberFamilies` value;
/// larger lists grow as their lines are read
pub const MAX_RESERVED_FAMILIES: usize = 256;

// =============================================================================
// Point Data Layout
// =============================================================================

/// Euler angles stored per pixel
pub const EULER_ANGLE_COUNT: usize = 3;

/// Euler triple, x, y, image quality, confidence index, phase
pub const MIN_DATA_COLUMNS: usize = 8;

/// Column count from which the secondary electron signal is present
pub const SEM_COLUMNS: usize = 9;

/// Column count from which the fit value is present
pub const FIT_COLUMNS: usize = 10;

// =============================================================================
// File Types
// =============================================================================

/// Extension read by this crate
pub const ANG_EXTENSION: &str = "ang";

/// Known OIM binary scan extension (recognised, not readable)
pub const OSC_EXTENSION: &str = "osc";

/// Known HDF5 scan extensions (recognised, not readable)
pub const HDF_EXTENSIONS: &[&str] = &["hdf", "hdf5", "h5"];

// =============================================================================
// CLI Defaults
// =============================================================================

/// Points printed from each end of the data by `ang_scan info`
pub const DEFAULT_SAMPLE_POINTS: usize = 5;

/// HKL families printed per phase by `ang_scan info`
pub const SAMPLE_HKL_FAMILIES: usize = 3;
