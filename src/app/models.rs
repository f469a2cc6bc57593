//! Data models for ang scans
//!
//! This module contains the core data structures describing an EBSD scan:
//! the header scalars, the phase catalog and the flat per-pixel arrays.

use crate::constants::{self, ELASTIC_MATRIX_DIM, LATTICE_CONSTANT_COUNT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// =============================================================================
// Grid and File Types
// =============================================================================

/// Pixel layout of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GridType {
    /// Unrecognised `GRID:` token; cannot be allocated
    #[default]
    Unknown,
    /// Uniform square grid
    Square,
    /// Hexagonal grid with alternating odd/even row widths
    Hexagonal,
}

impl GridType {
    /// Map a `GRID:` token to a grid type; anything unrecognised is `Unknown`
    pub fn from_token(token: &str) -> Self {
        match token {
            constants::SQUARE_GRID_TOKEN => GridType::Square,
            constants::HEXAGONAL_GRID_TOKEN => GridType::Hexagonal,
            _ => GridType::Unknown,
        }
    }

    /// Token written in the header for this grid type
    pub fn token(&self) -> &'static str {
        match self {
            GridType::Square => constants::SQUARE_GRID_TOKEN,
            GridType::Hexagonal => constants::HEXAGONAL_GRID_TOKEN,
            GridType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Scan file formats recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    Unknown,
    /// TSL/EDAX text scan (`.ang`)
    Ang,
    /// OIM binary scan (`.osc`), recognised but not implemented
    Osc,
    /// HDF5 scan (`.hdf`, `.hdf5`, `.h5`), recognised but not implemented
    Hdf,
}

impl FileType {
    /// Classify a path by its (case-insensitive) extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let Some(extension) = path.as_ref().extension().and_then(|ext| ext.to_str()) else {
            return FileType::Unknown;
        };

        let extension = extension.to_ascii_lowercase();
        if extension == constants::ANG_EXTENSION {
            FileType::Ang
        } else if extension == constants::OSC_EXTENSION {
            FileType::Osc
        } else if constants::HDF_EXTENSIONS.contains(&extension.as_str()) {
            FileType::Hdf
        } else {
            FileType::Unknown
        }
    }

    /// Whether this crate has a reader for the format
    pub fn is_readable(&self) -> bool {
        matches!(self, FileType::Ang)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Unknown => "unknown",
            FileType::Ang => "ang",
            FileType::Osc => "osc",
            FileType::Hdf => "hdf",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Phase Catalog
// =============================================================================

/// A crystallographic plane family listed for a phase
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HklFamily {
    /// Miller indices of the plane
    pub hkl: [i32; 3],

    /// Whether the family is used for indexing
    pub use_in_indexing: bool,

    /// Diffraction intensity
    pub intensity: f32,

    /// Whether bands are overlaid on indexed patterns
    pub show_bands: bool,
}

/// A candidate crystal structure that pixels are indexed against
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Phase {
    /// Phase number as written in the header (pixel phase indices refer to it)
    pub number: usize,

    /// Material name
    pub name: String,

    /// Chemical formula
    pub formula: String,

    /// Free-text information
    pub info: String,

    /// TSL symmetry code
    pub symmetry: u32,

    /// Lattice constants (a, b, c, alpha, beta, gamma)
    pub lattice_constants: [f32; LATTICE_CONSTANT_COUNT],

    /// HKL families in file order
    pub hkl_families: Vec<HklFamily>,

    /// Elastic constants, 6x6 in row-major order
    pub elastic_constants: [[f32; ELASTIC_MATRIX_DIM]; ELASTIC_MATRIX_DIM],

    /// Category values
    pub categories: Vec<u32>,
}

impl Phase {
    /// Create an empty phase record with the given number
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }
}

/// Reason a phase record was rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaseDefect {
    /// A required sub-field never appeared
    #[error("missing {field}")]
    MissingField { field: &'static str },

    /// The number of `hklFamilies` lines differs from `NumberFamilies`
    #[error("declared {declared} hkl families but found {found}")]
    FamilyCountMismatch { declared: usize, found: usize },

    /// Elastic constant rows do not form a 6x6 matrix
    #[error("expected 6 elastic constant rows but found {found}")]
    ElasticRowCount { found: usize },
}

// =============================================================================
// Scan Header
// =============================================================================

/// Scalar metadata and phase catalog from an ang header
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanHeader {
    /// Pixels per micron (`TEM_PIXperUM`)
    pub pixels_per_micron: f32,

    /// Pattern centre calibration (`x-star`, `y-star`, `z-star`)
    pub x_star: f32,
    pub y_star: f32,
    pub z_star: f32,

    /// Working distance in mm
    pub working_distance: f32,

    /// Pixel size in microns
    pub x_step: f32,
    pub y_step: f32,

    /// Row widths in pixels (equal for square grids, alternating for hexagonal)
    pub odd_columns: usize,
    pub even_columns: usize,

    /// Height in pixels
    pub rows: usize,

    pub operator_name: String,
    pub sample_id: String,
    pub scan_id: String,

    pub grid_type: GridType,

    /// Phases in header order; pixel phase indices refer to their numbers
    pub phases: Vec<Phase>,
}

// =============================================================================
// Point Data
// =============================================================================

/// Flat per-pixel arrays, all in row-major grid order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointData {
    /// Euler angle triples, `3 * len()` values
    pub euler: Vec<f32>,

    /// Pixel coordinates in microns
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    pub image_quality: Vec<f32>,
    pub confidence_index: Vec<f32>,

    /// Phase of each pixel
    pub phase: Vec<u32>,

    /// Secondary electron signal, present for 9+ data columns
    pub sem: Option<Vec<f32>>,

    /// Pattern fit, present for 10+ data columns
    pub fit: Option<Vec<f32>>,
}

impl PointData {
    /// Zero-filled arrays for `total_points` pixels with optional arrays
    /// chosen from the data column count
    ///
    /// Memory is reserved fallibly, so a grid too large for the process is a
    /// [`Error::PointAllocation`] rather than an abort.
    pub fn allocate(total_points: usize, column_count: usize) -> Result<Self> {
        let optional = |threshold: usize| -> Result<Option<Vec<f32>>> {
            if column_count >= threshold {
                zeroed(total_points, total_points).map(Some)
            } else {
                Ok(None)
            }
        };

        Ok(Self {
            euler: zeroed(
                total_points.saturating_mul(constants::EULER_ANGLE_COUNT),
                total_points,
            )?,
            x: zeroed(total_points, total_points)?,
            y: zeroed(total_points, total_points)?,
            image_quality: zeroed(total_points, total_points)?,
            confidence_index: zeroed(total_points, total_points)?,
            phase: zeroed(total_points, total_points)?,
            sem: optional(constants::SEM_COLUMNS)?,
            fit: optional(constants::FIT_COLUMNS)?,
        })
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.image_quality.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_quality.is_empty()
    }
}

/// `len` default values, or an allocation error naming the grid size
fn zeroed<T: Clone + Default>(len: usize, points: usize) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|source| Error::PointAllocation { points, source })?;
    values.resize(len, T::default());
    Ok(values)
}
