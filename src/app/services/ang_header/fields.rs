//! Header keys and the sets used to track which ones have been seen

use crate::constants::{header_keys, phase_keys};
use std::fmt;
use std::marker::PhantomData;

/// A header key that can be recorded in a [`FieldSet`]
pub trait FieldFlag: Copy + 'static {
    /// Every flag, in the order missing keys are reported
    const ALL: &'static [Self];

    /// Bit position in the set
    fn bit(self) -> u32;

    /// Keyword exactly as written in the file
    fn key(self) -> &'static str;
}

/// Small set of seen header keys
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FieldSet<F: FieldFlag> {
    bits: u32,
    _flags: PhantomData<F>,
}

impl<F: FieldFlag> FieldSet<F> {
    pub fn new() -> Self {
        Self {
            bits: 0,
            _flags: PhantomData,
        }
    }

    pub fn insert(&mut self, flag: F) {
        self.bits |= 1 << flag.bit();
    }

    pub fn contains(&self, flag: F) -> bool {
        self.bits & (1 << flag.bit()) != 0
    }

    /// First flag (in [`FieldFlag::ALL`] order) not yet inserted
    pub fn first_missing(&self) -> Option<F> {
        F::ALL.iter().copied().find(|flag| !self.contains(*flag))
    }
}

impl<F: FieldFlag> Default for FieldSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FieldFlag> fmt::Debug for FieldSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(
                F::ALL
                    .iter()
                    .filter(|flag| self.contains(**flag))
                    .map(|flag| flag.key()),
            )
            .finish()
    }
}

// =============================================================================
// Top-level Keys
// =============================================================================

/// Mandatory top-level scalar keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    PixelsPerMicron,
    XStar,
    YStar,
    ZStar,
    WorkingDistance,
    Grid,
    XStep,
    YStep,
    ColumnsOdd,
    ColumnsEven,
    Rows,
    Operator,
    SampleId,
    ScanId,
}

impl HeaderField {
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

impl FieldFlag for HeaderField {
    const ALL: &'static [Self] = &[
        HeaderField::PixelsPerMicron,
        HeaderField::XStar,
        HeaderField::YStar,
        HeaderField::ZStar,
        HeaderField::WorkingDistance,
        HeaderField::Grid,
        HeaderField::XStep,
        HeaderField::YStep,
        HeaderField::ColumnsOdd,
        HeaderField::ColumnsEven,
        HeaderField::Rows,
        HeaderField::Operator,
        HeaderField::SampleId,
        HeaderField::ScanId,
    ];

    fn bit(self) -> u32 {
        self as u32
    }

    fn key(self) -> &'static str {
        match self {
            HeaderField::PixelsPerMicron => header_keys::PIXELS_PER_MICRON,
            HeaderField::XStar => header_keys::X_STAR,
            HeaderField::YStar => header_keys::Y_STAR,
            HeaderField::ZStar => header_keys::Z_STAR,
            HeaderField::WorkingDistance => header_keys::WORKING_DISTANCE,
            HeaderField::Grid => header_keys::GRID,
            HeaderField::XStep => header_keys::X_STEP,
            HeaderField::YStep => header_keys::Y_STEP,
            HeaderField::ColumnsOdd => header_keys::COLUMNS_ODD,
            HeaderField::ColumnsEven => header_keys::COLUMNS_EVEN,
            HeaderField::Rows => header_keys::ROWS,
            HeaderField::Operator => header_keys::OPERATOR,
            HeaderField::SampleId => header_keys::SAMPLE_ID,
            HeaderField::ScanId => header_keys::SCAN_ID,
        }
    }
}

// =============================================================================
// Phase Record Keys
// =============================================================================

/// Sub-fields every phase record must provide
///
/// `ElasticConstants` is only marked once all six rows have been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseField {
    MaterialName,
    Formula,
    Info,
    Symmetry,
    LatticeConstants,
    NumberFamilies,
    ElasticConstants,
    Categories,
}

impl PhaseField {
    /// Phase keys with a plain whitespace-separated payload
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }
}

impl FieldFlag for PhaseField {
    const ALL: &'static [Self] = &[
        PhaseField::MaterialName,
        PhaseField::Formula,
        PhaseField::Info,
        PhaseField::Symmetry,
        PhaseField::LatticeConstants,
        PhaseField::NumberFamilies,
        PhaseField::ElasticConstants,
        PhaseField::Categories,
    ];

    fn bit(self) -> u32 {
        self as u32
    }

    fn key(self) -> &'static str {
        match self {
            PhaseField::MaterialName => phase_keys::MATERIAL_NAME,
            PhaseField::Formula => phase_keys::FORMULA,
            PhaseField::Info => phase_keys::INFO,
            PhaseField::Symmetry => phase_keys::SYMMETRY,
            PhaseField::LatticeConstants => phase_keys::LATTICE_CONSTANTS,
            PhaseField::NumberFamilies => phase_keys::NUMBER_FAMILIES,
            PhaseField::ElasticConstants => phase_keys::ELASTIC_CONSTANTS,
            PhaseField::Categories => phase_keys::CATEGORIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set_tracks_inserts() {
        let mut seen = FieldSet::<HeaderField>::new();
        assert!(!seen.contains(HeaderField::Grid));
        assert_eq!(seen.first_missing(), Some(HeaderField::PixelsPerMicron));

        seen.insert(HeaderField::PixelsPerMicron);
        seen.insert(HeaderField::Grid);
        assert!(seen.contains(HeaderField::Grid));
        assert_eq!(seen.first_missing(), Some(HeaderField::XStar));
    }

    #[test]
    fn test_field_set_complete() {
        let mut seen = FieldSet::<PhaseField>::default();
        for field in PhaseField::ALL {
            seen.insert(*field);
        }
        assert_eq!(seen.first_missing(), None);
    }

    #[test]
    fn test_keys_round_trip() {
        for field in HeaderField::ALL {
            assert_eq!(HeaderField::from_key(field.key()), Some(*field));
        }
        for field in PhaseField::ALL {
            assert_eq!(PhaseField::from_key(field.key()), Some(*field));
        }
        assert_eq!(HeaderField::from_key("GRID"), None);
        assert_eq!(PhaseField::from_key("hklFamilies"), None);
    }

    #[test]
    fn test_debug_lists_seen_keys() {
        let mut seen = FieldSet::<HeaderField>::new();
        seen.insert(HeaderField::Rows);
        assert_eq!(format!("{:?}", seen), "{\"NROWS:\"}");
    }
}
