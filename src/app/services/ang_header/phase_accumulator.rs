//! Accumulates one phase record and validates it as a whole

use super::fields::{FieldFlag, FieldSet, PhaseField};
use crate::app::models::{HklFamily, Phase, PhaseDefect};
use crate::constants::{ELASTIC_MATRIX_DIM, LATTICE_CONSTANT_COUNT, MAX_RESERVED_FAMILIES};
use crate::{Error, Result};

/// A phase record under construction plus the sub-fields seen so far
#[derive(Debug)]
pub struct PhaseAccumulator {
    index: usize,
    phase: Phase,
    seen: FieldSet<PhaseField>,
    declared_families: usize,
    elastic_rows: usize,
}

impl PhaseAccumulator {
    /// Start the record for the `index`-th phase (0-based) of the header
    pub fn new(index: usize, number: usize) -> Self {
        Self {
            index,
            phase: Phase::new(number),
            seen: FieldSet::new(),
            declared_families: 0,
            elastic_rows: 0,
        }
    }

    pub fn set_material_name(&mut self, name: String) {
        self.phase.name = name;
        self.seen.insert(PhaseField::MaterialName);
    }

    pub fn set_formula(&mut self, formula: String) {
        self.phase.formula = formula;
        self.seen.insert(PhaseField::Formula);
    }

    pub fn set_info(&mut self, info: String) {
        self.phase.info = info;
        self.seen.insert(PhaseField::Info);
    }

    pub fn set_symmetry(&mut self, symmetry: u32) {
        self.phase.symmetry = symmetry;
        self.seen.insert(PhaseField::Symmetry);
    }

    pub fn set_lattice_constants(&mut self, lattice: [f32; LATTICE_CONSTANT_COUNT]) {
        self.phase.lattice_constants = lattice;
        self.seen.insert(PhaseField::LatticeConstants);
    }

    /// Record the declared family count and reserve room for the families
    ///
    /// The count comes straight from the file, so at most
    /// [`MAX_RESERVED_FAMILIES`] are reserved; a count with no matching lines
    /// fails in [`PhaseAccumulator::finish`].
    pub fn declare_families(&mut self, count: usize) {
        self.declared_families = count;
        let reserve = count.min(MAX_RESERVED_FAMILIES);
        self.phase
            .hkl_families
            .reserve(reserve.saturating_sub(self.phase.hkl_families.len()));
        self.seen.insert(PhaseField::NumberFamilies);
    }

    pub fn push_family(&mut self, family: HklFamily) {
        self.phase.hkl_families.push(family);
    }

    /// Append one elastic constant row; a seventh row is rejected
    pub fn push_elastic_row(&mut self, row: [f32; ELASTIC_MATRIX_DIM]) -> Result<()> {
        if self.elastic_rows == ELASTIC_MATRIX_DIM {
            return Err(Error::malformed_phase(
                self.index,
                PhaseDefect::ElasticRowCount {
                    found: self.elastic_rows + 1,
                },
            ));
        }
        self.phase.elastic_constants[self.elastic_rows] = row;
        self.elastic_rows += 1;
        if self.elastic_rows == ELASTIC_MATRIX_DIM {
            self.seen.insert(PhaseField::ElasticConstants);
        }
        Ok(())
    }

    pub fn extend_categories(&mut self, categories: impl IntoIterator<Item = u32>) {
        self.phase.categories.extend(categories);
        self.seen.insert(PhaseField::Categories);
    }

    /// Validate the whole record and hand back the finished phase
    pub fn finish(self) -> Result<Phase> {
        if let Some(field) = self.seen.first_missing() {
            let defect = match field {
                PhaseField::ElasticConstants => PhaseDefect::ElasticRowCount {
                    found: self.elastic_rows,
                },
                other => PhaseDefect::MissingField { field: other.key() },
            };
            return Err(Error::malformed_phase(self.index, defect));
        }

        let found = self.phase.hkl_families.len();
        if found != self.declared_families {
            return Err(Error::malformed_phase(
                self.index,
                PhaseDefect::FamilyCountMismatch {
                    declared: self.declared_families,
                    found,
                },
            ));
        }

        Ok(self.phase)
    }
}
