//! Ang header parsing
//!
//! The header is the leading block of lines starting with `#`. It holds the
//! scan scalars (pattern centre, step sizes, grid dimensions, operator and
//! sample identifiers) followed by or interleaved with phase records:
//!
//! ```text
//! # TEM_PIXperUM          1.000000
//! # x-star                0.500000
//! # Phase 1
//! # MaterialName      Nickel
//! # NumberFamilies        1
//! # hklFamilies          1  1  1 1 8.469246 1
//! # ElasticConstants  247.0 147.0 147.0 0.0 0.0 0.0
//! # Categories0 0 0 0 0
//! # GRID: SqrGrid
//! ```
//!
//! A phase record stays open until the next `Phase` line or the end of the
//! header and is validated as a whole when it closes.

mod fields;
mod parser;
mod phase_accumulator;

#[cfg(test)]
mod tests;

pub use fields::{FieldFlag, FieldSet, HeaderField, PhaseField};
pub use parser::{AngHeaderParser, ParsedHeader};
