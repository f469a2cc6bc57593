//! Fixtures and helpers for header parser tests

use super::{AngHeaderParser, ParsedHeader};
use crate::Result;
use std::io::Cursor;


/// Top-level scalars for a square grid
pub fn scalar_lines(grid: &str, odd: usize, even: usize, rows: usize) -> String {
    format!(
        "# TEM_PIXperUM          1.000000\n\
         # x-star                0.405000\n\
         # y-star                0.765000\n\
         # z-star                0.702000\n\
         # WorkingDistance       15.000000\n\
         #\n\
         # GRID: {grid}\n\
         # XSTEP: 0.500000\n\
         # YSTEP: 0.250000\n\
         # NCOLS_ODD: {odd}\n\
         # NCOLS_EVEN: {even}\n\
         # NROWS: {rows}\n\
         #\n\
         # OPERATOR: \tjdoe\n\
         #\n\
         # SAMPLEID: \tsample 7\n\
         #\n\
         # SCANID: \t\n\
         #\n"
    )
}

/// A complete phase record with two hkl families
pub fn nickel_phase(number: usize) -> String {
    let mut record = format!(
        "# Phase {number}\n\
         # MaterialName  \tNickel\n\
         # Formula     \tNi\n\
         # Info \t\t\n\
         # Symmetry              43\n\
         # LatticeConstants      3.560 3.560 3.560  90.000  90.000  90.000\n\
         # NumberFamilies        2\n\
         # hklFamilies   \t 1  1  1 1 8.469246 1\n\
         # hklFamilies   \t 2  0  0 0 7.243917 1\n"
    );
    for row in 0..6 {
        record.push_str(&elastic_row(row));
    }
    record.push_str("# Categories0 0 0 0 0 \n");
    record
}

/// One elastic constant line whose diagonal entry is `row + 1`
pub fn elastic_row(row: usize) -> String {
    let values: Vec<String> = (0..6)
        .map(|column| {
            if column == row {
                format!("{}.000000", row + 1)
            } else {
                "0.000000".to_string()
            }
        })
        .collect();
    format!("# ElasticConstants \t{}\n", values.join(" "))
}

/// A data line with ten columns
pub const DATA_LINE: &str = "  2.10000   0.50000   1.20000      0.00000      0.00000 250.0  0.950  1  1500.0  0.450\n";

/// Full header (one nickel phase, 2x2 square grid) plus two data lines
pub fn complete_file() -> String {
    format!(
        "{}{}{}{}",
        nickel_phase(1),
        scalar_lines("SqrGrid", 2, 2, 2),
        DATA_LINE,
        DATA_LINE
    )
}

pub fn parse_text(text: &str) -> Result<ParsedHeader> {
    let mut reader = Cursor::new(text.as_bytes().to_vec());
    AngHeaderParser::new().parse(&mut reader)
}
