//! Shared helpers for point decoder tests

use super::{LineCursor, MappedCursor, decode_points};
use crate::Result;
use crate::app::models::{GridType, PointData};
use crate::app::services::grid::GridGeometry;
use std::io::Cursor;

mod cursor_tests;
mod decoder_tests;

/// Data line whose values identify the record: every real field is `n`
/// plus a column fraction, the phase is `n`
pub fn numbered_line(n: usize, columns: usize) -> String {
    let mut values: Vec<String> = (0..columns)
        .map(|column| format!("{}.{}", n, column))
        .collect();
    if columns > 7 {
        values[7] = n.to_string();
    }
    format!("  {}\n", values.join("  "))
}

pub fn numbered_lines(count: usize, columns: usize) -> String {
    (0..count).map(|n| numbered_line(n, columns)).collect()
}

pub fn square(odd: usize, even: usize, rows: usize) -> GridGeometry {
    GridGeometry::new(GridType::Square, odd, even, rows)
}

/// Decode `text` through the buffered cursor
pub fn decode_buffered(
    text: &str,
    geometry: &GridGeometry,
    columns: usize,
) -> Result<(usize, PointData)> {
    let mut data = PointData::allocate(geometry.total_points()?, columns)?;
    let mut cursor = LineCursor::new(Cursor::new(text.as_bytes()));
    let parsed = decode_points(&mut cursor, geometry, &mut data, columns)?;
    Ok((parsed, data))
}

/// Decode `text` through the mapped-region cursor
pub fn decode_mapped(
    text: &str,
    geometry: &GridGeometry,
    columns: usize,
) -> Result<(usize, PointData)> {
    let mut data = PointData::allocate(geometry.total_points()?, columns)?;
    let mut cursor = MappedCursor::new(text.as_bytes(), 0);
    let parsed = decode_points(&mut cursor, geometry, &mut data, columns)?;
    Ok((parsed, data))
}
