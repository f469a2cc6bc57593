//! Scan grid geometry
//!
//! Pure functions of the grid type and the declared dimensions: the number of
//! pixels in the scan and the order in which data records are addressed.

use crate::app::models::{GridType, ScanHeader};
use crate::constants::EULER_ANGLE_COUNT;
use crate::{Error, Result};

/// Grid type and declared dimensions of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub grid_type: GridType,
    pub odd_columns: usize,
    pub even_columns: usize,
    pub rows: usize,
}

impl GridGeometry {
    pub fn new(grid_type: GridType, odd_columns: usize, even_columns: usize, rows: usize) -> Self {
        Self {
            grid_type,
            odd_columns,
            even_columns,
            rows,
        }
    }

    /// Geometry declared by a parsed header
    pub fn from_header(header: &ScanHeader) -> Self {
        Self::new(
            header.grid_type,
            header.odd_columns,
            header.even_columns,
            header.rows,
        )
    }

    /// Number of pixels in the scan
    ///
    /// - square: `max(odd, even) * rows`
    /// - hexagonal: `rows / 2 * (odd + even)`, plus `odd` when `rows` is odd
    ///
    /// Counts whose Euler array length would not fit in `usize` overflow too.
    pub fn total_points(&self) -> Result<usize> {
        let total = match self.grid_type {
            GridType::Square => self.odd_columns.max(self.even_columns).checked_mul(self.rows),
            GridType::Hexagonal => {
                let pair = self.odd_columns.checked_add(self.even_columns);
                let paired = pair.and_then(|pair| pair.checked_mul(self.rows / 2));
                if self.rows % 2 == 1 {
                    paired.and_then(|paired| paired.checked_add(self.odd_columns))
                } else {
                    paired
                }
            }
            GridType::Unknown => {
                return Err(Error::UnsupportedGridType {
                    grid: self.grid_type.to_string(),
                });
            }
        };

        total
            .filter(|total| total.checked_mul(EULER_ANGLE_COUNT).is_some())
            .ok_or(Error::GridDimensionsOverflow {
                odd_columns: self.odd_columns,
                even_columns: self.even_columns,
                rows: self.rows,
            })
    }

    /// Pixel index of every data record in file order
    pub fn traversal(&self) -> RowTraversal {
        RowTraversal::new(self.odd_columns, self.even_columns)
    }
}

/// Addressing sequence shared by both point decoders
///
/// Rows alternate between `even_columns` (first row) and `odd_columns`
/// pixels. Within a row, records fill columns from the last one down to 0,
/// and the row offset advances by the row width once the column counter
/// wraps. Zero-width rows are skipped. The sequence never ends on its own;
/// decoders stop after the expected number of points.
#[derive(Debug, Clone)]
pub struct RowTraversal {
    odd_columns: usize,
    even_columns: usize,
    completed_row_points: usize,
    even_row: bool,
    remaining_in_row: usize,
}

impl RowTraversal {
    fn new(odd_columns: usize, even_columns: usize) -> Self {
        Self {
            odd_columns,
            even_columns,
            completed_row_points: 0,
            even_row: true,
            remaining_in_row: even_columns,
        }
    }

    fn row_width(&self) -> usize {
        if self.even_row {
            self.even_columns
        } else {
            self.odd_columns
        }
    }

    fn finish_row(&mut self) {
        self.completed_row_points = self.completed_row_points.saturating_add(self.row_width());
        self.even_row = !self.even_row;
        self.remaining_in_row = self.row_width();
    }
}

impl Iterator for RowTraversal {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.odd_columns == 0 && self.even_columns == 0 {
            return None;
        }
        while self.remaining_in_row == 0 {
            self.finish_row();
        }
        self.remaining_in_row -= 1;
        Some(self.completed_row_points.saturating_add(self.remaining_in_row))
    }
}
