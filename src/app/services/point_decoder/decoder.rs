//! Record decoding and scatter into the per-pixel arrays

use super::cursor::FieldCursor;
use crate::app::models::PointData;
use crate::app::services::grid::GridGeometry;
use crate::constants::{FIT_COLUMNS, SEM_COLUMNS};
use crate::{Error, Result};
use std::str::FromStr;
use tracing::debug;

/// One data line: `phi1 PHI phi2 x y IQ CI phase [SEM] [fit] ...`
#[derive(Debug, Clone, Copy, PartialEq)]
struct PointRecord {
    euler: [f32; 3],
    x: f32,
    y: f32,
    image_quality: f32,
    confidence_index: f32,
    phase: u32,
    sem: Option<f32>,
    fit: Option<f32>,
}

/// Hands out the fields of one record, tracking the 1-based column for errors
struct RecordFields<'c, C: FieldCursor + ?Sized> {
    cursor: &'c mut C,
    point: usize,
    column: usize,
}

impl<C: FieldCursor + ?Sized> RecordFields<'_, C> {
    /// `Ok(None)` when the record ends before this column
    fn next<T: FromStr>(&mut self) -> Result<Option<T>> {
        self.column += 1;
        let Some(token) = self.cursor.next_field() else {
            return Ok(None);
        };
        match std::str::from_utf8(token).ok().and_then(|text| text.parse().ok()) {
            Some(value) => Ok(Some(value)),
            None => Err(Error::InvalidPointField {
                point: self.point,
                column: self.column,
                text: String::from_utf8_lossy(token).into_owned(),
            }),
        }
    }
}

/// Parse the current record, `Ok(None)` if it is cut short
fn read_record<C: FieldCursor + ?Sized>(
    cursor: &mut C,
    point: usize,
    column_count: usize,
) -> Result<Option<PointRecord>> {
    let mut fields = RecordFields {
        cursor,
        point,
        column: 0,
    };

    macro_rules! field {
        ($ty:ty) => {
            match fields.next::<$ty>()? {
                Some(value) => value,
                None => return Ok(None),
            }
        };
    }

    let euler = [field!(f32), field!(f32), field!(f32)];
    let x = field!(f32);
    let y = field!(f32);
    let image_quality = field!(f32);
    let confidence_index = field!(f32);
    let phase = field!(u32);
    let sem = if column_count >= SEM_COLUMNS {
        Some(field!(f32))
    } else {
        None
    };
    let fit = if column_count >= FIT_COLUMNS {
        Some(field!(f32))
    } else {
        None
    };

    Ok(Some(PointRecord {
        euler,
        x,
        y,
        image_quality,
        confidence_index,
        phase,
        sem,
        fit,
    }))
}

fn scatter(data: &mut PointData, index: usize, record: &PointRecord) {
    data.euler[3 * index..3 * index + 3].copy_from_slice(&record.euler);
    data.x[index] = record.x;
    data.y[index] = record.y;
    data.image_quality[index] = record.image_quality;
    data.confidence_index[index] = record.confidence_index;
    data.phase[index] = record.phase;
    if let (Some(sem), Some(value)) = (data.sem.as_mut(), record.sem) {
        sem[index] = value;
    }
    if let (Some(fit), Some(value)) = (data.fit.as_mut(), record.fit) {
        fit[index] = value;
    }
}

/// Decode up to `geometry.total_points()` records from `cursor` into `data`
///
/// Records are placed at the pixel given by the grid traversal. Decoding
/// stops early at the end of input or at a record with fewer fields than
/// `column_count` requires; such a record is not counted. Returns the
/// number of records stored.
///
/// A record whose traversal index falls outside `data` is a
/// [`Error::PointOutsideGrid`]. Besides malformed dimensions this happens for
/// hexagonal grids with odd `NROWS` and `NCOLS_ODD > NCOLS_EVEN`, since the
/// first row is addressed with the even width.
pub fn decode_points<C: FieldCursor + ?Sized>(
    cursor: &mut C,
    geometry: &GridGeometry,
    data: &mut PointData,
    column_count: usize,
) -> Result<usize> {
    let expected = geometry.total_points()?;
    let capacity = data.len();
    let mut addresses = geometry.traversal();
    let mut parsed = 0;

    while parsed < expected {
        if !cursor.next_record()? {
            break;
        }
        let Some(record) = read_record(cursor, parsed, column_count)? else {
            debug!("Data point {} is incomplete; stopping", parsed);
            break;
        };
        let Some(index) = addresses.next() else {
            break;
        };
        if index >= capacity {
            return Err(Error::PointOutsideGrid {
                point: parsed,
                index,
                total: capacity,
            });
        }

        scatter(data, index, &record);
        cursor.finish_record();
        parsed += 1;
    }

    debug!("Decoded {} of {} data points", parsed, expected);
    Ok(parsed)
}
