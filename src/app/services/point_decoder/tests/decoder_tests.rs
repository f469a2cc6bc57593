//! Tests for record decoding, scatter order and early termination

use super::*;
use crate::Error;

fn value(n: usize, column: usize) -> f32 {
    format!("{}.{}", n, column).parse().unwrap()
}

#[test]
fn test_square_grid_scatter_order() {
    let geometry = square(2, 2, 2);
    let (parsed, data) = decode_buffered(&numbered_lines(4, 8), &geometry, 8).unwrap();

    assert_eq!(parsed, 4);
    assert_eq!(data.len(), 4);
    assert_eq!(data.euler.len(), 12);
    assert!(data.sem.is_none());
    assert!(data.fit.is_none());

    // Records fill each row from its last column
    let record_at_pixel = [1, 0, 3, 2];
    for (pixel, record) in record_at_pixel.iter().enumerate() {
        assert_eq!(data.euler[3 * pixel], value(*record, 0));
        assert_eq!(data.euler[3 * pixel + 2], value(*record, 2));
        assert_eq!(data.x[pixel], value(*record, 3));
        assert_eq!(data.y[pixel], value(*record, 4));
        assert_eq!(data.image_quality[pixel], value(*record, 5));
        assert_eq!(data.confidence_index[pixel], value(*record, 6));
        assert_eq!(data.phase[pixel], *record as u32);
    }
}

#[test]
fn test_truncated_input_reports_parsed_count() {
    let geometry = square(2, 2, 2);
    let (parsed, data) = decode_mapped(&numbered_lines(3, 8), &geometry, 8).unwrap();
    assert_eq!(parsed, 3);
    // Pixel 2 is addressed by the missing fourth record
    assert_eq!(data.x[2], 0.0);
}

#[test]
fn test_stops_at_total_points() {
    let geometry = square(2, 2, 2);
    let (parsed, _) = decode_buffered(&numbered_lines(6, 8), &geometry, 8).unwrap();
    assert_eq!(parsed, 4);
}

#[test]
fn test_short_record_ends_decoding() {
    let text = format!(
        "{}{}{}",
        numbered_line(0, 8),
        "1.0 2.0 3.0 4.0 5.0\n",
        numbered_line(2, 8)
    );
    let geometry = square(2, 2, 2);

    let (buffered, _) = decode_buffered(&text, &geometry, 8).unwrap();
    let (mapped, _) = decode_mapped(&text, &geometry, 8).unwrap();
    assert_eq!(buffered, 1);
    assert_eq!(mapped, 1);
}

#[test]
fn test_missing_optional_column_ends_decoding() {
    let text = format!("{}{}", numbered_line(0, 10), numbered_line(1, 9));
    let (parsed, _) = decode_mapped(&text, &square(2, 2, 1), 10).unwrap();
    assert_eq!(parsed, 1);
}

#[test]
fn test_non_numeric_field() {
    let text = format!("{}0.1 0.2 0.3 abc 0.5 0.6 0.7 1\n", numbered_line(0, 8));
    match decode_buffered(&text, &square(2, 2, 2), 8) {
        Err(Error::InvalidPointField {
            point,
            column,
            text,
        }) => {
            assert_eq!(point, 1);
            assert_eq!(column, 4);
            assert_eq!(text, "abc");
        }
        other => panic!("expected InvalidPointField, got {:?}", other),
    }
}

#[test]
fn test_phase_must_be_unsigned_integer() {
    let text = "0.1 0.2 0.3 0.4 0.5 0.6 0.7 1.5\n";
    assert!(matches!(
        decode_mapped(text, &square(1, 1, 1), 8),
        Err(Error::InvalidPointField { column: 8, .. })
    ));
}

#[test]
fn test_optional_columns_are_filled() {
    let geometry = square(1, 1, 2);
    let (parsed, data) = decode_buffered(&numbered_lines(2, 10), &geometry, 10).unwrap();
    assert_eq!(parsed, 2);

    let sem = data.sem.as_ref().unwrap();
    let fit = data.fit.as_ref().unwrap();
    assert_eq!(sem[0], value(0, 8));
    assert_eq!(fit[0], value(0, 9));
    assert_eq!(sem[1], value(1, 8));
    assert_eq!(fit[1], value(1, 9));
}

#[test]
fn test_extra_columns_are_skipped() {
    let geometry = square(2, 2, 1);
    let (parsed, data) = decode_mapped(&numbered_lines(2, 14), &geometry, 14).unwrap();
    assert_eq!(parsed, 2);
    assert_eq!(data.fit.as_ref().unwrap()[1], value(0, 9));
    assert_eq!(data.x[0], value(1, 3));
}

#[test]
fn test_both_cursors_produce_identical_arrays() {
    let geometry = GridGeometry::new(GridType::Hexagonal, 3, 2, 4);
    let mut text = numbered_lines(10, 10);
    text.insert_str(0, "\n");
    let text = text.replace("\n  3.", "\r\n\n  3.");

    let buffered = decode_buffered(&text, &geometry, 10).unwrap();
    let mapped = decode_mapped(&text, &geometry, 10).unwrap();
    assert_eq!(buffered.0, 10);
    assert_eq!(buffered, mapped);
}

#[test]
fn test_traversal_outside_grid_is_rejected() {
    // One hexagonal row of NCOLS_ODD pixels, but the first row is addressed
    // with the wider NCOLS_EVEN
    let geometry = GridGeometry::new(GridType::Hexagonal, 2, 3, 1);
    match decode_buffered(&numbered_lines(2, 8), &geometry, 8) {
        Err(Error::PointOutsideGrid {
            point,
            index,
            total,
        }) => {
            assert_eq!(point, 0);
            assert_eq!(index, 2);
            assert_eq!(total, 2);
        }
        other => panic!("expected PointOutsideGrid, got {:?}", other),
    }
}

#[test]
fn test_hexagonal_odd_rows_run_past_the_grid() {
    // 3/2 columns x 3 rows holds 8 pixels; the last row is addressed
    // after even, odd, even rows and starts at index 9
    let geometry = GridGeometry::new(GridType::Hexagonal, 3, 2, 3);
    let text = numbered_lines(8, 8);

    for result in [
        decode_buffered(&text, &geometry, 8),
        decode_mapped(&text, &geometry, 8),
    ] {
        match result {
            Err(Error::PointOutsideGrid {
                point,
                index,
                total,
            }) => assert_eq!((point, index, total), (7, 9, 8)),
            other => panic!("expected PointOutsideGrid, got {:?}", other),
        }
    }
}

#[test]
fn test_mapped_decode_after_header_offset() {
    let header = "# NROWS: 1\n";
    let text = format!("{}{}", header, numbered_lines(2, 8));
    let geometry = square(2, 2, 1);
    let mut data = PointData::allocate(2, 8).unwrap();

    let mut cursor = MappedCursor::new(text.as_bytes(), header.len() as u64);
    let parsed = decode_points(&mut cursor, &geometry, &mut data, 8).unwrap();

    assert_eq!(parsed, 2);
    assert_eq!(cursor.consumed(), text.len());
    assert_eq!(data.phase, vec![1, 0]);
}

#[test]
fn test_empty_grid_decodes_nothing() {
    let (parsed, data) = decode_buffered(&numbered_lines(2, 8), &square(0, 0, 3), 8).unwrap();
    assert_eq!(parsed, 0);
    assert!(data.is_empty());
}
