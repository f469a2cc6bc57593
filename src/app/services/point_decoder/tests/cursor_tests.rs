//! Tests for the buffered and mapped field cursors

use super::*;
use crate::app::services::point_decoder::FieldCursor;

/// Every record's fields as strings
fn collect_records<C: FieldCursor>(cursor: &mut C) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    while cursor.next_record().unwrap() {
        let mut fields = Vec::new();
        while let Some(field) = cursor.next_field() {
            fields.push(String::from_utf8_lossy(field).into_owned());
        }
        cursor.finish_record();
        records.push(fields);
    }
    records
}

const MESSY: &str = "  1.0 2.0\t3\r\n\n   \n\t4 5 6\n7 8";

fn expected_messy() -> Vec<Vec<String>> {
    vec![
        vec!["1.0".into(), "2.0".into(), "3".into()],
        vec!["4".into(), "5".into(), "6".into()],
        vec!["7".into(), "8".into()],
    ]
}

#[test]
fn test_line_cursor_skips_blank_lines() {
    let mut cursor = LineCursor::new(Cursor::new(MESSY.as_bytes()));
    assert_eq!(collect_records(&mut cursor), expected_messy());
}

#[test]
fn test_mapped_cursor_skips_blank_lines() {
    let mut cursor = MappedCursor::new(MESSY.as_bytes(), 0);
    assert_eq!(collect_records(&mut cursor), expected_messy());
    assert_eq!(cursor.consumed(), MESSY.len());
}

#[test]
fn test_field_is_none_at_end_of_line() {
    let mut cursor = MappedCursor::new(b"1 2\n3 4\n", 0);
    assert!(cursor.next_record().unwrap());
    assert_eq!(cursor.next_field(), Some(&b"1"[..]));
    assert_eq!(cursor.next_field(), Some(&b"2"[..]));
    assert_eq!(cursor.next_field(), None);
    assert_eq!(cursor.next_field(), None);
    cursor.finish_record();
    assert_eq!(cursor.consumed(), 4);
}

#[test]
fn test_finish_record_skips_unread_fields() {
    let text = "1 2 3 4\n5 6\n";
    let mut line = LineCursor::new(Cursor::new(text.as_bytes()));
    let mut mapped = MappedCursor::new(text.as_bytes(), 0);

    for cursor in [&mut line as &mut dyn FieldCursor, &mut mapped] {
        assert!(cursor.next_record().unwrap());
        assert_eq!(cursor.next_field(), Some(&b"1"[..]));
        cursor.finish_record();
        assert!(cursor.next_record().unwrap());
        assert_eq!(cursor.next_field(), Some(&b"5"[..]));
        cursor.finish_record();
        assert!(!cursor.next_record().unwrap());
    }
}

#[test]
fn test_mapped_cursor_starts_at_offset() {
    let text = "# header\n1 2\n";
    let mut cursor = MappedCursor::new(text.as_bytes(), 9);
    assert_eq!(cursor.consumed(), 9);
    assert!(cursor.next_record().unwrap());
    assert_eq!(cursor.next_field(), Some(&b"1"[..]));
}

#[test]
fn test_mapped_cursor_clamps_offset() {
    let mut cursor = MappedCursor::new(b"1 2", 100);
    assert_eq!(cursor.consumed(), 3);
    assert!(!cursor.next_record().unwrap());
    cursor.finish_record();
    assert_eq!(cursor.consumed(), 3);
}

#[test]
fn test_empty_input_has_no_records() {
    let mut line = LineCursor::new(Cursor::new(&b""[..]));
    assert!(!line.next_record().unwrap());

    let mut mapped = MappedCursor::new(b"\n\n  \n", 0);
    assert!(!mapped.next_record().unwrap());
    assert_eq!(mapped.consumed(), 5);
}
