//! Record and field access shared by both decode sources

use crate::Result;

/// Whitespace-delimited fields grouped into line records
///
/// Implementations yield the same records and fields for the same bytes, so
/// the decoder never needs to know where the bytes come from.
pub trait FieldCursor {
    /// Move to the next non-blank record; `false` once input is exhausted
    fn next_record(&mut self) -> Result<bool>;

    /// Next field of the current record, `None` at the end of the line
    fn next_field(&mut self) -> Option<&[u8]>;

    /// Skip whatever is left of the current record
    fn finish_record(&mut self);
}

/// Whitespace that does not end a record
pub(super) fn is_inline_space(byte: u8) -> bool {
    byte != b'\n' && byte.is_ascii_whitespace()
}

/// Bounds of the first field in `bytes[from..]` that stays on the current
/// line, or `None` when the line ends first
pub(super) fn field_bounds(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let start = from
        + bytes
            .get(from..)?
            .iter()
            .take_while(|byte| is_inline_space(**byte))
            .count();
    match bytes.get(start) {
        None | Some(b'\n') => None,
        Some(_) => {
            let len = bytes[start..]
                .iter()
                .take_while(|byte| !byte.is_ascii_whitespace())
                .count();
            Some((start, start + len))
        }
    }
}
