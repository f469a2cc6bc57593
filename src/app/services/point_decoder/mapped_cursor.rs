//! Cursor over a mapped byte region

use super::cursor::{FieldCursor, field_bounds};
use crate::Result;

/// Walks the data section of a mapped file in place
///
/// The position never moves past the end of the region.
#[derive(Debug, Clone)]
pub struct MappedCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> MappedCursor<'a> {
    /// Start at `offset` (the first data line); offsets past the end are
    /// clamped
    pub fn new(bytes: &'a [u8], offset: u64) -> Self {
        let pos = usize::try_from(offset).map_or(bytes.len(), |offset| offset.min(bytes.len()));
        Self { bytes, pos }
    }

    /// Bytes behind the cursor: the header plus every record visited
    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl FieldCursor for MappedCursor<'_> {
    fn next_record(&mut self) -> Result<bool> {
        self.pos += self
            .remaining()
            .iter()
            .take_while(|byte| byte.is_ascii_whitespace())
            .count();
        Ok(self.pos < self.bytes.len())
    }

    fn next_field(&mut self) -> Option<&[u8]> {
        let (start, end) = field_bounds(self.bytes, self.pos)?;
        self.pos = end;
        Some(&self.bytes[start..end])
    }

    fn finish_record(&mut self) {
        self.pos = match self.remaining().iter().position(|byte| *byte == b'\n') {
            Some(newline) => self.pos + newline + 1,
            None => self.bytes.len(),
        };
    }
}
