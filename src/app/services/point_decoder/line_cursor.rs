//! Buffered line-by-line cursor

use super::cursor::{FieldCursor, field_bounds};
use crate::{Error, Result};
use std::io::BufRead;

/// Reads one line per record from a buffered reader
pub struct LineCursor<R: BufRead> {
    reader: R,
    line: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> LineCursor<R> {
    /// Reader must already be positioned on the first data line
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            pos: 0,
        }
    }
}

impl<R: BufRead> FieldCursor for LineCursor<R> {
    fn next_record(&mut self) -> Result<bool> {
        loop {
            self.line.clear();
            self.pos = 0;
            let read = self
                .reader
                .read_until(b'\n', &mut self.line)
                .map_err(|e| Error::io("failed to read ang data line", e))?;
            if read == 0 {
                return Ok(false);
            }
            if self.line.iter().any(|byte| !byte.is_ascii_whitespace()) {
                return Ok(true);
            }
        }
    }

    fn next_field(&mut self) -> Option<&[u8]> {
        let (start, end) = field_bounds(&self.line, self.pos)?;
        self.pos = end;
        Some(&self.line[start..end])
    }

    fn finish_record(&mut self) {
        self.pos = self.line.len();
    }
}
