//! Point data decoding
//!
//! Every line after the header is one pixel record. The same decoding loop
//! runs over two sources:
//! - [`LineCursor`] - lines pulled through a buffered reader
//! - [`MappedCursor`] - bytes of a memory-mapped file, walked in place
//!
//! Records are scattered into [`PointData`](crate::PointData) at the pixel
//! index produced by the grid traversal.

mod cursor;
mod decoder;
mod line_cursor;
mod mapped_cursor;

#[cfg(test)]
mod tests;

pub use cursor::FieldCursor;
pub use decoder::decode_points;
pub use line_cursor::LineCursor;
pub use mapped_cursor::MappedCursor;
