//! Scan store
//!
//! Reads a scan file into its header, phase catalog and per-pixel arrays:
//! classify the file, parse the header, size the grid, decode the point
//! data, then check that every pixel was filled. Nothing is kept from a
//! read that fails part way.

use crate::app::models::{FileType, GridType, Phase, PointData, ScanHeader};
use crate::app::services::ang_header::{AngHeaderParser, ParsedHeader};
use crate::app::services::grid::GridGeometry;
use crate::app::services::mapped_file::MappedFile;
use crate::app::services::point_decoder::{LineCursor, MappedCursor, decode_points};
use crate::config::{DecodeStrategy, ReaderConfig};
use crate::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Summary of the last successful read
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ReadStats {
    pub strategy: DecodeStrategy,
    pub column_count: usize,
    pub data_offset: u64,
    pub processing_time_ms: u128,
}

/// An ang scan held fully in memory
#[derive(Debug, Clone, Default)]
pub struct ScanStore {
    header: ScanHeader,
    data: PointData,
    stats: ReadStats,
}

impl ScanStore {
    /// Empty store; call [`ScanStore::read`] to fill it
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a scan with the default configuration
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.read(path)?;
        Ok(store)
    }

    /// Whether `path` names a format this store can read
    pub fn can_read(path: impl AsRef<Path>) -> bool {
        FileType::from_path(path).is_readable()
    }

    /// Replace the contents of the store with the scan at `path`
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.read_with_config(path, &ReaderConfig::default())
    }

    /// Like [`ScanStore::read`] with an explicit reader configuration
    pub fn read_with_config(&mut self, path: impl AsRef<Path>, config: &ReaderConfig) -> Result<()> {
        let path = path.as_ref();
        config.validate()?;

        match FileType::from_path(path) {
            FileType::Ang => {}
            file_type => {
                return Err(Error::UnsupportedFileType {
                    path: path.to_path_buf(),
                    file_type,
                });
            }
        }

        let loaded = read_ang(path, config)?;
        *self = loaded;
        Ok(())
    }

    pub fn header(&self) -> &ScanHeader {
        &self.header
    }

    pub fn phases(&self) -> &[Phase] {
        &self.header.phases
    }

    pub fn grid_type(&self) -> GridType {
        self.header.grid_type
    }

    pub fn pixels_per_micron(&self) -> f32 {
        self.header.pixels_per_micron
    }

    /// Pattern centre as `[x*, y*, z*]`
    pub fn pattern_center(&self) -> [f32; 3] {
        [self.header.x_star, self.header.y_star, self.header.z_star]
    }

    pub fn working_distance(&self) -> f32 {
        self.header.working_distance
    }

    pub fn x_step(&self) -> f32 {
        self.header.x_step
    }

    pub fn y_step(&self) -> f32 {
        self.header.y_step
    }

    pub fn odd_columns(&self) -> usize {
        self.header.odd_columns
    }

    pub fn even_columns(&self) -> usize {
        self.header.even_columns
    }

    pub fn rows(&self) -> usize {
        self.header.rows
    }

    pub fn operator_name(&self) -> &str {
        &self.header.operator_name
    }

    pub fn sample_id(&self) -> &str {
        &self.header.sample_id
    }

    pub fn scan_id(&self) -> &str {
        &self.header.scan_id
    }

    /// Number of pixels in the grid
    pub fn total_points(&self) -> usize {
        self.data.len()
    }

    pub fn point_data(&self) -> &PointData {
        &self.data
    }

    /// Euler angle triples, three values per pixel
    pub fn euler(&self) -> &[f32] {
        &self.data.euler
    }

    pub fn x(&self) -> &[f32] {
        &self.data.x
    }

    pub fn y(&self) -> &[f32] {
        &self.data.y
    }

    pub fn image_quality(&self) -> &[f32] {
        &self.data.image_quality
    }

    pub fn confidence_index(&self) -> &[f32] {
        &self.data.confidence_index
    }

    pub fn phase(&self) -> &[u32] {
        &self.data.phase
    }

    /// Secondary electron signal, if the file has the column
    pub fn sem(&self) -> Option<&[f32]> {
        self.data.sem.as_deref()
    }

    /// Pattern fit, if the file has the column
    pub fn fit(&self) -> Option<&[f32]> {
        self.data.fit.as_deref()
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }
}

fn read_ang(path: &Path, config: &ReaderConfig) -> Result<ScanStore> {
    let start_time = Instant::now();
    info!("Reading {} ({} decoder)", path.display(), config.strategy);

    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open {}", path.display()), e))?;
    let mut reader = BufReader::new(file);
    let ParsedHeader {
        header,
        column_count,
        data_offset,
    } = AngHeaderParser::new().parse(&mut reader)?;

    let geometry = GridGeometry::from_header(&header);
    let expected = geometry.total_points()?;
    debug!(
        "{} grid of {}/{} columns x {} rows: {} points, {} values per point",
        geometry.grid_type, geometry.odd_columns, geometry.even_columns, geometry.rows, expected, column_count
    );

    let data_bytes = reader
        .get_ref()
        .metadata()
        .map_err(|e| Error::io(format!("failed to stat {}", path.display()), e))?
        .len()
        .saturating_sub(data_offset);
    let capacity = max_records(data_bytes, column_count);
    if expected > capacity {
        return Err(Error::DataSectionTooShort {
            expected,
            capacity,
            bytes: data_bytes,
        });
    }

    let mut data = PointData::allocate(expected, column_count)?;
    let parsed = match config.strategy {
        DecodeStrategy::MemoryMapped => {
            drop(reader);
            let mapped = MappedFile::open_read_only(path, config.access_hint)?;
            let mut cursor = MappedCursor::new(mapped.data(), data_offset);
            let parsed = decode_points(&mut cursor, &geometry, &mut data, column_count)?;
            debug!("Consumed {} of {} mapped bytes", cursor.consumed(), mapped.size());
            parsed
        }
        DecodeStrategy::Buffered => {
            let mut cursor = LineCursor::new(reader);
            decode_points(&mut cursor, &geometry, &mut data, column_count)?
        }
    };

    if parsed != expected {
        return Err(Error::TruncatedData { parsed, expected });
    }

    let stats = ReadStats {
        strategy: config.strategy,
        column_count,
        data_offset,
        processing_time_ms: start_time.elapsed().as_millis(),
    };
    info!(
        "Read {} points and {} phase(s) from {} in {}ms",
        parsed,
        header.phases.len(),
        path.display(),
        stats.processing_time_ms
    );

    Ok(ScanStore {
        header,
        data,
        stats,
    })
}

/// Upper bound on the records `bytes` of point data can hold
///
/// Every record has `column_count` fields of at least one byte, each followed
/// by a separator or line break except possibly the last one in the file.
fn max_records(bytes: u64, column_count: usize) -> usize {
    let min_record = (column_count.max(1) as u64).saturating_mul(2);
    usize::try_from(bytes.saturating_add(1) / min_record).unwrap_or(usize::MAX)
}
