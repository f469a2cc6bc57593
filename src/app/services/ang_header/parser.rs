//! State-machine parser for the `#` header block of an ang file

use super::fields::{FieldFlag, FieldSet, HeaderField, PhaseField};
use super::phase_accumulator::PhaseAccumulator;
use crate::app::models::{GridType, HklFamily, ScanHeader};
use crate::constants::{HEADER_MARKER, MIN_DATA_COLUMNS, header_keys, phase_keys};
use crate::{Error, Result};
use std::io::{BufRead, Seek, SeekFrom};
use std::str::FromStr;
use tracing::debug;

/// Everything learned from the header block
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHeader {
    pub header: ScanHeader,

    /// Whitespace-delimited values on the first data line
    pub column_count: usize,

    /// Byte offset of the first data line
    pub data_offset: u64,
}

enum HeaderState {
    InHeader,
    InPhaseRecord(PhaseAccumulator),
    HeaderDone,
}

/// Parser for the ang header grammar
#[derive(Debug, Default, Clone, Copy)]
pub struct AngHeaderParser;

impl AngHeaderParser {
    pub fn new() -> Self {
        Self
    }

    /// Consume the header block and leave `reader` positioned on the first
    /// data line
    pub fn parse<R: BufRead + Seek>(&self, reader: &mut R) -> Result<ParsedHeader> {
        let mut header = ScanHeader::default();
        let mut seen = FieldSet::<HeaderField>::new();
        let mut state = HeaderState::InHeader;
        let mut line_number = 0;

        while !matches!(state, HeaderState::HeaderDone) {
            let Some(body) = read_header_line(reader)? else {
                close_phase(state, &mut header)?;
                state = HeaderState::HeaderDone;
                continue;
            };
            line_number += 1;

            let trimmed = body.trim();
            let Some(token) = trimmed.split_whitespace().next() else {
                continue;
            };
            state = apply_line(state, token, trimmed, line_number, &mut header, &mut seen)?;
        }

        if let Some(field) = seen.first_missing() {
            return Err(Error::missing_header_field(field.key()));
        }

        let data_offset = reader
            .stream_position()
            .map_err(|e| Error::io("failed to locate ang data section", e))?;
        let column_count = count_columns(reader)?;
        reader
            .seek(SeekFrom::Start(data_offset))
            .map_err(|e| Error::io("failed to rewind to ang data section", e))?;

        if column_count < MIN_DATA_COLUMNS {
            return Err(Error::TooFewColumns {
                found: column_count,
                required: MIN_DATA_COLUMNS,
            });
        }

        debug!(
            "Parsed ang header: {} grid, {}/{} columns x {} rows, {} phase(s), {} data columns at byte {}",
            header.grid_type,
            header.odd_columns,
            header.even_columns,
            header.rows,
            header.phases.len(),
            column_count,
            data_offset
        );

        Ok(ParsedHeader {
            header,
            column_count,
            data_offset,
        })
    }
}

/// Next header line without its `#`, or `None` once the data section (or end
/// of input) is reached
fn read_header_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let next = reader
        .fill_buf()
        .map_err(|e| Error::io("failed to read ang header", e))?;
    if next.first() != Some(&HEADER_MARKER) {
        return Ok(None);
    }

    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .map_err(|e| Error::io("failed to read ang header", e))?;
    Ok(Some(String::from_utf8_lossy(&line[1..]).into_owned()))
}

fn apply_line(
    state: HeaderState,
    token: &str,
    line: &str,
    line_number: usize,
    header: &mut ScanHeader,
    seen: &mut FieldSet<HeaderField>,
) -> Result<HeaderState> {
    if token == header_keys::PHASE {
        let number = parse_value(token, rest_of_line(line, token))?;
        close_phase(state, header)?;
        let index = header.phases.len();
        return Ok(HeaderState::InPhaseRecord(PhaseAccumulator::new(index, number)));
    }

    if let Some(field) = HeaderField::from_key(token) {
        apply_header_field(header, field, rest_of_line(line, token))?;
        seen.insert(field);
        return Ok(state);
    }

    // Categories may run straight into its first value
    let key = if token.starts_with(phase_keys::CATEGORIES) {
        phase_keys::CATEGORIES
    } else {
        token
    };
    if !is_phase_key(key) {
        return Err(Error::UnknownHeaderKey {
            key: token.to_string(),
            line: line_number,
        });
    }

    match state {
        HeaderState::InPhaseRecord(mut phase) => {
            apply_phase_line(&mut phase, key, rest_of_line(line, key))?;
            Ok(HeaderState::InPhaseRecord(phase))
        }
        _ => Err(Error::PhaseKeyOutsidePhase {
            key: key.to_string(),
            line: line_number,
        }),
    }
}

fn close_phase(state: HeaderState, header: &mut ScanHeader) -> Result<()> {
    if let HeaderState::InPhaseRecord(phase) = state {
        header.phases.push(phase.finish()?);
    }
    Ok(())
}

fn is_phase_key(key: &str) -> bool {
    key == phase_keys::HKL_FAMILIES || PhaseField::from_key(key).is_some()
}

fn rest_of_line<'a>(line: &'a str, key: &str) -> &'a str {
    line.get(key.len()..).unwrap_or_default().trim()
}

fn apply_header_field(header: &mut ScanHeader, field: HeaderField, value: &str) -> Result<()> {
    let key = field.key();
    match field {
        HeaderField::PixelsPerMicron => header.pixels_per_micron = parse_value(key, value)?,
        HeaderField::XStar => header.x_star = parse_value(key, value)?,
        HeaderField::YStar => header.y_star = parse_value(key, value)?,
        HeaderField::ZStar => header.z_star = parse_value(key, value)?,
        HeaderField::WorkingDistance => header.working_distance = parse_value(key, value)?,
        HeaderField::Grid => header.grid_type = GridType::from_token(value),
        HeaderField::XStep => header.x_step = parse_value(key, value)?,
        HeaderField::YStep => header.y_step = parse_value(key, value)?,
        HeaderField::ColumnsOdd => header.odd_columns = parse_value(key, value)?,
        HeaderField::ColumnsEven => header.even_columns = parse_value(key, value)?,
        HeaderField::Rows => header.rows = parse_value(key, value)?,
        HeaderField::Operator => header.operator_name = value.to_string(),
        HeaderField::SampleId => header.sample_id = value.to_string(),
        HeaderField::ScanId => header.scan_id = value.to_string(),
    }
    Ok(())
}

fn apply_phase_line(phase: &mut PhaseAccumulator, key: &str, value: &str) -> Result<()> {
    if key == phase_keys::HKL_FAMILIES {
        phase.push_family(parse_family(value)?);
        return Ok(());
    }

    let Some(field) = PhaseField::from_key(key) else {
        return Ok(());
    };
    match field {
        PhaseField::MaterialName => phase.set_material_name(value.to_string()),
        PhaseField::Formula => phase.set_formula(value.to_string()),
        PhaseField::Info => phase.set_info(value.to_string()),
        PhaseField::Symmetry => phase.set_symmetry(parse_value(key, value)?),
        PhaseField::LatticeConstants => phase.set_lattice_constants(parse_values(key, value)?),
        PhaseField::NumberFamilies => phase.declare_families(parse_value(key, value)?),
        PhaseField::ElasticConstants => phase.push_elastic_row(parse_values(key, value)?)?,
        PhaseField::Categories => {
            let categories = value
                .split_whitespace()
                .map(|token| parse_token(key, value, token))
                .collect::<Result<Vec<u32>>>()?;
            phase.extend_categories(categories);
        }
    }
    Ok(())
}

/// `h k l use intensity show`
fn parse_family(value: &str) -> Result<HklFamily> {
    let key = phase_keys::HKL_FAMILIES;
    let mut tokens = value.split_whitespace();
    let mut next = || tokens.next().ok_or_else(|| Error::invalid_header_value(key, value));

    let h = parse_token(key, value, next()?)?;
    let k = parse_token(key, value, next()?)?;
    let l = parse_token(key, value, next()?)?;
    let use_in_indexing = parse_token::<i32>(key, value, next()?)? != 0;
    let intensity = parse_token(key, value, next()?)?;
    let show_bands = parse_token::<i32>(key, value, next()?)? != 0;

    Ok(HklFamily {
        hkl: [h, k, l],
        use_in_indexing,
        intensity,
        show_bands,
    })
}

fn parse_token<T: FromStr>(key: &str, value: &str, token: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::invalid_header_value(key, value))
}

/// First token of `value`; anything after it is ignored
fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    let token = value
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::invalid_header_value(key, value))?;
    parse_token(key, value, token)
}

/// First `N` tokens of `value`
fn parse_values<T: FromStr + Copy + Default, const N: usize>(
    key: &str,
    value: &str,
) -> Result<[T; N]> {
    let mut values = [T::default(); N];
    let mut tokens = value.split_whitespace();
    for slot in values.iter_mut() {
        let token = tokens
            .next()
            .ok_or_else(|| Error::invalid_header_value(key, value))?;
        *slot = parse_token(key, value, token)?;
    }
    Ok(values)
}

/// Whitespace-delimited values on the next line; the caller rewinds
fn count_columns<R: BufRead>(reader: &mut R) -> Result<usize> {
    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .map_err(|e| Error::io("failed to read first ang data line", e))?;
    Ok(line
        .split(|byte| byte.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
        .count())
}
