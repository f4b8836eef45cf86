// Text and file helpers around the polyline codec.
//
// Coordinate text format: one point per line, `latitude,longitude`
// (comma and/or whitespace separated). Blank lines and lines starting
// with `#` are skipped. Polyline text format: one encoded polyline per
// non-empty line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::polyline::decoder::{self, DecodeError, DecodeMode};
use crate::polyline::encoder::Encoder;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `encode_file()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Coordinates read from the input.
    pub points: u64,
    /// Encoded polyline length in bytes (without the trailing newline).
    pub encoded_size: u64,
}

/// Statistics returned by `decode_file()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Polylines read from the input.
    pub polylines: u64,
    /// Total coordinates written.
    pub points: u64,
    /// Total encoded bytes consumed.
    pub encoded_size: u64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for text and file operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Malformed coordinate line.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    /// Polyline decoding error on a given input line.
    #[error("line {line}: decode error: {source}")]
    Decode {
        line: usize,
        #[source]
        source: DecodeError,
    },
}

// ---------------------------------------------------------------------------
// Coordinate text
// ---------------------------------------------------------------------------

/// Parse a single `latitude,longitude` line.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_coordinate(line: &str) -> Result<Option<Coordinate>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut fields = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty());
    let (Some(lat), Some(lng), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format!("expected `latitude,longitude`, got '{line}'"));
    };
    let latitude: f64 = lat
        .parse()
        .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    let longitude: f64 = lng
        .parse()
        .map_err(|e| format!("invalid longitude '{lng}': {e}"))?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(format!("non-finite coordinate '{line}'"));
    }
    Ok(Some(Coordinate::new(latitude, longitude)))
}

/// Read every coordinate from a text source.
pub fn read_coordinates<R: BufRead>(reader: R) -> Result<Vec<Coordinate>, IoError> {
    let mut points = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_coordinate(&line) {
            Ok(Some(c)) => points.push(c),
            Ok(None) => {}
            Err(message) => {
                return Err(IoError::Parse {
                    line: idx + 1,
                    message,
                });
            }
        }
    }
    Ok(points)
}

/// Write coordinates as `latitude,longitude` lines.
pub fn write_coordinates<W: Write>(writer: &mut W, points: &[Coordinate]) -> io::Result<()> {
    for p in points {
        writeln!(writer, "{p}")?;
    }
    Ok(())
}

/// Read every non-empty line of a text source as one polyline.
///
/// Each polyline comes with its 1-based line number in the source, so
/// errors can point at the physical line even when blank lines were
/// skipped. Only surrounding whitespace is stripped; polyline characters
/// never include whitespace.
pub fn read_polylines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, IoError> {
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            out.push((idx + 1, trimmed.to_string()));
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Encode a coordinate text file into a single-line polyline file.
pub fn encode_file(input: &Path, output: &Path) -> Result<EncodeStats, IoError> {
    let reader = BufReader::new(File::open(input)?);
    let points = read_coordinates(reader)?;

    let mut encoder = Encoder::with_capacity(points.len());
    encoder.extend(&points);
    let stats = EncodeStats {
        points: encoder.points(),
        encoded_size: encoder.as_str().len() as u64,
    };
    let encoded = encoder.finish();

    let mut writer = BufWriter::new(File::create(output)?);
    writeln!(writer, "{encoded}")?;
    writer.flush()?;
    Ok(stats)
}

/// Decode a polyline file (one polyline per line) into coordinate text.
///
/// Polylines are separated by a blank line in the output.
pub fn decode_file(input: &Path, output: &Path, mode: DecodeMode) -> Result<DecodeStats, IoError> {
    let reader = BufReader::new(File::open(input)?);
    let polylines = read_polylines(reader)?;

    let mut writer = BufWriter::new(File::create(output)?);
    let mut stats = DecodeStats::default();
    for (i, (line, text)) in polylines.iter().enumerate() {
        let points = decoder::decode_with(text, mode).map_err(|source| IoError::Decode {
            line: *line,
            source,
        })?;
        if i > 0 {
            writeln!(writer)?;
        }
        write_coordinates(&mut writer, &points)?;
        stats.polylines += 1;
        stats.points += points.len() as u64;
        stats.encoded_size += text.len() as u64;
    }
    writer.flush()?;
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
