// Polyline decoder: lazy coordinate iteration over an encoded string.
//
// Two policies share the same accumulator walk:
//   - Decoder (default): lenient. A string that ends inside a value stops
//     iteration and the partial point is dropped, no error is raised.
//     Groups are read per character, so non-ASCII input is not rejected.
//   - StrictDecoder: opt-in. Truncation, characters outside [63, 126] and
//     values wider than 64 bits are reported as DecodeError.
//
// Both borrow the input and keep only a cursor plus two accumulators, so
// dropping an iterator mid-way abandons decoding with no other effect.

use std::iter::FusedIterator;

use thiserror::Error;

use crate::coordinate::Coordinate;

use super::varint::{self, CHAR_OFFSET, CONTINUATION_BIT, PAYLOAD_MASK, VarIntError};

// ---------------------------------------------------------------------------
// Decoder error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input was empty. The only error the lenient decoder produces.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Input ended inside a value or between a latitude and its longitude.
    #[error("truncated polyline: value at byte {offset} is incomplete")]
    Truncated { offset: usize },
    /// Byte outside the polyline alphabet in the value starting at `offset`.
    #[error("invalid polyline character {byte:#04x} in value at byte {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },
    /// Value starting at `offset` does not fit in 64 bits.
    #[error("polyline value at byte {offset} overflows 64 bits")]
    Overflow { offset: usize },
}

impl DecodeError {
    fn empty_input() -> Self {
        Self::InvalidArgument("encoded polyline is empty".to_string())
    }

    fn from_varint(err: VarIntError, offset: usize) -> Self {
        match err {
            VarIntError::Underflow => Self::Truncated { offset },
            VarIntError::Overflow => Self::Overflow { offset },
            VarIntError::InvalidCharacter(byte) => Self::InvalidCharacter { offset, byte },
        }
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// How malformed input is treated after the empty-input check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Stop at the first incomplete point and return what was decoded.
    #[default]
    Lenient,
    /// Fail on truncated or out-of-alphabet input.
    Strict,
}

// ---------------------------------------------------------------------------
// Lenient decoder
// ---------------------------------------------------------------------------

/// Lazy, forward-only coordinate iterator over an encoded polyline.
///
/// Created by [`decode`]. Never fails once constructed: input that ends
/// inside a value simply ends the sequence.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    text: &'a str,
    pos: usize,
    latitude: i64,
    longitude: i64,
    points: u64,
}

impl<'a> Decoder<'a> {
    /// Create a decoder over `text`. Fails only when `text` is empty.
    pub fn new(text: &'a str) -> Result<Self, DecodeError> {
        if text.is_empty() {
            return Err(DecodeError::empty_input());
        }
        Ok(Self {
            text,
            pos: 0,
            latitude: 0,
            longitude: 0,
            points: 0,
        })
    }

    /// Byte offset of the read cursor (always on a character boundary).
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of coordinates produced so far.
    pub fn points_decoded(&self) -> u64 {
        self.points
    }

    /// Read one value starting at the cursor, which must be in bounds.
    ///
    /// Works on characters, not bytes: a non-ASCII character is a single
    /// group whose value is its scalar value minus 63.
    ///
    /// Returns the accumulated bits and whether the last group read still
    /// had its continuation bit set (only possible when input ran out).
    fn read_value(&mut self) -> (u64, bool) {
        let mut sum: u64 = 0;
        let mut shift: u32 = 0;
        let mut pending = false;
        while let Some(c) = self.text[self.pos..].chars().next() {
            let group = i64::from(u32::from(c)) - i64::from(CHAR_OFFSET);
            self.pos += c.len_utf8();
            if shift < 64 {
                sum |= (group as u64 & PAYLOAD_MASK) << shift;
            }
            shift = shift.saturating_add(5);
            pending = group >= CONTINUATION_BIT as i64;
            if !pending || self.pos >= self.text.len() {
                break;
            }
        }
        (sum, pending)
    }
}

impl Iterator for Decoder<'_> {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        if self.pos >= self.text.len() {
            return None;
        }

        let lat = self.read_value().0;
        if self.pos >= self.text.len() {
            log::debug!(
                "polyline ends after a latitude at byte {}; dropping partial point",
                self.pos
            );
            return None;
        }

        let (lng, pending) = self.read_value();
        if pending {
            log::debug!(
                "polyline ends inside a longitude at byte {}; dropping partial point",
                self.pos
            );
            return None;
        }

        self.latitude = self.latitude.wrapping_add(varint::unzigzag(lat));
        self.longitude = self.longitude.wrapping_add(varint::unzigzag(lng));
        self.points += 1;
        Some(Coordinate::from_scaled(self.latitude, self.longitude))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every point needs at least two characters.
        (0, Some((self.text.len() - self.pos) / 2))
    }
}

impl FusedIterator for Decoder<'_> {}

// ---------------------------------------------------------------------------
// Strict decoder
// ---------------------------------------------------------------------------

/// Coordinate iterator that reports malformed input instead of truncating.
///
/// Yields `Err` at most once; the iterator is exhausted afterwards.
#[derive(Debug, Clone)]
pub struct StrictDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    latitude: i64,
    longitude: i64,
    failed: bool,
}

impl<'a> StrictDecoder<'a> {
    /// Create a strict decoder over `text`. Fails when `text` is empty.
    pub fn new(text: &'a str) -> Result<Self, DecodeError> {
        if text.is_empty() {
            return Err(DecodeError::empty_input());
        }
        Ok(Self {
            data: text.as_bytes(),
            pos: 0,
            latitude: 0,
            longitude: 0,
            failed: false,
        })
    }

    /// Byte offset of the read cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn read_delta(&mut self) -> Result<i64, DecodeError> {
        let (delta, len) = varint::read_signed(&self.data[self.pos..])
            .map_err(|e| DecodeError::from_varint(e, self.pos))?;
        self.pos += len;
        Ok(delta)
    }

    fn read_point(&mut self) -> Result<Coordinate, DecodeError> {
        let lat = self.read_delta()?;
        let lng = self.read_delta()?;
        self.latitude = self.latitude.wrapping_add(lat);
        self.longitude = self.longitude.wrapping_add(lng);
        Ok(Coordinate::from_scaled(self.latitude, self.longitude))
    }
}

impl Iterator for StrictDecoder<'_> {
    type Item = Result<Coordinate, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.data.len() {
            return None;
        }
        let point = self.read_point();
        if point.is_err() {
            self.failed = true;
        }
        Some(point)
    }
}

impl FusedIterator for StrictDecoder<'_> {}

// ---------------------------------------------------------------------------
// Convenience functions
// ---------------------------------------------------------------------------

/// Lazily decode an encoded polyline.
///
/// Fails with [`DecodeError::InvalidArgument`] on empty input. Malformed
/// input never fails: decoding stops before the first incomplete point.
///
/// ```
/// let points: Vec<_> = polyline_codec::decode("_p~iF~ps|U_ulLnnqC")
///     .unwrap()
///     .collect();
/// assert_eq!(points.len(), 2);
/// ```
pub fn decode(text: &str) -> Result<Decoder<'_>, DecodeError> {
    Decoder::new(text)
}

/// Decode an encoded polyline, failing on any malformed input.
pub fn decode_strict(text: &str) -> Result<Vec<Coordinate>, DecodeError> {
    StrictDecoder::new(text)?.collect()
}

/// Decode an encoded polyline with an explicit policy.
pub fn decode_with(text: &str, mode: DecodeMode) -> Result<Vec<Coordinate>, DecodeError> {
    match mode {
        DecodeMode::Lenient => Ok(decode(text)?.collect()),
        DecodeMode::Strict => decode_strict(text),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
