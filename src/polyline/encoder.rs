// Polyline encoder.
//
// Encoder keeps the two per-axis accumulators explicitly:
//   - Each pushed coordinate is scaled to 1e-5 degree units
//   - The delta against the previous point of the same axis is zig-zagged
//     and written as 5-bit groups (latitude first, then longitude)

use crate::coordinate::Coordinate;

use super::varint;

/// Typical encoded size of one point, used for capacity hints.
const AVG_POINT_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Incremental polyline encoder.
///
/// # Example
/// ```
/// use polyline_codec::polyline::Encoder;
/// use polyline_codec::Coordinate;
///
/// let mut enc = Encoder::new();
/// enc.push(Coordinate::new(38.5, -120.2));
/// enc.push(Coordinate::new(40.7, -120.95));
/// assert_eq!(enc.finish(), "_p~iF~ps|U_ulLnnqC");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    output: String,
    latitude_accumulator: i64,
    longitude_accumulator: i64,
    points: u64,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with room for roughly `points` coordinates.
    pub fn with_capacity(points: usize) -> Self {
        Self {
            output: String::with_capacity(points.saturating_mul(AVG_POINT_LEN)),
            ..Self::default()
        }
    }

    /// Append one coordinate.
    pub fn push(&mut self, coordinate: Coordinate) {
        let (lat, lng) = coordinate.scaled();
        // Wrapping keeps saturated inputs reversible by the decoder.
        varint::encode_signed(lat.wrapping_sub(self.latitude_accumulator), &mut self.output);
        varint::encode_signed(lng.wrapping_sub(self.longitude_accumulator), &mut self.output);
        self.latitude_accumulator = lat;
        self.longitude_accumulator = lng;
        self.points += 1;
    }

    /// Number of coordinates pushed so far.
    pub fn points(&self) -> u64 {
        self.points
    }

    /// Encoded text produced so far.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consume the encoder and return the encoded polyline.
    pub fn finish(self) -> String {
        log::trace!(
            "encoded {} points into {} chars",
            self.points,
            self.output.len()
        );
        self.output
    }
}

impl<C: Into<Coordinate>> Extend<C> for Encoder {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        for c in iter {
            self.push(c.into());
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience function
// ---------------------------------------------------------------------------

/// Encode a whole coordinate sequence. Empty input yields an empty string.
///
/// Accepts anything convertible to [`Coordinate`], including `(lat, lng)`
/// tuples.
pub fn encode<I, C>(coordinates: I) -> String
where
    I: IntoIterator<Item = C>,
    C: Into<Coordinate>,
{
    let iter = coordinates.into_iter();
    let mut encoder = Encoder::with_capacity(iter.size_hint().0);
    encoder.extend(iter);
    encoder.finish()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
