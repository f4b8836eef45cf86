// Geographic coordinate type and fixed-point scaling.
//
// Encoded polylines store every component as an integer number of
// 1e-5 degree units. `Coordinate` keeps the floating-point form; the
// scaling helpers convert between the two.

/// Number of fixed-point units per degree (five decimal places).
pub const PRECISION: f64 = 1e5;

/// A latitude/longitude pair in degrees.
///
/// No range validation is applied: values outside [-90, 90] / [-180, 180]
/// pass through the codec like any other finite number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate from fixed-point `(latitude, longitude)` units.
    #[inline]
    pub fn from_scaled(latitude: i64, longitude: i64) -> Self {
        Self {
            latitude: latitude as f64 / PRECISION,
            longitude: longitude as f64 / PRECISION,
        }
    }

    /// Fixed-point `(latitude, longitude)` units, rounded half away from zero.
    #[inline]
    pub fn scaled(&self) -> (i64, i64) {
        (scale(self.latitude), scale(self.longitude))
    }

    /// True if both components are within `tolerance` degrees of `other`.
    pub fn approx_eq(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }
}

/// Scale one component to fixed-point units.
///
/// The float-to-int cast saturates at the `i64` bounds and maps NaN to 0.
#[inline]
pub fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<&(f64, f64)> for Coordinate {
    fn from(&(latitude, longitude): &(f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<&Coordinate> for Coordinate {
    fn from(c: &Coordinate) -> Self {
        *c
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(c: Coordinate) -> Self {
        (c.latitude, c.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
