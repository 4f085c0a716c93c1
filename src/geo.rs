//! Fixed-point coordinates for the compressed node-based graph

/// Fixed-point factor: 1e-6 degrees per unit, matching the cnbg file format.
pub const COORDINATE_PRECISION: f64 = 1e6;

/// A (longitude, latitude) pair in fixed-point representation.
///
/// Immutable once loaded; indexed by `NodeID` in the coordinate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub lon: i32,
    pub lat: i32,
}

impl Coordinate {
    pub fn new(lon: i32, lat: i32) -> Self {
        Self { lon, lat }
    }

    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: (lon_deg * COORDINATE_PRECISION).round() as i32,
            lat: (lat_deg * COORDINATE_PRECISION).round() as i32,
        }
    }

    pub fn lon_degrees(&self) -> f64 {
        f64::from(self.lon) / COORDINATE_PRECISION
    }

    pub fn lat_degrees(&self) -> f64 {
        f64::from(self.lat) / COORDINATE_PRECISION
    }
}
