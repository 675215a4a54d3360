//! Coordinate storage for mesh nodes and face centers.
//!
//! Coordinates are stored as two parallel arrays: longitude/latitude in
//! degrees for spherical grids, or planar `x`/`y` otherwise. The 3-D unit
//! sphere embedding of a spherical coordinate is derived on demand with
//! [`lonlat_to_xyz`].

use crate::mesh_error::TopologyError;

/// Parallel `x`/`y` (or longitude/latitude) coordinate arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coordinates {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Coordinates {
    /// Pair `x` and `y`, checking lengths and finiteness.
    ///
    /// `what` names the coordinate set in errors (e.g. `"node coordinates"`).
    pub fn try_new(what: &'static str, x: Vec<f64>, y: Vec<f64>) -> Result<Self, TopologyError> {
        if x.len() != y.len() {
            return Err(TopologyError::LengthMismatch {
                what,
                expected: x.len(),
                found: y.len(),
            });
        }
        if let Some(index) = x
            .iter()
            .zip(&y)
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(TopologyError::NonFiniteCoordinate { what, index });
        }
        Ok(Self { x, y })
    }

    /// Number of coordinate pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if no coordinates are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Longitudes (degrees) or planar `x`.
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Latitudes (degrees) or planar `y`.
    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Coordinate pair at `i`.
    #[inline]
    pub fn get(&self, i: usize) -> [f64; 2] {
        [self.x[i], self.y[i]]
    }

    /// Iterate coordinate pairs in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y])
    }
}

/// Hashable bit pattern of a coordinate pair, with `-0.0` folded into `0.0`.
#[inline]
pub fn coordinate_key(x: f64, y: f64) -> (u64, u64) {
    let bits = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
    (bits(x), bits(y))
}

/// Convert an angle array from radians to degrees.
pub fn radians_to_degrees(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.to_degrees()).collect()
}

/// Unit-sphere Cartesian position of a longitude/latitude pair in degrees.
#[inline]
pub fn lonlat_to_xyz(lon_deg: f64, lat_deg: f64) -> [f64; 3] {
    let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
    [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat]
}

/// Longitude in `[0, 360)` and latitude of a Cartesian position, in degrees.
///
/// The position need not be normalized.
pub fn xyz_to_lonlat(p: [f64; 3]) -> [f64; 2] {
    let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
    let lon = p[1].atan2(p[0]).to_degrees().rem_euclid(360.0);
    let lat = (p[2] / r).clamp(-1.0, 1.0).asin().to_degrees();
    [lon, lat]
}
