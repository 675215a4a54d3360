//! Data module: node and face-center coordinate arrays
#![warn(missing_docs)]

pub mod coordinates;

/// Paired x/y (or longitude/latitude) arrays.
pub use coordinates::Coordinates;
pub use coordinates::{lonlat_to_xyz, radians_to_degrees, xyz_to_lonlat};
