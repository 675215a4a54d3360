//! Geometry for mesh-ugrid.
//!
//! This module provides the face-area quadrature engine and the triangle
//! metrics it samples.

pub mod area;
pub mod metrics;

pub use area::{CoordinateSystem, FaceAreaConfig, FaceAreas, Integrand, compute_face_areas};
