//! Face-area quadrature engine.
//!
//! Each face is fan-triangulated from its first vertex into
//! `(v0, vi, vi+1)` for `i = 1..k-2`. Every fan triangle is integrated with
//! the selected [`TriangleRule`]. Cartesian mode integrates flat triangles:
//! in the `z = 0` plane for planar grids, and as chords of the 3-D embedding
//! for spherical grids. Spherical mode samples the Jacobian of the radial
//! projection onto the sphere at each quadrature point. Triangle
//! contributions are signed, so non-convex but simple faces sum to their true
//! area; the face total is the absolute value of the sum, scaled by `r²` on a
//! sphere of radius `r`.
//!
//! Faces are independent, so with the `rayon` feature the map over faces runs
//! in parallel. Results do not depend on the execution mode.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::metrics::{
    chord_triangle_jacobian, planar_triangle_jacobian, spherical_triangle_jacobian,
};
use crate::mesh_error::{ConfigError, GridError};
use crate::quadrature::{QuadratureConfig, TriangleRule};
use crate::topology::grid::GridTopology;

/// Coordinate system the engine integrates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystem {
    /// Planar `x`/`y` coordinates.
    Cartesian,
    /// Longitude/latitude on a sphere.
    Spherical,
}

impl CoordinateSystem {
    /// Lower-case configuration name.
    pub fn name(self) -> &'static str {
        match self {
            CoordinateSystem::Cartesian => "cartesian",
            CoordinateSystem::Spherical => "spherical",
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordinateSystem {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cartesian" => Ok(CoordinateSystem::Cartesian),
            "spherical" => Ok(CoordinateSystem::Spherical),
            _ => Err(ConfigError::UnknownCoordinateSystem(s.to_string())),
        }
    }
}

/// Everything a face-area request is keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceAreaConfig {
    #[serde(flatten)]
    pub quadrature: QuadratureConfig,
    pub coordinate_system: CoordinateSystem,
}

impl Default for FaceAreaConfig {
    fn default() -> Self {
        Self::spherical(QuadratureConfig::default())
    }
}

impl FaceAreaConfig {
    pub fn spherical(quadrature: QuadratureConfig) -> Self {
        Self {
            quadrature,
            coordinate_system: CoordinateSystem::Spherical,
        }
    }

    pub fn cartesian(quadrature: QuadratureConfig) -> Self {
        Self {
            quadrature,
            coordinate_system: CoordinateSystem::Cartesian,
        }
    }

    /// Default quadrature in the coordinate system the grid declares.
    pub fn for_topology(topology: &GridTopology) -> Self {
        if topology.on_sphere() {
            Self::spherical(QuadratureConfig::default())
        } else {
            Self::cartesian(QuadratureConfig::default())
        }
    }
}

/// Triangle integrand the engine evaluates for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integrand {
    /// Signed `z` component of the edge cross product, for planar grids.
    Planar,
    /// Flat triangles between points of the 3-D sphere embedding.
    Chord,
    /// Great-circle triangles through the radial projection.
    Spherical,
}

impl Integrand {
    /// Integrand for `requested` on a grid with the given sphere flag.
    ///
    /// # Errors
    /// [`ConfigError::CoordinateSystemMismatch`] for spherical integration on
    /// a grid that does not lie on a sphere.
    pub fn select(requested: CoordinateSystem, on_sphere: bool) -> Result<Self, ConfigError> {
        match (requested, on_sphere) {
            (CoordinateSystem::Cartesian, false) => Ok(Integrand::Planar),
            (CoordinateSystem::Cartesian, true) => Ok(Integrand::Chord),
            (CoordinateSystem::Spherical, true) => Ok(Integrand::Spherical),
            (CoordinateSystem::Spherical, false) => Err(ConfigError::CoordinateSystemMismatch {
                requested: requested.name(),
                actual: "not flagged as lying on a sphere",
            }),
        }
    }
}

/// Per-face areas and their sum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceAreas {
    pub areas: Vec<f64>,
    pub total: f64,
}

impl FaceAreas {
    #[inline]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// Compute the area of every face of `topology`.
///
/// # Errors
/// [`ConfigError::UnsupportedQuadrature`] for an unknown `(rule, order)`, and
/// [`ConfigError::CoordinateSystemMismatch`] for spherical integration on a
/// planar grid.
pub fn compute_face_areas(
    topology: &GridTopology,
    config: FaceAreaConfig,
) -> Result<FaceAreas, GridError> {
    let rule = config.quadrature.table()?;
    let integrand = Integrand::select(config.coordinate_system, topology.on_sphere())?;

    let attributes = topology.attributes();
    let scale = if attributes.on_sphere {
        attributes.sphere_radius * attributes.sphere_radius
    } else {
        1.0
    };
    log::debug!(
        "computing {} face areas ({} order {}, {}, {} samples per triangle)",
        topology.n_faces(),
        rule.rule(),
        rule.order(),
        config.coordinate_system,
        rule.samples().len()
    );

    let positions = topology.node_xyz();
    let area_of = |f: usize| {
        scale * face_area(&positions, topology.face(f), rule, integrand)
    };

    #[cfg(feature = "rayon")]
    let areas: Vec<f64> = (0..topology.n_faces()).into_par_iter().map(area_of).collect();
    #[cfg(not(feature = "rayon"))]
    let areas: Vec<f64> = (0..topology.n_faces()).map(area_of).collect();

    let total = areas.iter().sum();
    Ok(FaceAreas { areas, total })
}

/// Unscaled area of one face given node positions and its vertex indices.
///
/// `positions` are unit-sphere points for [`Integrand::Chord`] and
/// [`Integrand::Spherical`], and `z = 0` points for [`Integrand::Planar`].
pub fn face_area(
    positions: &[[f64; 3]],
    face: &[usize],
    rule: &TriangleRule,
    integrand: Integrand,
) -> f64 {
    let Some((&pivot, rest)) = face.split_first() else {
        return 0.0;
    };
    let v0 = positions[pivot];
    let signed: f64 = rest
        .windows(2)
        .map(|pair| {
            triangle_area(
                v0,
                positions[pair[0]],
                positions[pair[1]],
                rule,
                integrand,
            )
        })
        .sum();
    signed.abs()
}

/// Signed quadrature area of the triangle `[a, b, c]`.
pub fn triangle_area(
    a: [f64; 3],
    b: [f64; 3],
    c: [f64; 3],
    rule: &TriangleRule,
    integrand: Integrand,
) -> f64 {
    let flat = |jacobian: f64| -> f64 { rule.samples().iter().map(|&(_, w)| w * jacobian).sum() };
    match integrand {
        Integrand::Planar => flat(planar_triangle_jacobian(a, b, c)),
        Integrand::Chord => flat(chord_triangle_jacobian(a, b, c)),
        Integrand::Spherical => rule
            .samples()
            .iter()
            .map(|&(lambda, w)| w * spherical_triangle_jacobian(a, b, c, lambda))
            .sum(),
    }
}
