#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-ugrid
//!
//! mesh-ugrid normalizes unstructured grids stored in different conventions
//! (UGRID, MPAS primal and dual meshes, SCRIP corner lists) into one canonical
//! topology, and computes the area of every face on the sphere or in the plane
//! with selectable quadrature.
//!
//! ## Features
//! - One fill-padded, zero-based connectivity layout for every convention
//! - Construction-time invariant checks with typed errors
//! - Triangular (symmetric) and Gaussian (collapsed Gauss–Legendre) rules
//! - Per-grid memoized face areas, shared through `Arc<Grid>`
//! - Optional `rayon` parallelism over faces
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mesh-ugrid = "0.1"
//! # Optional features:
//! # features = ["rayon"]
//! ```
//!
//! ```
//! use mesh_ugrid::prelude::*;
//!
//! # fn main() -> Result<(), GridError> {
//! let grid = Grid::from_parts(TopologyParts {
//!     node_x: vec![0.0, 90.0, 0.0],
//!     node_y: vec![0.0, 0.0, 90.0],
//!     face_nodes: Connectivity::try_new(vec![0, 1, 2], 3)?,
//!     ..Default::default()
//! })?
//! .into_shared();
//! let config = FaceAreaConfig::spherical(QuadratureConfig::new(QuadratureRule::Gaussian, 10)?);
//! let octant = grid.total_face_area(config)?;
//! assert!((octant - std::f64::consts::FRAC_PI_2).abs() < 1e-6);
//! # Ok(())
//! # }
//! ```
//!
//! ## Determinism
//!
//! Face areas do not depend on whether the `rayon` feature is enabled: every
//! face is integrated independently and written to its own slot.

pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod quadrature;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::coordinates::{Coordinates, lonlat_to_xyz};
    pub use crate::geometry::area::{
        CoordinateSystem, FaceAreaConfig, FaceAreas, compute_face_areas,
    };
    pub use crate::io::{GridOptions, GridReader, SourceDataset, SourceFormat, SourceVariable, open_grid};
    pub use crate::mesh_error::{ConfigError, FormatError, GridError, TopologyError};
    pub use crate::quadrature::{QuadratureConfig, QuadratureRule};
    pub use crate::topology::cache::InvalidateCache;
    pub use crate::topology::connectivity::{Connectivity, INT_FILL_VALUE};
    pub use crate::topology::grid::{Grid, GridAttributes, GridTopology, TopologyParts};
    pub use crate::topology::validation::{GridValidationOptions, ValidationHandling, validate_grid};
}
