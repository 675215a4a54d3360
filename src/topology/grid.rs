//! The canonical grid topology and its shared handle.
//!
//! [`GridTopology`] owns the normalized arrays and checks every structural
//! invariant once, at construction. [`Grid`] pairs a topology with the
//! source-convention tag and the lazily populated face-area cache; grids are
//! shared as `Arc<Grid>` between everything that links to them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::coordinates::{Coordinates, lonlat_to_xyz};
use crate::debug_invariants::DebugInvariants;
use crate::geometry::area::{FaceAreaConfig, FaceAreas, compute_face_areas};
use crate::io::SourceFormat;
use crate::mesh_error::{GridError, TopologyError};
use crate::topology::cache::FaceAreaCache;
use crate::topology::connectivity::{Connectivity, INT_FILL_VALUE, valid_len};
use crate::topology::edges::{derive_edges, face_edges_from};

/// Per-grid source-convention metadata.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridAttributes {
    /// Whether node coordinates are longitude/latitude on a sphere.
    pub on_sphere: bool,
    /// Sphere radius; areas of spherical faces scale with its square.
    pub sphere_radius: f64,
}

impl Default for GridAttributes {
    fn default() -> Self {
        Self {
            on_sphere: true,
            sphere_radius: 1.0,
        }
    }
}

impl GridAttributes {
    /// Attributes of a planar grid.
    pub fn planar() -> Self {
        Self {
            on_sphere: false,
            sphere_radius: 1.0,
        }
    }

    /// Attributes of a spherical grid with the given radius.
    pub fn sphere(radius: f64) -> Self {
        Self {
            on_sphere: true,
            sphere_radius: radius,
        }
    }

    /// Area of the whole sphere, `4πr²`, or `None` for planar grids.
    pub fn full_sphere_area(&self) -> Option<f64> {
        self.on_sphere
            .then(|| 4.0 * std::f64::consts::PI * self.sphere_radius * self.sphere_radius)
    }
}

/// Raw parts a normalizer hands over for validation.
#[derive(Clone, Debug, Default)]
pub struct TopologyParts {
    pub node_x: Vec<f64>,
    pub node_y: Vec<f64>,
    pub face_nodes: Connectivity,
    /// Edge→node pairs; derived from `face_nodes` when absent.
    pub edge_nodes: Option<Connectivity>,
    /// Face→edge rows; derived together with `edge_nodes` when absent.
    pub face_edges: Option<Connectivity>,
    pub face_x: Option<Vec<f64>>,
    pub face_y: Option<Vec<f64>>,
    pub attributes: GridAttributes,
}

/// Canonical, immutable mesh topology.
#[derive(Clone, Debug, PartialEq)]
pub struct GridTopology {
    nodes: Coordinates,
    face_centers: Option<Coordinates>,
    face_nodes: Connectivity,
    edge_nodes: Connectivity,
    face_edges: Connectivity,
    nodes_per_face: Vec<usize>,
    attributes: GridAttributes,
}

impl GridTopology {
    /// Validate `parts` and build the topology.
    ///
    /// # Errors
    /// Returns a [`TopologyError`] if any face index is out of range, a face
    /// has fewer than three vertices or repeats a node, padding is followed by
    /// a valid index, the row width is not the widest face's degree, or the
    /// coordinate arrays are inconsistent.
    pub fn try_new(parts: TopologyParts) -> Result<Self, TopologyError> {
        let TopologyParts {
            node_x,
            node_y,
            face_nodes,
            edge_nodes,
            face_edges,
            face_x,
            face_y,
            attributes,
        } = parts;

        if attributes.on_sphere
            && !(attributes.sphere_radius.is_finite() && attributes.sphere_radius > 0.0)
        {
            return Err(TopologyError::InvalidRadius(attributes.sphere_radius));
        }

        let nodes = Coordinates::try_new("node coordinates", node_x, node_y)?;
        check_faces(&face_nodes, nodes.len())?;
        let nodes_per_face = face_nodes.degrees();

        let face_centers = match (face_x, face_y) {
            (Some(x), Some(y)) => {
                let centers = Coordinates::try_new("face center coordinates", x, y)?;
                if centers.len() != face_nodes.n_rows() {
                    return Err(TopologyError::LengthMismatch {
                        what: "face center coordinates",
                        expected: face_nodes.n_rows(),
                        found: centers.len(),
                    });
                }
                Some(centers)
            }
            _ => None,
        };

        let (edge_nodes, face_edges) = match (edge_nodes, face_edges) {
            (Some(edges), Some(face_edges)) => (edges, face_edges),
            (Some(edges), None) => {
                let face_edges = face_edges_from(&face_nodes, &edges)?;
                (edges, face_edges)
            }
            (None, _) => {
                let derived = derive_edges(&face_nodes);
                (derived.edge_nodes, derived.face_edges)
            }
        };
        check_edges(&edge_nodes, nodes.len())?;
        if face_edges.n_rows() != face_nodes.n_rows() {
            return Err(TopologyError::LengthMismatch {
                what: "face-edge connectivity",
                expected: face_nodes.n_rows(),
                found: face_edges.n_rows(),
            });
        }
        check_face_edges(&face_edges, edge_nodes.n_rows())?;

        let topology = Self {
            nodes,
            face_centers,
            face_nodes,
            edge_nodes,
            face_edges,
            nodes_per_face,
            attributes,
        };
        crate::debug_invariants!(topology.validate_invariants(), "GridTopology::try_new");
        Ok(topology)
    }

    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of faces.
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.face_nodes.n_rows()
    }

    /// Number of edges.
    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edge_nodes.n_rows()
    }

    /// Maximum face degree (row width of the face→node table).
    #[inline]
    pub fn max_face_degree(&self) -> usize {
        self.face_nodes.n_cols()
    }

    /// Valid vertex count of every face.
    #[inline]
    pub fn nodes_per_face(&self) -> &[usize] {
        &self.nodes_per_face
    }

    /// Node longitudes/latitudes (degrees) or planar coordinates.
    #[inline]
    pub fn nodes(&self) -> &Coordinates {
        &self.nodes
    }

    /// Face centers, when the source convention provides them.
    #[inline]
    pub fn face_centers(&self) -> Option<&Coordinates> {
        self.face_centers.as_ref()
    }

    /// Face→node connectivity, fill-padded.
    #[inline]
    pub fn face_nodes(&self) -> &Connectivity {
        &self.face_nodes
    }

    /// Edge→node connectivity.
    #[inline]
    pub fn edge_nodes(&self) -> &Connectivity {
        &self.edge_nodes
    }

    /// Face→edge connectivity, fill-padded.
    #[inline]
    pub fn face_edges(&self) -> &Connectivity {
        &self.face_edges
    }

    /// Node indices of face `f`, without padding.
    #[inline]
    pub fn face(&self, f: usize) -> &[usize] {
        self.face_nodes.valid_row(f)
    }

    #[inline]
    pub fn attributes(&self) -> GridAttributes {
        self.attributes
    }

    #[inline]
    pub fn on_sphere(&self) -> bool {
        self.attributes.on_sphere
    }

    /// Node positions on the unit sphere (spherical grids) or in the
    /// `z = 0` plane (planar grids).
    pub fn node_xyz(&self) -> Vec<[f64; 3]> {
        if self.attributes.on_sphere {
            self.nodes
                .iter()
                .map(|[lon, lat]| lonlat_to_xyz(lon, lat))
                .collect()
        } else {
            self.nodes.iter().map(|[x, y]| [x, y, 0.0]).collect()
        }
    }
}

impl DebugInvariants for GridTopology {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "GridTopology");
    }

    fn validate_invariants(&self) -> Result<(), TopologyError> {
        check_faces(&self.face_nodes, self.nodes.len())?;
        check_edges(&self.edge_nodes, self.nodes.len())?;
        check_face_edges(&self.face_edges, self.edge_nodes.n_rows())?;
        if self.nodes_per_face != self.face_nodes.degrees() {
            return Err(TopologyError::LengthMismatch {
                what: "nodes per face",
                expected: self.face_nodes.n_rows(),
                found: self.nodes_per_face.len(),
            });
        }
        Ok(())
    }
}

fn check_faces(face_nodes: &Connectivity, n_nodes: usize) -> Result<(), TopologyError> {
    let mut widest = 0;
    let mut seen = Vec::with_capacity(face_nodes.n_cols());
    for (face, row) in face_nodes.rows().enumerate() {
        let count = valid_len(row);
        if row[count..].iter().any(|&v| v != INT_FILL_VALUE) {
            return Err(TopologyError::InteriorFill { face });
        }
        seen.clear();
        for &node in &row[..count] {
            if node >= n_nodes {
                return Err(TopologyError::FaceNodeOutOfRange {
                    face,
                    node,
                    n_nodes,
                });
            }
            if seen.contains(&node) {
                return Err(TopologyError::RepeatedNode { face, node });
            }
            seen.push(node);
        }
        if count < 3 {
            return Err(TopologyError::DegenerateFace { face, count });
        }
        widest = widest.max(count);
    }
    if face_nodes.n_rows() > 0 && widest != face_nodes.n_cols() {
        return Err(TopologyError::MaxFaceDegreeMismatch {
            declared: face_nodes.n_cols(),
            actual: widest,
        });
    }
    Ok(())
}

fn check_edges(edge_nodes: &Connectivity, n_nodes: usize) -> Result<(), TopologyError> {
    if edge_nodes.n_rows() > 0 && edge_nodes.n_cols() != 2 {
        return Err(TopologyError::RowWidthMismatch {
            what: "edge-node connectivity",
            expected: 2,
            found: edge_nodes.n_cols(),
        });
    }
    for (edge, row) in edge_nodes.rows().enumerate() {
        if let Some(&node) = row.iter().find(|&&n| n != INT_FILL_VALUE && n >= n_nodes) {
            return Err(TopologyError::EdgeNodeOutOfRange {
                edge,
                node,
                n_nodes,
            });
        }
    }
    Ok(())
}

fn check_face_edges(face_edges: &Connectivity, n_edges: usize) -> Result<(), TopologyError> {
    for (face, row) in face_edges.rows().enumerate() {
        let count = valid_len(row);
        if row[count..].iter().any(|&e| e != INT_FILL_VALUE) {
            return Err(TopologyError::InteriorFill { face });
        }
        if let Some(&edge) = row[..count].iter().find(|&&e| e >= n_edges) {
            return Err(TopologyError::FaceEdgeOutOfRange {
                face,
                edge,
                n_edges,
            });
        }
    }
    Ok(())
}

/// A normalized grid: topology, source tag and face-area cache.
#[derive(Debug)]
pub struct Grid {
    topology: GridTopology,
    source: Option<SourceFormat>,
    face_areas: FaceAreaCache,
}

impl Grid {
    /// Wrap a validated topology with an empty cache.
    pub fn new(topology: GridTopology, source: Option<SourceFormat>) -> Self {
        Self {
            topology,
            source,
            face_areas: FaceAreaCache::default(),
        }
    }

    /// Validate `parts` and build a grid with no source tag.
    pub fn from_parts(parts: TopologyParts) -> Result<Self, GridError> {
        Ok(Self::new(GridTopology::try_new(parts)?, None))
    }

    /// Move the grid behind a shared handle.
    pub fn into_shared(self) -> Arc<Grid> {
        Arc::new(self)
    }

    /// `true` if both handles point at the same grid storage.
    pub fn same_grid(a: &Arc<Grid>, b: &Arc<Grid>) -> bool {
        Arc::ptr_eq(a, b)
    }

    #[inline]
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// Convention the grid was normalized from, if any.
    #[inline]
    pub fn source_format(&self) -> Option<SourceFormat> {
        self.source
    }

    /// The face-area cache attached to this grid.
    #[inline]
    pub fn face_area_cache(&self) -> &FaceAreaCache {
        &self.face_areas
    }

    /// Mutable access to the cache, e.g. to invalidate it.
    #[inline]
    pub fn face_area_cache_mut(&mut self) -> &mut FaceAreaCache {
        &mut self.face_areas
    }

    /// Per-face areas for `config`, computed on first request and cached.
    pub fn face_areas(&self, config: FaceAreaConfig) -> Result<Arc<FaceAreas>, GridError> {
        self.face_areas
            .get_or_compute(config, || compute_face_areas(&self.topology, config))
    }

    /// Face areas with the default quadrature in the grid's own coordinate
    /// system.
    pub fn default_face_areas(&self) -> Result<Arc<FaceAreas>, GridError> {
        self.face_areas(FaceAreaConfig::for_topology(&self.topology))
    }

    /// Sum of all face areas for `config`.
    pub fn total_face_area(&self, config: FaceAreaConfig) -> Result<f64, GridError> {
        Ok(self.face_areas(config)?.total)
    }
}

impl Clone for Grid {
    /// Clones the topology; the clone starts with an empty cache.
    fn clone(&self) -> Self {
        Self::new(self.topology.clone(), self.source)
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.topology == other.topology
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: usize = INT_FILL_VALUE;

    fn square_parts() -> TopologyParts {
        TopologyParts {
            node_x: vec![0.0, 1.0, 1.0, 0.0, 2.0],
            node_y: vec![0.0, 0.0, 1.0, 1.0, 0.5],
            face_nodes: Connectivity::try_new(vec![0, 1, 2, 3, 1, 4, 2, F], 4).unwrap(),
            attributes: GridAttributes::planar(),
            ..Default::default()
        }
    }

    #[test]
    fn accessors_report_counts() {
        let topo = GridTopology::try_new(square_parts()).unwrap();
        assert_eq!(topo.n_nodes(), 5);
        assert_eq!(topo.n_faces(), 2);
        assert_eq!(topo.n_edges(), 6);
        assert_eq!(topo.max_face_degree(), 4);
        assert_eq!(topo.nodes_per_face(), &[4, 3]);
        assert_eq!(topo.face(1), &[1, 4, 2]);
        assert!(topo.validate_invariants().is_ok());
    }

    #[test]
    fn out_of_range_node_rejected() {
        let mut parts = square_parts();
        parts.face_nodes = Connectivity::try_new(vec![0, 1, 2, 3, 1, 9, 2, F], 4).unwrap();
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::FaceNodeOutOfRange {
                face: 1,
                node: 9,
                n_nodes: 5
            }
        );
    }

    fn triangle_parts() -> TopologyParts {
        TopologyParts {
            node_x: vec![0.0, 1.0, 0.0],
            node_y: vec![0.0, 0.0, 1.0],
            face_nodes: Connectivity::try_new(vec![0, 1, 2], 3).unwrap(),
            edge_nodes: Some(Connectivity::from_rows([[0, 1], [1, 2], [0, 2]])),
            attributes: GridAttributes::planar(),
            ..Default::default()
        }
    }

    #[test]
    fn incomplete_edge_table_rejected() {
        let mut parts = triangle_parts();
        parts.edge_nodes = Some(Connectivity::from_rows([[0, 1], [2, 0]]));
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::MissingEdge { face: 0, a: 1, b: 2 }
        );
    }

    #[test]
    fn supplied_face_edges_checked() {
        let mut parts = triangle_parts();
        parts.face_edges = Some(Connectivity::try_new(vec![0, 99, 7], 3).unwrap());
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::FaceEdgeOutOfRange {
                face: 0,
                edge: 99,
                n_edges: 3
            }
        );

        let mut parts = triangle_parts();
        parts.face_edges = Some(Connectivity::try_new(vec![0, F, 2], 3).unwrap());
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::InteriorFill { face: 0 }
        );

        let mut parts = triangle_parts();
        parts.face_edges = Some(Connectivity::try_new(vec![0, 1, 2], 3).unwrap());
        let topo = GridTopology::try_new(parts).unwrap();
        assert_eq!(topo.face_edges().row(0), &[0, 1, 2]);
    }

    #[test]
    fn two_vertex_face_rejected() {
        let mut parts = square_parts();
        parts.face_nodes = Connectivity::try_new(vec![0, 1, 2, 3, 1, 4, F, F], 4).unwrap();
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::DegenerateFace { face: 1, count: 2 }
        );
    }

    #[test]
    fn overwide_rows_rejected() {
        let mut parts = square_parts();
        parts.face_nodes =
            Connectivity::try_new(vec![0, 1, 2, 3, F, 1, 4, 2, F, F], 5).unwrap();
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::MaxFaceDegreeMismatch {
                declared: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn interior_fill_and_repeats_rejected() {
        let mut parts = square_parts();
        parts.face_nodes = Connectivity::try_new(vec![0, 1, 2, 3, 1, F, 4, 2], 4).unwrap();
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::InteriorFill { face: 1 }
        );

        let mut parts = square_parts();
        parts.face_nodes = Connectivity::try_new(vec![0, 1, 2, 0, 1, 4, 2, F], 4).unwrap();
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::RepeatedNode { face: 0, node: 0 }
        );
    }

    #[test]
    fn bad_radius_rejected() {
        let mut parts = square_parts();
        parts.attributes = GridAttributes::sphere(0.0);
        assert_eq!(
            GridTopology::try_new(parts).unwrap_err(),
            TopologyError::InvalidRadius(0.0)
        );
    }

    #[test]
    fn equality_is_by_content_identity_is_by_handle() {
        let a = Grid::from_parts(square_parts()).unwrap().into_shared();
        let b = Grid::from_parts(square_parts()).unwrap().into_shared();
        let a2 = Arc::clone(&a);
        assert_eq!(*a, *b);
        assert!(!Grid::same_grid(&a, &b));
        assert!(Grid::same_grid(&a, &a2));
    }

    #[test]
    fn planar_nodes_embed_at_zero_height() {
        let topo = GridTopology::try_new(square_parts()).unwrap();
        assert_eq!(topo.node_xyz()[4], [2.0, 0.5, 0.0]);
    }
}
