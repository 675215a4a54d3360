//! MPAS mesh normalizer.
//!
//! MPAS stores a Voronoi (primal) mesh and its Delaunay dual in one set of
//! arrays. Cells are Voronoi polygons around `(lonCell, latCell)` whose
//! corners are the vertices `(lonVertex, latVertex)`; every vertex is in turn
//! the center of a dual triangle with cell centers for corners. The reader
//! builds either mesh:
//!
//! | canonical     | primal           | dual             |
//! |---------------|------------------|------------------|
//! | nodes         | `lon/latVertex`  | `lon/latCell`    |
//! | face centers  | `lon/latCell`    | `lon/latVertex`  |
//! | face → node   | `verticesOnCell` | `cellsOnVertex`  |
//! | edge → node   | `verticesOnEdge` | `cellsOnEdge`    |
//! | face → edge   | `edgesOnCell`    | `edgesOnVertex`  |
//!
//! Angles are radians and indices 1-based with `0` as padding. Primal rows
//! are cut at `nEdgesOnCell`; dual rows drop missing cells along regional
//! boundaries and keep the rest in order.

use crate::data::coordinates::radians_to_degrees;
use crate::io::dataset::SourceDataset;
use crate::io::indices::{mask_by_counts, one_based_zero_padded};
use crate::io::{GridOptions, GridReader, SourceFormat, float_vector, sphere_radius};
use crate::mesh_error::{FormatError, GridError};
use crate::topology::connectivity::Connectivity;
use crate::topology::grid::{Grid, GridAttributes, GridTopology, TopologyParts};

/// Variable names for one of the two MPAS meshes.
struct MeshRoles {
    node_lon: &'static str,
    node_lat: &'static str,
    node_x: &'static str,
    node_y: &'static str,
    center_lon: &'static str,
    center_lat: &'static str,
    center_x: &'static str,
    center_y: &'static str,
    face_nodes: &'static str,
    edge_nodes: &'static str,
    face_edges: &'static str,
    /// Per-face valid-entry counts, primal only.
    counts: Option<&'static str>,
}

const PRIMAL: MeshRoles = MeshRoles {
    node_lon: "lonVertex",
    node_lat: "latVertex",
    node_x: "xVertex",
    node_y: "yVertex",
    center_lon: "lonCell",
    center_lat: "latCell",
    center_x: "xCell",
    center_y: "yCell",
    face_nodes: "verticesOnCell",
    edge_nodes: "verticesOnEdge",
    face_edges: "edgesOnCell",
    counts: Some("nEdgesOnCell"),
};

const DUAL: MeshRoles = MeshRoles {
    node_lon: "lonCell",
    node_lat: "latCell",
    node_x: "xCell",
    node_y: "yCell",
    center_lon: "lonVertex",
    center_lat: "latVertex",
    center_x: "xVertex",
    center_y: "yVertex",
    face_nodes: "cellsOnVertex",
    edge_nodes: "cellsOnEdge",
    face_edges: "edgesOnVertex",
    counts: None,
};

/// Reader for MPAS grids.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MpasReader {
    /// Build the Delaunay dual instead of the Voronoi primal mesh.
    pub use_dual: bool,
    /// Overrides the `sphere_radius` global attribute.
    pub sphere_radius: Option<f64>,
}

impl MpasReader {
    pub fn primal() -> Self {
        Self::default()
    }

    pub fn dual() -> Self {
        Self {
            use_dual: true,
            ..Self::default()
        }
    }

    pub fn from_options(options: &GridOptions) -> Self {
        Self {
            use_dual: options.use_dual,
            sphere_radius: options.sphere_radius,
        }
    }

    fn roles(&self) -> &'static MeshRoles {
        if self.use_dual { &DUAL } else { &PRIMAL }
    }

    fn attributes(&self, ds: &SourceDataset) -> Result<GridAttributes, FormatError> {
        let on_sphere = match ds.attribute("on_a_sphere").and_then(|a| a.as_str()) {
            None => true,
            Some(flag) => match flag.trim().to_ascii_uppercase().as_str() {
                "YES" => true,
                "NO" => false,
                _ => {
                    return Err(FormatError::InvalidAttribute {
                        attribute: "on_a_sphere".into(),
                        value: flag.to_string(),
                    });
                }
            },
        };
        Ok(if on_sphere {
            GridAttributes::sphere(sphere_radius(ds, "sphere_radius", self.sphere_radius))
        } else {
            GridAttributes::planar()
        })
    }

    /// Node and face-center coordinates in canonical units.
    fn coordinates(
        &self,
        ds: &SourceDataset,
        on_sphere: bool,
    ) -> Result<(Vec<f64>, Vec<f64>, Option<(Vec<f64>, Vec<f64>)>), FormatError> {
        let roles = self.roles();
        let (x, y, cx, cy) = if on_sphere {
            (roles.node_lon, roles.node_lat, roles.center_lon, roles.center_lat)
        } else {
            (roles.node_x, roles.node_y, roles.center_x, roles.center_y)
        };
        let convert = |values: Vec<f64>| {
            if on_sphere {
                radians_to_degrees(&values)
            } else {
                values
            }
        };
        let node_x = convert(float_vector(ds, x)?);
        let node_y = convert(float_vector(ds, y)?);
        let centers = if ds.has_variable(cx) && ds.has_variable(cy) {
            Some((convert(float_vector(ds, cx)?), convert(float_vector(ds, cy)?)))
        } else {
            None
        };
        Ok((node_x, node_y, centers))
    }

    /// Connectivity table `name`, translated and with padding normalized.
    ///
    /// `expected_rows` pins the row count when another array fixes it.
    fn table(
        &self,
        ds: &SourceDataset,
        name: &str,
        expected_rows: Option<usize>,
    ) -> Result<Connectivity, FormatError> {
        let view = ds.ints(name)?;
        view.expect_rank(2)?;
        let n_cols = view.shape[1];
        if let Some(rows) = expected_rows {
            view.expect_shape(&[rows, n_cols])?;
        }
        let mut table = one_based_zero_padded(name, view.data, n_cols)?;
        match self.roles().counts {
            Some(counts) if ds.has_variable(counts) => {
                let counts_view = ds.ints(counts)?;
                counts_view.expect_shape(&[table.n_rows()])?;
                table = mask_by_counts(counts, &table, counts_view.data)?;
            }
            _ => table.compact_rows(),
        }
        table.trim_to_widest();
        Ok(table)
    }
}

impl GridReader for MpasReader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Mpas
    }

    fn read(&self, ds: &SourceDataset) -> Result<Grid, GridError> {
        let roles = self.roles();
        let attributes = self.attributes(ds)?;
        let (node_x, node_y, centers) = self.coordinates(ds, attributes.on_sphere)?;
        let n_faces = centers.as_ref().map(|(x, _)| x.len());
        let face_nodes = self.table(ds, roles.face_nodes, n_faces)?;

        // face→edge rows only make sense against the source's own edge list
        let (edge_nodes, face_edges) = if ds.has_variable(roles.edge_nodes) {
            let view = ds.ints(roles.edge_nodes)?;
            view.expect_rank(2)?;
            view.expect_shape(&[view.shape[0], 2])?;
            let edges = one_based_zero_padded(roles.edge_nodes, view.data, 2)?;
            let face_edges = if ds.has_variable(roles.face_edges) {
                Some(self.table(ds, roles.face_edges, Some(face_nodes.n_rows()))?)
            } else {
                None
            };
            (Some(edges), face_edges)
        } else {
            (None, None)
        };

        let (face_x, face_y) = match centers {
            Some((x, y)) => (Some(x), Some(y)),
            None => (None, None),
        };
        log::debug!(
            "normalizing MPAS {} mesh: {} nodes, {} faces, max degree {}",
            if self.use_dual { "dual" } else { "primal" },
            node_x.len(),
            face_nodes.n_rows(),
            face_nodes.n_cols()
        );
        let topology = GridTopology::try_new(TopologyParts {
            node_x,
            node_y,
            face_nodes,
            edge_nodes,
            face_edges,
            face_x,
            face_y,
            attributes,
        })?;
        Ok(Grid::new(topology, Some(SourceFormat::Mpas)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dataset::SourceVariable;
    use crate::mesh_error::TopologyError;
    use crate::topology::connectivity::INT_FILL_VALUE;

    const F: usize = INT_FILL_VALUE;

    /// Two planar cells sharing an edge; the second is a triangle stored with
    /// a junk trailing entry that `nEdgesOnCell` masks out.
    fn planar_cells() -> SourceDataset {
        let mut ds = SourceDataset::new();
        ds.add_attribute("on_a_sphere", "NO");
        ds.add_dimension("nCells", 2)
            .add_dimension("nVertices", 5)
            .add_dimension("maxEdges", 4);
        ds.add_variable(
            "xVertex",
            SourceVariable::float(["nVertices"], vec![0.0, 1.0, 1.0, 0.0, 2.0]),
        );
        ds.add_variable(
            "yVertex",
            SourceVariable::float(["nVertices"], vec![0.0, 0.0, 1.0, 1.0, 0.5]),
        );
        ds.add_variable("xCell", SourceVariable::float(["nCells"], vec![0.5, 1.3]));
        ds.add_variable("yCell", SourceVariable::float(["nCells"], vec![0.5, 0.5]));
        ds.add_variable(
            "verticesOnCell",
            SourceVariable::int(["nCells", "maxEdges"], vec![1, 2, 3, 4, 2, 5, 3, 3]),
        );
        ds.add_variable("nEdgesOnCell", SourceVariable::int(["nCells"], vec![4, 3]));
        ds
    }

    #[test]
    fn planar_primal_masks_by_edge_count() {
        let grid = MpasReader::primal().read(&planar_cells()).unwrap();
        let topo = grid.topology();
        assert!(!topo.on_sphere());
        assert_eq!(topo.face_nodes().as_slice(), &[0, 1, 2, 3, 1, 4, 2, F]);
        assert_eq!(topo.n_edges(), 6);
        assert_eq!(grid.source_format(), Some(SourceFormat::Mpas));
    }

    #[test]
    fn row_count_must_match_cells() {
        let mut ds = planar_cells();
        ds.add_variable("xCell", SourceVariable::float(["nVertices"], vec![0.0; 5]));
        ds.add_variable("yCell", SourceVariable::float(["nVertices"], vec![0.0; 5]));
        let err = MpasReader::primal().read(&ds).unwrap_err();
        assert!(matches!(
            err,
            GridError::Format(FormatError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn bad_sphere_flag_rejected() {
        let mut ds = planar_cells();
        ds.add_attribute("on_a_sphere", "maybe");
        assert!(matches!(
            MpasReader::primal().read(&ds),
            Err(GridError::Format(FormatError::InvalidAttribute { .. }))
        ));
    }

    #[test]
    fn missing_connectivity_reported() {
        let mut ds = SourceDataset::new();
        ds.add_attribute("on_a_sphere", "NO");
        ds.add_dimension("nVertices", 1);
        ds.add_variable("xVertex", SourceVariable::float(["nVertices"], vec![0.0]));
        ds.add_variable("yVertex", SourceVariable::float(["nVertices"], vec![0.0]));
        assert_eq!(
            MpasReader::primal().read(&ds).unwrap_err(),
            GridError::Format(FormatError::MissingVariable("verticesOnCell".into()))
        );
    }

    #[test]
    fn one_dimensional_connectivity_rejected() {
        let mut ds = planar_cells();
        ds.add_variable("cellsOnVertex", SourceVariable::int(["nVertices"], vec![0; 5]));
        assert!(matches!(
            MpasReader::dual().read(&ds),
            Err(GridError::Format(FormatError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn zero_inside_count_is_a_topology_error() {
        let mut ds = planar_cells();
        ds.add_variable(
            "verticesOnCell",
            SourceVariable::int(["nCells", "maxEdges"], vec![1, 0, 3, 4, 2, 5, 3, 0]),
        );
        assert!(matches!(
            MpasReader::primal().read(&ds),
            Err(GridError::Topology(TopologyError::InteriorFill { face: 0 }))
        ));
    }
}
