//! UGRID normalizer.
//!
//! The mesh topology variable (`cf_role = "mesh_topology"`) names the arrays
//! that make up the mesh. Files without one, or with a topology variable that
//! leaves an array out, fall back to the legacy name table in
//! [`crate::io::names`]. Connectivity honours `start_index` and `_FillValue`;
//! rows stored transposed are detected through `face_dimension` /
//! `edge_dimension`.

use crate::data::coordinates::radians_to_degrees;
use crate::io::dataset::{AttrValue, SourceDataset, SourceVariable, VariableData};
use crate::io::indices::{IndexConvention, to_canonical};
use crate::io::names::{CanonicalField, resolve};
use crate::io::{GridOptions, GridReader, SourceFormat, float_vector, sphere_radius};
use crate::mesh_error::{FormatError, GridError};
use crate::topology::connectivity::Connectivity;
use crate::topology::grid::{Grid, GridAttributes, GridTopology, TopologyParts};

/// Name of the first variable flagged as a mesh topology.
pub fn find_mesh_topology(ds: &SourceDataset) -> Option<&str> {
    ds.variables()
        .find(|(_, v)| v.text_attribute("cf_role") == Some("mesh_topology"))
        .map(|(name, _)| name)
}

/// How node longitudes are expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Units {
    Degrees,
    Radians,
    Planar,
}

impl Units {
    /// Units of a node x/longitude variable.
    ///
    /// Without a `units` attribute a `standard_name` decides; with neither
    /// the coordinates are taken as degrees on the sphere.
    fn of(variable: &SourceVariable) -> Self {
        if let Some(units) = variable.text_attribute("units") {
            let units = units.to_ascii_lowercase();
            return if units.starts_with("degree") {
                Units::Degrees
            } else if units.starts_with("radian") {
                Units::Radians
            } else {
                Units::Planar
            };
        }
        match variable.text_attribute("standard_name") {
            Some("projection_x_coordinate") => Units::Planar,
            _ => Units::Degrees,
        }
    }

    fn convert(self, values: Vec<f64>) -> Vec<f64> {
        match self {
            Units::Radians => radians_to_degrees(&values),
            Units::Degrees | Units::Planar => values,
        }
    }
}

/// Reader for UGRID 2-D meshes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UgridReader {
    /// Overrides the `sphere_radius` global attribute.
    pub sphere_radius: Option<f64>,
}

impl UgridReader {
    pub fn from_options(options: &GridOptions) -> Self {
        Self {
            sphere_radius: options.sphere_radius,
        }
    }
}

/// Variable names resolved for one mesh.
struct Layout<'a> {
    topology: Option<&'a str>,
    node_x: &'a str,
    node_y: &'a str,
    face_nodes: &'a str,
    edge_nodes: Option<&'a str>,
    face_edges: Option<&'a str>,
    face_x: Option<&'a str>,
    face_y: Option<&'a str>,
}

impl<'a> Layout<'a> {
    fn locate(ds: &'a SourceDataset) -> Result<Self, FormatError> {
        let topology = find_mesh_topology(ds);
        let topo_var = topology.map(|name| ds.variable(name)).transpose()?;
        if let Some(var) = topo_var {
            if let Some(dim) = var.attribute("topology_dimension") {
                if dim.as_i64() != Some(2) {
                    return Err(FormatError::InvalidAttribute {
                        attribute: "topology_dimension".into(),
                        value: format!("{dim:?}"),
                    });
                }
            }
        }
        let named = |attribute: &str| -> Option<Vec<&'a str>> {
            topo_var
                .and_then(|v| v.text_attribute(attribute))
                .map(|s| s.split_whitespace().collect())
        };
        let single = |attribute: &str, field: CanonicalField| -> Option<&'a str> {
            named(attribute)
                .and_then(|names| names.first().copied())
                .or_else(|| resolve(ds, field))
        };
        let pair = |attribute: &str, x: CanonicalField, y: CanonicalField| {
            match named(attribute).as_deref() {
                Some([x_name, y_name, ..]) => (Some(*x_name), Some(*y_name)),
                _ => (resolve(ds, x), resolve(ds, y)),
            }
        };
        let missing = |attribute: &str| match topology {
            Some(name) => FormatError::MissingAttribute {
                variable: name.to_string(),
                attribute: attribute.to_string(),
            },
            None => FormatError::MissingVariable(attribute.to_string()),
        };

        let (node_x, node_y) = pair("node_coordinates", CanonicalField::NodeX, CanonicalField::NodeY);
        let (face_x, face_y) = pair("face_coordinates", CanonicalField::FaceX, CanonicalField::FaceY);
        Ok(Self {
            topology,
            node_x: node_x.ok_or_else(|| missing("node_coordinates"))?,
            node_y: node_y.ok_or_else(|| missing("node_coordinates"))?,
            face_nodes: single("face_node_connectivity", CanonicalField::FaceNodes)
                .ok_or_else(|| missing("face_node_connectivity"))?,
            edge_nodes: single("edge_node_connectivity", CanonicalField::EdgeNodes),
            face_edges: single("face_edge_connectivity", CanonicalField::FaceEdges),
            face_x,
            face_y,
        })
    }

    /// Element dimension recorded on the topology variable, e.g. `face_dimension`.
    fn element_dimension(&self, ds: &'a SourceDataset, attribute: &str) -> Option<&'a str> {
        let topology = self.topology?;
        ds.variable(topology).ok()?.text_attribute(attribute)
    }
}

/// Integer connectivity data of `name`; integral floats are accepted and NaN
/// counts as missing.
fn index_data(variable: &SourceVariable, name: &str) -> Result<Vec<i64>, FormatError> {
    match &variable.data {
        VariableData::Int(values) => Ok(values.clone()),
        VariableData::Float(values) => values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if v.is_nan() {
                    Ok(-1)
                } else if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Ok(v as i64)
                } else {
                    Err(FormatError::InvalidIndex {
                        variable: name.to_string(),
                        row: i,
                        value: v as i64,
                    })
                }
            })
            .collect(),
    }
}

/// Read a 2-D connectivity variable in canonical row-major form.
///
/// `element_dim` is the dimension that indexes elements (faces or edges);
/// when it is the second dimension of the variable the array is transposed.
fn connectivity(
    ds: &SourceDataset,
    name: &str,
    element_dim: Option<&str>,
) -> Result<Connectivity, FormatError> {
    let shape = ds.shape(name)?;
    if shape.len() != 2 {
        return Err(FormatError::ShapeMismatch {
            variable: name.to_string(),
            expected: vec![0, 0],
            found: shape,
        });
    }
    let variable = ds.variable(name)?;
    let mut raw = index_data(variable, name)?;
    let (rows, mut cols) = (shape[0], shape[1]);
    if let Some(dim) = element_dim {
        ds.require_dimension(dim)?;
        if variable.dims[1] == dim && variable.dims[0] != dim {
            raw = transpose(&raw, rows, cols);
            cols = rows;
        }
    }
    let start_index = match variable.attribute("start_index") {
        None => 0,
        Some(value) => match value.as_i64() {
            Some(start @ (0 | 1)) => start,
            _ => {
                return Err(FormatError::InvalidAttribute {
                    attribute: "start_index".into(),
                    value: format!("{value:?}"),
                });
            }
        },
    };
    let fill_value = variable.attribute("_FillValue").and_then(AttrValue::as_i64);
    let mut table = to_canonical(name, &raw, cols, IndexConvention::ugrid(start_index, fill_value))?;
    table.trim_to_widest();
    Ok(table)
}

fn transpose(values: &[i64], rows: usize, cols: usize) -> Vec<i64> {
    let mut out = vec![0; values.len()];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = values[r * cols + c];
        }
    }
    out
}

impl GridReader for UgridReader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Ugrid
    }

    fn read(&self, ds: &SourceDataset) -> Result<Grid, GridError> {
        let layout = Layout::locate(ds)?;
        let units = Units::of(ds.variable(layout.node_x)?);
        let attributes = match units {
            Units::Planar => GridAttributes::planar(),
            Units::Degrees | Units::Radians => {
                GridAttributes::sphere(sphere_radius(ds, "sphere_radius", self.sphere_radius))
            }
        };
        let node_x = units.convert(float_vector(ds, layout.node_x)?);
        let node_y = units.convert(float_vector(ds, layout.node_y)?);

        let face_dim = layout.element_dimension(ds, "face_dimension");
        let face_nodes = connectivity(ds, layout.face_nodes, face_dim)?;

        let (face_x, face_y) = match (layout.face_x, layout.face_y) {
            (Some(x), Some(y)) => (
                Some(units.convert(float_vector(ds, x)?)),
                Some(units.convert(float_vector(ds, y)?)),
            ),
            _ => (None, None),
        };

        let edge_nodes = layout
            .edge_nodes
            .map(|name| connectivity(ds, name, layout.element_dimension(ds, "edge_dimension")))
            .transpose()?;
        let face_edges = match (&edge_nodes, layout.face_edges) {
            (Some(_), Some(name)) => Some(connectivity(ds, name, face_dim)?),
            _ => None,
        };

        log::debug!(
            "normalizing UGRID mesh {}: {} nodes, {} faces ({units:?})",
            layout.topology.unwrap_or("<unnamed>"),
            node_x.len(),
            face_nodes.n_rows()
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
        Ok(Grid::new(topology, Some(SourceFormat::Ugrid)))
    }
}
