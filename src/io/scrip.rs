//! SCRIP normalizer.
//!
//! SCRIP grids list every cell's corners by coordinate
//! (`grid_corner_lon/lat`, `grid_size × grid_corners`) rather than by index.
//! Nodes are recovered by de-duplicating corner coordinates in first-seen
//! order; cells with fewer distinct corners than `grid_corners` repeat a
//! corner, and those repeats are collapsed.

use hashbrown::HashMap;

use crate::data::coordinates::{coordinate_key, radians_to_degrees};
use crate::io::dataset::SourceDataset;
use crate::io::{GridOptions, GridReader, SourceFormat, float_vector, sphere_radius};
use crate::mesh_error::{FormatError, GridError};
use crate::topology::connectivity::Connectivity;
use crate::topology::grid::{Grid, GridAttributes, GridTopology, TopologyParts};

const CORNER_LON: &str = "grid_corner_lon";
const CORNER_LAT: &str = "grid_corner_lat";
const CENTER_LON: &str = "grid_center_lon";
const CENTER_LAT: &str = "grid_center_lat";

/// Reader for SCRIP grids.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScripReader {
    /// Sphere radius; SCRIP files do not record one.
    pub sphere_radius: Option<f64>,
}

impl ScripReader {
    pub fn from_options(options: &GridOptions) -> Self {
        Self {
            sphere_radius: options.sphere_radius,
        }
    }
}

/// Whether `name` holds radians, judged by its `units` attribute.
fn in_radians(ds: &SourceDataset, name: &str) -> Result<bool, FormatError> {
    let variable = ds.variable(name)?;
    match variable.text_attribute("units") {
        None => Ok(false),
        Some(units) => {
            let lower = units.to_ascii_lowercase();
            if lower.starts_with("degree") {
                Ok(false)
            } else if lower.starts_with("radian") {
                Ok(true)
            } else {
                Err(FormatError::InvalidAttribute {
                    attribute: format!("{name}:units"),
                    value: units.to_string(),
                })
            }
        }
    }
}

fn degrees(ds: &SourceDataset, values: Vec<f64>, name: &str) -> Result<Vec<f64>, FormatError> {
    Ok(if in_radians(ds, name)? {
        radians_to_degrees(&values)
    } else {
        values
    })
}

/// Distinct corner nodes and the corner rows expressed in node indices.
pub(crate) struct CornerNodes {
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub faces: Connectivity,
}

/// De-duplicate `grid_size × grid_corners` corner arrays into nodes.
pub(crate) fn dedup_corners(lon: &[f64], lat: &[f64], n_corners: usize) -> CornerNodes {
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut nodes_lon = Vec::new();
    let mut nodes_lat = Vec::new();
    let rows = lon
        .chunks_exact(n_corners.max(1))
        .zip(lat.chunks_exact(n_corners.max(1)))
        .map(|(row_lon, row_lat)| {
            let mut row: Vec<usize> = Vec::with_capacity(n_corners);
            for (&x, &y) in row_lon.iter().zip(row_lat) {
                let node = *index
                    .entry(coordinate_key(x, y))
                    .or_insert_with(|| {
                        nodes_lon.push(x);
                        nodes_lat.push(y);
                        nodes_lon.len() - 1
                    });
                if row.last() != Some(&node) {
                    row.push(node);
                }
            }
            if row.len() > 1 && row.first() == row.last() {
                row.pop();
            }
            row
        })
        .collect::<Vec<_>>();
    CornerNodes {
        lon: nodes_lon,
        lat: nodes_lat,
        faces: Connectivity::from_rows(rows),
    }
}

impl GridReader for ScripReader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Scrip
    }

    fn read(&self, ds: &SourceDataset) -> Result<Grid, GridError> {
        let lon = ds.floats(CORNER_LON)?;
        lon.expect_rank(2)?;
        let lat = ds.floats(CORNER_LAT)?;
        lat.expect_shape(&lon.shape)?;
        let n_corners = lon.shape[1];

        let lon_deg = degrees(ds, lon.data.to_vec(), CORNER_LON)?;
        let lat_deg = degrees(ds, lat.data.to_vec(), CORNER_LAT)?;
        let corners = dedup_corners(&lon_deg, &lat_deg, n_corners);

        let (face_x, face_y) = if ds.has_variable(CENTER_LON) && ds.has_variable(CENTER_LAT) {
            let x = degrees(ds, float_vector(ds, CENTER_LON)?, CENTER_LON)?;
            let y = degrees(ds, float_vector(ds, CENTER_LAT)?, CENTER_LAT)?;
            (Some(x), Some(y))
        } else {
            (None, None)
        };

        log::debug!(
            "normalizing SCRIP grid: {} cells, {} corners each, {} distinct nodes",
            lon.shape[0],
            n_corners,
            corners.lon.len()
        );
        let topology = GridTopology::try_new(TopologyParts {
            node_x: corners.lon,
            node_y: corners.lat,
            face_nodes: corners.faces,
            edge_nodes: None,
            face_edges: None,
            face_x,
            face_y,
            attributes: GridAttributes::sphere(sphere_radius(ds, "sphere_radius", self.sphere_radius)),
        })?;
        Ok(Grid::new(topology, Some(SourceFormat::Scrip)))
    }
}
