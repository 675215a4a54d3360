//! Convention normalizers.
//!
//! Every supported source convention has one [`GridReader`] that turns a
//! decoded [`SourceDataset`] into a validated [`Grid`]. Which reader runs is
//! decided once, by the caller through [`GridOptions::format`] or by
//! [`SourceFormat::detect`], and [`open_grid`] routes to exactly that reader.

pub mod dataset;
pub mod indices;
pub mod mpas;
pub mod names;
pub mod scrip;
pub mod ugrid;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use dataset::{AttrValue, SourceDataset, SourceVariable, VariableData};
pub use mpas::MpasReader;
pub use scrip::ScripReader;
pub use ugrid::UgridReader;

use crate::mesh_error::{FormatError, GridError};
use crate::topology::grid::Grid;

/// Source grid conventions understood by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// UGRID mesh topology conventions.
    Ugrid,
    /// MPAS Voronoi/Delaunay C-grid meshes.
    Mpas,
    /// SCRIP corner-list grids.
    Scrip,
}

impl SourceFormat {
    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::Ugrid => "ugrid",
            SourceFormat::Mpas => "mpas",
            SourceFormat::Scrip => "scrip",
        }
    }

    /// Infer the convention from which variables and attributes are present.
    ///
    /// Checks run from the most to the least specific signature: MPAS
    /// connectivity, SCRIP corner arrays, then a UGRID mesh topology variable
    /// or any known UGRID connectivity name.
    pub fn detect(ds: &SourceDataset) -> Result<Self, FormatError> {
        let has = |name: &str| ds.has_variable(name);
        if (has("verticesOnCell") && has("lonVertex")) || (has("cellsOnVertex") && has("lonCell"))
        {
            return Ok(SourceFormat::Mpas);
        }
        if has("grid_corner_lon") && has("grid_corner_lat") {
            return Ok(SourceFormat::Scrip);
        }
        if ugrid::find_mesh_topology(ds).is_some()
            || names::resolve(ds, names::CanonicalField::FaceNodes).is_some()
        {
            return Ok(SourceFormat::Ugrid);
        }
        Err(FormatError::UnknownFormat)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for [`open_grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Build the dual mesh where the convention has one (MPAS).
    pub use_dual: bool,
    /// Skip detection and use this convention.
    pub format: Option<SourceFormat>,
    /// Override the sphere radius recorded in (or defaulted for) the source.
    pub sphere_radius: Option<f64>,
}

/// A normalizer for one source convention.
pub trait GridReader {
    /// Convention this reader handles.
    fn format(&self) -> SourceFormat;

    /// Translate `ds` into a validated grid. `ds` is never modified.
    fn read(&self, ds: &SourceDataset) -> Result<Grid, GridError>;
}

/// Normalize `ds` into a shared grid.
///
/// # Errors
/// [`FormatError::UnknownFormat`] if no format was given and none could be
/// detected, otherwise whatever the selected reader reports.
pub fn open_grid(ds: &SourceDataset, options: &GridOptions) -> Result<Arc<Grid>, GridError> {
    let format = match options.format {
        Some(format) => format,
        None => SourceFormat::detect(ds)?,
    };
    let grid = match format {
        SourceFormat::Mpas => MpasReader::from_options(options).read(ds)?,
        SourceFormat::Ugrid => UgridReader::from_options(options).read(ds)?,
        SourceFormat::Scrip => ScripReader::from_options(options).read(ds)?,
    };
    let topology = grid.topology();
    log::debug!(
        "opened {format} grid: {} nodes, {} faces, {} edges, max degree {}",
        topology.n_nodes(),
        topology.n_faces(),
        topology.n_edges(),
        topology.max_face_degree()
    );
    Ok(grid.into_shared())
}

/// Sphere radius from options, then the named global attribute, then `1`.
pub(crate) fn sphere_radius(ds: &SourceDataset, attribute: &str, options_radius: Option<f64>) -> f64 {
    options_radius
        .or_else(|| ds.attribute(attribute).and_then(AttrValue::as_f64))
        .unwrap_or(1.0)
}

/// 1-D float array `name` as an owned vector.
pub(crate) fn float_vector(ds: &SourceDataset, name: &str) -> Result<Vec<f64>, FormatError> {
    let view = ds.floats(name)?;
    view.expect_rank(1)?;
    Ok(view.data.to_vec())
}
