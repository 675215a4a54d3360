//! Legacy variable names and the canonical fields they stand for.
//!
//! Grid files in the wild name the same array many ways (`Mesh2_node_x`,
//! `mesh_node_x`, `node_lon`, ...). Normalizers resolve them here, once, at
//! the boundary; nothing past the normalizer sees source names.

use hashbrown::HashMap;
use once_cell::sync::Lazy;

use crate::io::dataset::SourceDataset;

/// Fields of the canonical topology a source variable can populate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    NodeX,
    NodeY,
    FaceX,
    FaceY,
    FaceNodes,
    EdgeNodes,
    FaceEdges,
}

/// Known aliases in resolution order: the first present one wins.
const ALIASES: &[(&str, CanonicalField)] = &[
    ("node_x", CanonicalField::NodeX),
    ("Mesh2_node_x", CanonicalField::NodeX),
    ("mesh_node_x", CanonicalField::NodeX),
    ("mesh2d_node_x", CanonicalField::NodeX),
    ("node_lon", CanonicalField::NodeX),
    ("node_y", CanonicalField::NodeY),
    ("Mesh2_node_y", CanonicalField::NodeY),
    ("mesh_node_y", CanonicalField::NodeY),
    ("mesh2d_node_y", CanonicalField::NodeY),
    ("node_lat", CanonicalField::NodeY),
    ("face_x", CanonicalField::FaceX),
    ("Mesh2_face_x", CanonicalField::FaceX),
    ("mesh_face_x", CanonicalField::FaceX),
    ("mesh2d_face_x", CanonicalField::FaceX),
    ("face_lon", CanonicalField::FaceX),
    ("face_y", CanonicalField::FaceY),
    ("Mesh2_face_y", CanonicalField::FaceY),
    ("mesh_face_y", CanonicalField::FaceY),
    ("mesh2d_face_y", CanonicalField::FaceY),
    ("face_lat", CanonicalField::FaceY),
    ("face_node_connectivity", CanonicalField::FaceNodes),
    ("Mesh2_face_nodes", CanonicalField::FaceNodes),
    ("mesh_face_nodes", CanonicalField::FaceNodes),
    ("mesh2d_face_nodes", CanonicalField::FaceNodes),
    ("edge_node_connectivity", CanonicalField::EdgeNodes),
    ("Mesh2_edge_nodes", CanonicalField::EdgeNodes),
    ("mesh_edge_nodes", CanonicalField::EdgeNodes),
    ("mesh2d_edge_nodes", CanonicalField::EdgeNodes),
    ("face_edge_connectivity", CanonicalField::FaceEdges),
    ("Mesh2_face_edges", CanonicalField::FaceEdges),
    ("mesh_face_edges", CanonicalField::FaceEdges),
    ("mesh2d_face_edges", CanonicalField::FaceEdges),
];

/// Aliases grouped by field, resolution order kept.
static ALIAS_INDEX: Lazy<HashMap<CanonicalField, Vec<&'static str>>> = Lazy::new(|| {
    let mut index: HashMap<CanonicalField, Vec<&'static str>> = HashMap::new();
    for &(name, field) in ALIASES {
        index.entry(field).or_default().push(name);
    }
    index
});

/// Known aliases of `field`, in resolution order.
pub fn aliases(field: CanonicalField) -> &'static [&'static str] {
    ALIAS_INDEX.get(&field).map(Vec::as_slice).unwrap_or(&[])
}

/// First variable in `ds` that is a known alias of `field`.
pub fn resolve(ds: &SourceDataset, field: CanonicalField) -> Option<&'static str> {
    aliases(field).iter().copied().find(|name| ds.has_variable(name))
}
