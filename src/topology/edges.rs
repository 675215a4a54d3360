//! Edge connectivity derived from face connectivity.
//!
//! Edges are the undirected node pairs `(min, max)` walked around every face
//! boundary (closing from the last vertex back to the first), de-duplicated
//! and sorted. Face→edge rows list each face's edges in boundary order.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::mesh_error::TopologyError;
use crate::topology::connectivity::{Connectivity, INT_FILL_VALUE};

/// Derived edge→node and face→edge tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedEdges {
    /// `n_edges × 2` node pairs, lower index first.
    pub edge_nodes: Connectivity,
    /// `n_faces × max_face_degree` edge indices, fill-padded.
    pub face_edges: Connectivity,
}

/// Build edge→node and face→edge connectivity from face→node connectivity.
pub fn derive_edges(face_nodes: &Connectivity) -> DerivedEdges {
    let mut edges: Vec<(usize, usize)> = (0..face_nodes.n_rows())
        .flat_map(|f| boundary_pairs(face_nodes.valid_row(f)))
        .collect();
    edges.sort_unstable();
    edges.dedup();

    let mut face_edges = Connectivity::from_rows((0..face_nodes.n_rows()).map(|f| {
        boundary_pairs(face_nodes.valid_row(f))
            .map(|pair| edges.binary_search(&pair).unwrap_or(INT_FILL_VALUE))
            .collect::<Vec<_>>()
    }));
    pad_to_width(&mut face_edges, face_nodes.n_cols());

    let edge_nodes = Connectivity::from_rows(edges.iter().map(|&(a, b)| [a, b]));
    DerivedEdges {
        edge_nodes,
        face_edges,
    }
}

/// Face→edge rows for a given edge table.
///
/// # Errors
/// [`TopologyError::MissingEdge`] if a face side has no matching edge.
pub fn face_edges_from(
    face_nodes: &Connectivity,
    edge_nodes: &Connectivity,
) -> Result<Connectivity, TopologyError> {
    let index: HashMap<(usize, usize), usize> = edge_nodes
        .rows()
        .enumerate()
        .filter(|(_, row)| row.len() == 2)
        .map(|(e, row)| ((row[0].min(row[1]), row[0].max(row[1])), e))
        .collect();
    let rows = (0..face_nodes.n_rows())
        .map(|face| {
            boundary_pairs(face_nodes.valid_row(face))
                .map(|(a, b)| {
                    index
                        .get(&(a, b))
                        .copied()
                        .ok_or(TopologyError::MissingEdge { face, a, b })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mut face_edges = Connectivity::from_rows(rows);
    pad_to_width(&mut face_edges, face_nodes.n_cols());
    Ok(face_edges)
}

fn boundary_pairs(row: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    row.iter()
        .circular_tuple_windows()
        .map(|(&a, &b)| (a.min(b), a.max(b)))
}

fn pad_to_width(table: &mut Connectivity, width: usize) {
    if table.n_cols() >= width {
        return;
    }
    let rows: Vec<Vec<usize>> = table.rows().map(<[usize]>::to_vec).collect();
    let mut data = Vec::with_capacity(rows.len() * width);
    for row in rows {
        let len = row.len();
        data.extend(row);
        data.extend(std::iter::repeat_n(INT_FILL_VALUE, width - len));
    }
    if let Ok(padded) = Connectivity::try_new(data, width) {
        *table = padded;
    }
}
