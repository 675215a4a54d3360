#![allow(dead_code)]
use std::collections::HashMap;

use mesh_ugrid::data::coordinates::xyz_to_lonlat;
use mesh_ugrid::io::{SourceDataset, SourceVariable};
use mesh_ugrid::topology::{Connectivity, Grid, GridAttributes, TopologyParts};

pub const FOUR_PI: f64 = 4.0 * std::f64::consts::PI;

fn normalize(p: [f64; 3]) -> [f64; 3] {
    let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
    [p[0] / r, p[1] / r, p[2] / r]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Unit icosphere: the icosahedron split `levels` times, nodes projected
/// onto the sphere. Level 1 has 42 nodes and 80 triangles.
pub fn icosphere(levels: usize) -> (Vec<[f64; 3]>, Vec<[usize; 3]>) {
    let t = (1.0 + 5f64.sqrt()) / 2.0;
    let mut nodes: Vec<[f64; 3]> = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .into_iter()
    .map(normalize)
    .collect();
    let mut faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    for _ in 0..levels {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut midpoint = |a: usize, b: usize, nodes: &mut Vec<[f64; 3]>| {
            *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
                let (p, q) = (nodes[a], nodes[b]);
                nodes.push(normalize([p[0] + q[0], p[1] + q[1], p[2] + q[2]]));
                nodes.len() - 1
            })
        };
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut nodes);
            let bc = midpoint(b, c, &mut nodes);
            let ca = midpoint(c, a, &mut nodes);
            next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        faces = next;
    }
    (nodes, faces)
}

fn lonlat(points: &[[f64; 3]]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|&p| xyz_to_lonlat(p)).map(|[lon, lat]| (lon, lat)).unzip()
}

/// Level-1 icosphere as a spherical grid with the given radius.
pub fn icosphere_grid(radius: f64) -> Grid {
    icosphere_grid_at(1, radius)
}

/// Icosphere refined `levels` times as a spherical grid.
pub fn icosphere_grid_at(levels: usize, radius: f64) -> Grid {
    let (nodes, faces) = icosphere(levels);
    let (node_x, node_y) = lonlat(&nodes);
    Grid::from_parts(TopologyParts {
        node_x,
        node_y,
        face_nodes: Connectivity::from_rows(faces.iter().map(|f| f.to_vec())),
        attributes: GridAttributes::sphere(radius),
        ..Default::default()
    })
    .unwrap()
}

/// Right triangle with legs 3 and 4 in the plane.
pub fn right_triangle_grid() -> Grid {
    Grid::from_parts(TopologyParts {
        node_x: vec![0.0, 3.0, 0.0],
        node_y: vec![0.0, 0.0, 4.0],
        face_nodes: Connectivity::try_new(vec![0, 1, 2], 3).unwrap(),
        attributes: GridAttributes::planar(),
        ..Default::default()
    })
    .unwrap()
}

/// MPAS dataset built on the level-1 icosphere.
///
/// Cells are the icosphere nodes (12 pentagons, 30 hexagons); vertices are
/// the projected triangle centroids. `verticesOnCell` is stored one column
/// wider than needed with junk in the unused slots so only `nEdgesOnCell`
/// marks the valid entries.
pub fn mpas_icosphere() -> SourceDataset {
    let (cells, triangles) = icosphere(1);
    let vertices: Vec<[f64; 3]> = triangles
        .iter()
        .map(|&[a, b, c]| {
            let (p, q, r) = (cells[a], cells[b], cells[c]);
            normalize([p[0] + q[0] + r[0], p[1] + q[1] + r[1], p[2] + q[2] + r[2]])
        })
        .collect();

    // icosphere edges, each with its two end cells and two side triangles
    let mut edge_index: HashMap<(usize, usize), usize> = HashMap::new();
    let mut cells_on_edge: Vec<[usize; 2]> = Vec::new();
    let mut vertices_on_edge: Vec<Vec<usize>> = Vec::new();
    let mut edges_on_vertex: Vec<[usize; 3]> = Vec::new();
    for (t, &[a, b, c]) in triangles.iter().enumerate() {
        let mut own = [0; 3];
        for (slot, (p, q)) in [(a, b), (b, c), (c, a)].into_iter().enumerate() {
            let key = (p.min(q), p.max(q));
            let e = *edge_index.entry(key).or_insert_with(|| {
                cells_on_edge.push([key.0, key.1]);
                vertices_on_edge.push(Vec::new());
                cells_on_edge.len() - 1
            });
            vertices_on_edge[e].push(t);
            own[slot] = e;
        }
        edges_on_vertex.push(own);
    }

    let max_edges = 7;
    let mut vertices_on_cell = Vec::with_capacity(cells.len() * max_edges);
    let mut edges_on_cell = Vec::with_capacity(cells.len() * max_edges);
    let mut n_edges_on_cell = Vec::with_capacity(cells.len());
    for (cell, &p) in cells.iter().enumerate() {
        let helper = if p[0].abs() < 0.9 { [1.0, 0.0, 0.0] } else { [0.0, 1.0, 0.0] };
        let e1 = normalize(cross(p, helper));
        let e2 = cross(p, e1);
        let angle = |q: [f64; 3]| dot(q, e2).atan2(dot(q, e1));

        let mut ring: Vec<usize> = (0..triangles.len())
            .filter(|&t| triangles[t].contains(&cell))
            .collect();
        ring.sort_by(|&s, &t| angle(vertices[s]).total_cmp(&angle(vertices[t])));
        let mut spokes: Vec<usize> = cells_on_edge
            .iter()
            .enumerate()
            .filter(|(_, ends)| ends.contains(&cell))
            .map(|(e, _)| e)
            .collect();
        spokes.sort_by(|&e, &f| {
            let other = |e: usize| cells[cells_on_edge[e][0] + cells_on_edge[e][1] - cell];
            angle(other(e)).total_cmp(&angle(other(f)))
        });

        n_edges_on_cell.push(ring.len() as i64);
        for slot in 0..max_edges {
            // junk past the ring: repeat the first vertex/edge
            let t = ring.get(slot).copied().unwrap_or(ring[0]);
            let e = spokes.get(slot).copied().unwrap_or(spokes[0]);
            vertices_on_cell.push(t as i64 + 1);
            edges_on_cell.push(e as i64 + 1);
        }
    }

    let one_based = |rows: &[usize]| rows.iter().map(|&i| i as i64 + 1).collect::<Vec<_>>();
    let (lon_cell, lat_cell) = lonlat(&cells);
    let (lon_vertex, lat_vertex) = lonlat(&vertices);
    let radians = |v: Vec<f64>| v.into_iter().map(f64::to_radians).collect::<Vec<_>>();

    let mut ds = SourceDataset::new();
    ds.add_attribute("on_a_sphere", "YES");
    ds.add_attribute("sphere_radius", 1.0);
    ds.add_dimension("nCells", cells.len())
        .add_dimension("nVertices", vertices.len())
        .add_dimension("nEdges", cells_on_edge.len())
        .add_dimension("maxEdges", max_edges)
        .add_dimension("vertexDegree", 3)
        .add_dimension("TWO", 2);
    ds.add_variable("lonCell", SourceVariable::float(["nCells"], radians(lon_cell)));
    ds.add_variable("latCell", SourceVariable::float(["nCells"], radians(lat_cell)));
    ds.add_variable("lonVertex", SourceVariable::float(["nVertices"], radians(lon_vertex)));
    ds.add_variable("latVertex", SourceVariable::float(["nVertices"], radians(lat_vertex)));
    ds.add_variable(
        "verticesOnCell",
        SourceVariable::int(["nCells", "maxEdges"], vertices_on_cell),
    );
    ds.add_variable("edgesOnCell", SourceVariable::int(["nCells", "maxEdges"], edges_on_cell));
    ds.add_variable("nEdgesOnCell", SourceVariable::int(["nCells"], n_edges_on_cell));
    ds.add_variable(
        "cellsOnVertex",
        SourceVariable::int(
            ["nVertices", "vertexDegree"],
            one_based(&triangles.concat()),
        ),
    );
    ds.add_variable(
        "edgesOnVertex",
        SourceVariable::int(
            ["nVertices", "vertexDegree"],
            one_based(&edges_on_vertex.concat()),
        ),
    );
    ds.add_variable(
        "cellsOnEdge",
        SourceVariable::int(["nEdges", "TWO"], one_based(&cells_on_edge.concat())),
    );
    ds.add_variable(
        "verticesOnEdge",
        SourceVariable::int(["nEdges", "TWO"], one_based(&vertices_on_edge.concat())),
    );
    ds
}

/// UGRID dataset for the level-1 icosphere with 1-based connectivity.
pub fn ugrid_icosphere() -> SourceDataset {
    let (nodes, faces) = icosphere(1);
    let (lon, lat) = lonlat(&nodes);
    let mut ds = SourceDataset::new();
    ds.add_dimension("nMesh2_node", nodes.len())
        .add_dimension("nMesh2_face", faces.len())
        .add_dimension("nMaxMesh2_face_nodes", 4);
    ds.add_variable(
        "Mesh2",
        SourceVariable::container()
            .with_attribute("cf_role", "mesh_topology")
            .with_attribute("topology_dimension", 2_i64)
            .with_attribute("node_coordinates", "Mesh2_node_x Mesh2_node_y")
            .with_attribute("face_node_connectivity", "Mesh2_face_nodes"),
    );
    ds.add_variable(
        "Mesh2_node_x",
        SourceVariable::float(["nMesh2_node"], lon).with_attribute("units", "degrees_east"),
    );
    ds.add_variable(
        "Mesh2_node_y",
        SourceVariable::float(["nMesh2_node"], lat).with_attribute("units", "degrees_north"),
    );
    let mut conn = Vec::with_capacity(faces.len() * 4);
    for f in &faces {
        conn.extend(f.iter().map(|&i| i as i64 + 1));
        conn.push(-999);
    }
    ds.add_variable(
        "Mesh2_face_nodes",
        SourceVariable::int(["nMesh2_face", "nMaxMesh2_face_nodes"], conn)
            .with_attribute("start_index", 1_i64)
            .with_attribute("_FillValue", -999_i64),
    );
    ds
}

/// SCRIP dataset for the level-1 icosphere, every cell stored as a quad
/// with its last corner repeated.
pub fn scrip_icosphere() -> SourceDataset {
    let (nodes, faces) = icosphere(1);
    let (lon, lat) = lonlat(&nodes);
    let mut corner_lon = Vec::with_capacity(faces.len() * 4);
    let mut corner_lat = Vec::with_capacity(faces.len() * 4);
    for &[a, b, c] in &faces {
        for i in [a, b, c, c] {
            corner_lon.push(lon[i]);
            corner_lat.push(lat[i]);
        }
    }
    let mut ds = SourceDataset::new();
    ds.add_dimension("grid_size", faces.len()).add_dimension("grid_corners", 4);
    ds.add_variable(
        "grid_corner_lon",
        SourceVariable::float(["grid_size", "grid_corners"], corner_lon)
            .with_attribute("units", "degrees"),
    );
    ds.add_variable(
        "grid_corner_lat",
        SourceVariable::float(["grid_size", "grid_corners"], corner_lat)
            .with_attribute("units", "degrees"),
    );
    ds
}
