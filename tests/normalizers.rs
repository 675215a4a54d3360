mod util;
use mesh_ugrid::geometry::{CoordinateSystem, FaceAreaConfig};
use mesh_ugrid::io::{
    GridOptions, GridReader, MpasReader, ScripReader, SourceFormat, SourceVariable, UgridReader,
    open_grid,
};
use mesh_ugrid::mesh_error::{FormatError, GridError, TopologyError};
use mesh_ugrid::quadrature::{QuadratureConfig, QuadratureRule};
use mesh_ugrid::topology::INT_FILL_VALUE;
use util::*;

fn gauss10() -> FaceAreaConfig {
    FaceAreaConfig::spherical(QuadratureConfig::new(QuadratureRule::Gaussian, 10).unwrap())
}

#[test]
fn mpas_primal_is_hexagons_and_pentagons() {
    let grid = MpasReader::primal().read(&mpas_icosphere()).unwrap();
    let topo = grid.topology();
    assert_eq!(topo.n_nodes(), 80);
    assert_eq!(topo.n_faces(), 42);
    assert_eq!(topo.max_face_degree(), 6);
    assert_eq!(topo.nodes_per_face().iter().filter(|&&k| k == 5).count(), 12);
    assert_eq!(topo.nodes_per_face().iter().filter(|&&k| k == 6).count(), 30);
    assert_eq!(topo.n_edges(), 120);
    assert_eq!(topo.face_edges().n_cols(), 6);
    // pentagon rows are padded after their fifth vertex
    let pentagon = topo.nodes_per_face().iter().position(|&k| k == 5).unwrap();
    assert_eq!(topo.face_nodes().row(pentagon)[5], INT_FILL_VALUE);
}

#[test]
fn mpas_dual_swaps_node_and_center_roles() {
    let ds = mpas_icosphere();
    let primal = MpasReader::primal().read(&ds).unwrap();
    let dual = MpasReader::dual().read(&ds).unwrap();
    let (p, d) = (primal.topology(), dual.topology());

    let primal_centers = p.face_centers().unwrap();
    let dual_centers = d.face_centers().unwrap();
    assert_eq!(d.nodes().x(), primal_centers.x());
    assert_eq!(d.nodes().y(), primal_centers.y());
    assert_eq!(p.nodes().x(), dual_centers.x());
    assert_eq!(p.nodes().y(), dual_centers.y());

    assert_eq!(d.n_faces(), 80);
    assert_eq!(d.max_face_degree(), 3);
    assert_eq!(d.n_edges(), p.n_edges());
    // cellsOnVertex row 0 is the first icosphere triangle, shifted to 0-based
    let (_, triangles) = icosphere(1);
    assert_eq!(d.face(0), &triangles[0]);
}

#[test]
fn mpas_meshes_cover_the_sphere() {
    let ds = mpas_icosphere();
    for reader in [MpasReader::primal(), MpasReader::dual()] {
        let grid = reader.read(&ds).unwrap();
        let total = grid.total_face_area(gauss10()).unwrap();
        assert!(
            (total - FOUR_PI).abs() < 1e-9,
            "use_dual={}: {total}",
            reader.use_dual
        );
    }
}

#[test]
fn mpas_radius_attribute_and_override() {
    let mut ds = mpas_icosphere();
    ds.add_attribute("sphere_radius", 2.0);
    let grid = MpasReader::dual().read(&ds).unwrap();
    assert_eq!(grid.topology().attributes().sphere_radius, 2.0);
    let total = grid.total_face_area(gauss10()).unwrap();
    assert!((total - 4.0 * FOUR_PI).abs() < 1e-8);

    let options = GridOptions {
        use_dual: true,
        sphere_radius: Some(3.0),
        ..Default::default()
    };
    let grid = open_grid(&ds, &options).unwrap();
    assert_eq!(grid.topology().attributes().sphere_radius, 3.0);
}

#[test]
fn mpas_dual_boundary_rows_are_compacted() {
    let mut ds = mpas_icosphere();
    // knock one cell out of the first dual triangle and widen the rows
    let (_, triangles) = icosphere(1);
    let mut rows: Vec<i64> = Vec::new();
    for (t, tri) in triangles.iter().enumerate() {
        let mut row: Vec<i64> = tri.iter().map(|&c| c as i64 + 1).collect();
        if t == 0 {
            row[0] = 0;
        }
        row.push(0);
        rows.extend(row);
    }
    ds.add_dimension("vertexDegreeWide", 4);
    ds.add_variable(
        "cellsOnVertex",
        SourceVariable::int(["nVertices", "vertexDegreeWide"], rows),
    );
    ds.add_variable(
        "edgesOnVertex",
        SourceVariable::int(["nVertices", "vertexDegreeWide"], vec![0; 80 * 4]),
    );
    let err = MpasReader::dual().read(&ds).unwrap_err();
    // two cells left: compaction keeps them, the polygon is degenerate
    assert_eq!(
        err,
        GridError::Topology(TopologyError::DegenerateFace { face: 0, count: 2 })
    );
}

#[test]
fn ugrid_round_trips_the_icosphere() {
    let ds = ugrid_icosphere();
    assert_eq!(SourceFormat::detect(&ds), Ok(SourceFormat::Ugrid));
    let grid = open_grid(&ds, &GridOptions::default()).unwrap();
    let reference = icosphere_grid(1.0);
    assert_eq!(grid.topology().face_nodes(), reference.topology().face_nodes());
    assert_eq!(grid.topology().max_face_degree(), 3);
    assert_eq!(grid.source_format(), Some(SourceFormat::Ugrid));
    assert_eq!(
        FaceAreaConfig::for_topology(grid.topology()).coordinate_system,
        CoordinateSystem::Spherical
    );
}

#[test]
fn scrip_recovers_shared_nodes() {
    let ds = scrip_icosphere();
    assert_eq!(SourceFormat::detect(&ds), Ok(SourceFormat::Scrip));
    let grid = ScripReader::default().read(&ds).unwrap();
    let topo = grid.topology();
    assert_eq!(topo.n_nodes(), 42);
    assert_eq!(topo.n_faces(), 80);
    assert_eq!(topo.max_face_degree(), 3);
    let total = grid.total_face_area(gauss10()).unwrap();
    assert!((total - FOUR_PI).abs() < 1e-9);
}

#[test]
fn every_reader_uses_the_same_sentinel() {
    let readers: [(&dyn GridReader, _); 3] = [
        (&MpasReader::primal(), mpas_icosphere()),
        (&UgridReader::default(), ugrid_icosphere()),
        (&ScripReader::default(), scrip_icosphere()),
    ];
    for (reader, ds) in readers {
        let grid = reader.read(&ds).unwrap();
        assert_eq!(grid.source_format(), Some(reader.format()));
        let topo = grid.topology();
        for row in topo.face_nodes().rows() {
            assert!(
                row.iter()
                    .all(|&n| n == INT_FILL_VALUE || n < topo.n_nodes())
            );
        }
    }
}

#[test]
fn explicit_format_skips_detection() {
    let ds = ugrid_icosphere();
    let options = GridOptions {
        format: Some(SourceFormat::Scrip),
        ..Default::default()
    };
    assert_eq!(
        open_grid(&ds, &options).unwrap_err(),
        GridError::Format(FormatError::MissingVariable("grid_corner_lon".into()))
    );
}

#[test]
fn connectivity_width_must_match_declared_dimension() {
    let mut ds = ugrid_icosphere();
    ds.add_dimension("nMaxMesh2_face_nodes", 5);
    assert!(matches!(
        open_grid(&ds, &GridOptions::default()),
        Err(GridError::Format(FormatError::ShapeMismatch { .. }))
    ));
}
