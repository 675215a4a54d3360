//! GridError: unified error type for mesh-ugrid public APIs
//!
//! Errors are grouped by the stage that detects them: normalizing source
//! arrays ([`FormatError`]), building the canonical topology
//! ([`TopologyError`]) and configuring an area request ([`ConfigError`]).
//! All public fallible APIs return [`GridError`], which converts from each of
//! the three with `?`.

use thiserror::Error;

/// Unified error type for mesh-ugrid operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Source arrays could not be translated into the canonical topology.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatError {
    /// A required variable is absent from the source dataset.
    #[error("Format error: missing variable `{0}`")]
    MissingVariable(String),
    /// A required dimension is not declared.
    #[error("Format error: missing dimension `{0}`")]
    MissingDimension(String),
    /// A required attribute is absent.
    #[error("Format error: variable `{variable}` is missing attribute `{attribute}`")]
    MissingAttribute { variable: String, attribute: String },
    /// A variable refers to a dimension the dataset does not declare.
    #[error("Format error: variable `{variable}` uses undeclared dimension `{dimension}`")]
    UndeclaredDimension { variable: String, dimension: String },
    /// A variable holds floats where integers were expected, or vice versa.
    #[error("Format error: variable `{variable}` must hold {expected} data")]
    WrongKind {
        variable: String,
        expected: &'static str,
    },
    /// Data length or dimension extents disagree.
    #[error("Format error: `{variable}` has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        variable: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// A connectivity entry cannot be interpreted in the source index convention.
    #[error("Format error: `{variable}` entry {value} at row {row} is not a valid index")]
    InvalidIndex {
        variable: String,
        row: usize,
        value: i64,
    },
    /// A per-face vertex count exceeds the declared row width.
    #[error("Format error: `{variable}` row {row} declares {count} vertices, max is {max}")]
    DegreeOutOfRange {
        variable: String,
        row: usize,
        count: i64,
        max: usize,
    },
    /// An attribute value is not one the convention allows.
    #[error("Format error: attribute `{attribute}` has unsupported value `{value}`")]
    InvalidAttribute { attribute: String, value: String },
    /// None of the supported conventions matches the dataset.
    #[error("Format error: could not identify the grid convention of the source dataset")]
    UnknownFormat,
}

/// The canonical topology invariants do not hold.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    /// Longitude/x and latitude/y arrays disagree in length.
    #[error("Topology error: {what} has {found} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A coordinate is NaN or infinite.
    #[error("Topology error: {what} entry {index} is not finite")]
    NonFiniteCoordinate { what: &'static str, index: usize },
    /// A face references a node index outside `0..n_nodes`.
    #[error("Topology error: face {face} references node {node}, but only {n_nodes} nodes exist")]
    FaceNodeOutOfRange {
        face: usize,
        node: usize,
        n_nodes: usize,
    },
    /// An edge references a node index outside `0..n_nodes`.
    #[error("Topology error: edge {edge} references node {node}, but only {n_nodes} nodes exist")]
    EdgeNodeOutOfRange {
        edge: usize,
        node: usize,
        n_nodes: usize,
    },
    /// A face references an edge index outside `0..n_edges`.
    #[error("Topology error: face {face} references edge {edge}, but only {n_edges} edges exist")]
    FaceEdgeOutOfRange {
        face: usize,
        edge: usize,
        n_edges: usize,
    },
    /// A face side has no entry in the supplied edge table.
    #[error("Topology error: side ({a}, {b}) of face {face} is not in the edge table")]
    MissingEdge { face: usize, a: usize, b: usize },
    /// A face has fewer than three valid vertices.
    #[error("Topology error: face {face} has {count} valid vertices (at least 3 required)")]
    DegenerateFace { face: usize, count: usize },
    /// A valid index appears after the fill sentinel in a padded row.
    #[error("Topology error: face {face} has a valid index after fill padding")]
    InteriorFill { face: usize },
    /// A face lists the same node twice.
    #[error("Topology error: face {face} repeats node {node}")]
    RepeatedNode { face: usize, node: usize },
    /// The declared row width disagrees with the widest face.
    #[error("Topology error: max face degree is {declared}, but the widest face has {actual} vertices")]
    MaxFaceDegreeMismatch { declared: usize, actual: usize },
    /// A connectivity row has the wrong width.
    #[error("Topology error: {what} rows have width {found}, expected {expected}")]
    RowWidthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// The sphere radius is not positive and finite.
    #[error("Topology error: sphere radius {0} must be positive and finite")]
    InvalidRadius(f64),
    /// Supplementary validation found duplicate node coordinates.
    #[error("Topology error: nodes {first} and {second} share coordinates")]
    DuplicateNodes { first: usize, second: usize },
    /// Supplementary validation found a face with non-positive area.
    #[error("Topology error: face {face} has non-positive area {area}")]
    NonPositiveArea { face: usize, area: f64 },
}

/// An area request or configuration value is not supported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The (rule, order) pair has no quadrature table.
    #[error("Config error: {rule} quadrature does not support order {order}")]
    UnsupportedQuadrature { rule: &'static str, order: u32 },
    /// Unrecognised quadrature rule name.
    #[error("Config error: unknown quadrature rule `{0}`")]
    UnknownQuadratureRule(String),
    /// Unrecognised coordinate-system name.
    #[error("Config error: unknown coordinate system `{0}`")]
    UnknownCoordinateSystem(String),
    /// The requested coordinate system contradicts the grid's sphere flag.
    #[error("Config error: {requested} integration requested on a grid {actual}")]
    CoordinateSystemMismatch {
        requested: &'static str,
        actual: &'static str,
    },
}
