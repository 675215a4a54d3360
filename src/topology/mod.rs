//! Top-level module for the canonical grid topology.
//!
//! This module provides the normalized in-memory mesh every source convention
//! is translated into. It includes:
//! - Fill-padded connectivity tables and the shared fill sentinel
//! - The validated [`GridTopology`] and the shared [`Grid`] handle
//! - Edge derivation for conventions that only store faces
//! - The per-grid face-area cache
//! - Supplementary geometric validation
//!
//! Most users obtain a `Grid` from [`crate::io::open_grid`] and query it for
//! face areas.

pub mod cache;
pub mod connectivity;
pub mod edges;
pub mod grid;
pub mod validation;

pub use cache::{FaceAreaCache, InvalidateCache};
pub use connectivity::{Connectivity, INT_FILL_VALUE};
pub use grid::{Grid, GridAttributes, GridTopology, TopologyParts};
pub use validation::{GridValidationOptions, ValidationHandling, validate_grid};
