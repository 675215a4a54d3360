//! Supplementary grid validation.
//!
//! [`GridTopology::try_new`](crate::topology::grid::GridTopology::try_new)
//! already rejects anything that would make the topology unusable. The checks
//! here find grids that are structurally valid but geometrically suspect, and
//! each can be ignored, logged or turned into an error.

use hashbrown::HashMap;

use crate::data::coordinates::coordinate_key;
use crate::geometry::area::FaceAreaConfig;
use crate::mesh_error::{GridError, TopologyError};
use crate::topology::grid::Grid;

/// Behavior for a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationHandling {
    /// Skip the check.
    Ignore,
    /// Log a warning for each finding.
    #[default]
    Warn,
    /// Return an error on the first finding.
    Error,
}

/// Optional validation toggles for grid checks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridValidationOptions {
    /// Nodes with bit-identical coordinates.
    pub duplicate_nodes: ValidationHandling,
    /// Faces whose computed area is zero, negative or not finite.
    pub non_positive_areas: ValidationHandling,
    /// Area configuration for the area check; the grid's default when `None`.
    pub area_config: Option<FaceAreaConfig>,
}

impl GridValidationOptions {
    /// Every check set to error.
    pub fn strict() -> Self {
        Self {
            duplicate_nodes: ValidationHandling::Error,
            non_positive_areas: ValidationHandling::Error,
            area_config: None,
        }
    }
}

/// Run the supplementary checks on `grid`.
///
/// The area check goes through the grid's face-area cache, so a later request
/// for the same configuration is free.
pub fn validate_grid(grid: &Grid, options: GridValidationOptions) -> Result<(), GridError> {
    let topology = grid.topology();

    if options.duplicate_nodes != ValidationHandling::Ignore {
        let mut seen: HashMap<(u64, u64), usize> = HashMap::with_capacity(topology.n_nodes());
        for (node, [x, y]) in topology.nodes().iter().enumerate() {
            if let Some(&first) = seen.get(&coordinate_key(x, y)) {
                let err = TopologyError::DuplicateNodes {
                    first,
                    second: node,
                };
                report(options.duplicate_nodes, err)?;
            } else {
                seen.insert(coordinate_key(x, y), node);
            }
        }
    }

    if options.non_positive_areas != ValidationHandling::Ignore {
        let config = options
            .area_config
            .unwrap_or_else(|| FaceAreaConfig::for_topology(topology));
        let areas = grid.face_areas(config)?;
        for (face, &area) in areas.areas.iter().enumerate() {
            if !(area > 0.0 && area.is_finite()) {
                report(
                    options.non_positive_areas,
                    TopologyError::NonPositiveArea { face, area },
                )?;
            }
        }
    }

    Ok(())
}

fn report(handling: ValidationHandling, err: TopologyError) -> Result<(), GridError> {
    match handling {
        ValidationHandling::Ignore => Ok(()),
        ValidationHandling::Warn => {
            log::warn!("{err}");
            Ok(())
        }
        ValidationHandling::Error => Err(err.into()),
    }
}
