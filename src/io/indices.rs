//! Translation of source connectivity indices into canonical form.
//!
//! Source conventions disagree on where indices start and on how a missing
//! entry is spelled: MPAS is 1-based and pads with `0`, UGRID declares a
//! `start_index` and a `_FillValue`, and both sometimes use negative values.
//! Everything leaving this module is zero-based with [`INT_FILL_VALUE`]
//! padding.

use crate::mesh_error::FormatError;
use crate::topology::connectivity::{Connectivity, INT_FILL_VALUE};

/// How a source convention encodes connectivity indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexConvention {
    /// Index of the first element (0 or 1).
    pub start_index: i64,
    /// Explicit missing-value marker, e.g. a `_FillValue` attribute.
    pub missing: Option<i64>,
    /// Treat negative values as missing instead of rejecting them.
    pub negative_is_missing: bool,
}

impl IndexConvention {
    /// 1-based indices padded with zero (MPAS).
    pub const ONE_BASED_ZERO_PADDED: Self = Self {
        start_index: 1,
        missing: None,
        negative_is_missing: false,
    };

    /// UGRID-style convention with the given start index and fill value.
    pub fn ugrid(start_index: i64, fill_value: Option<i64>) -> Self {
        Self {
            start_index,
            missing: fill_value,
            negative_is_missing: true,
        }
    }

    /// Canonical form of a single entry, or `None` if it is not an index.
    #[inline]
    pub fn translate(&self, value: i64) -> Option<usize> {
        if self.missing == Some(value) {
            return Some(INT_FILL_VALUE);
        }
        if value < 0 {
            return self.negative_is_missing.then_some(INT_FILL_VALUE);
        }
        if value < self.start_index {
            // 0 in a 1-based array is padding
            return Some(INT_FILL_VALUE);
        }
        usize::try_from(value - self.start_index).ok()
    }
}

/// Translate a row-major `rows × n_cols` array of source indices.
///
/// # Errors
/// [`FormatError::InvalidIndex`] for entries the convention cannot interpret.
pub fn to_canonical(
    variable: &str,
    raw: &[i64],
    n_cols: usize,
    convention: IndexConvention,
) -> Result<Connectivity, FormatError> {
    let width = n_cols.max(1);
    let data = raw
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            convention
                .translate(value)
                .ok_or_else(|| FormatError::InvalidIndex {
                    variable: variable.to_string(),
                    row: i / width,
                    value,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Connectivity::try_new(data, n_cols).map_err(|_| FormatError::ShapeMismatch {
        variable: variable.to_string(),
        expected: vec![raw.len() / width, n_cols],
        found: vec![raw.len()],
    })
}

/// Shorthand for 1-based, zero-padded arrays.
pub fn one_based_zero_padded(
    variable: &str,
    raw: &[i64],
    n_cols: usize,
) -> Result<Connectivity, FormatError> {
    to_canonical(variable, raw, n_cols, IndexConvention::ONE_BASED_ZERO_PADDED)
}

/// Blank out every entry of row `i` at or past `counts[i]`.
///
/// # Errors
/// [`FormatError::DegreeOutOfRange`] if a count is negative or wider than
/// the table.
pub fn mask_by_counts(
    variable: &str,
    table: &Connectivity,
    counts: &[i64],
) -> Result<Connectivity, FormatError> {
    let n_cols = table.n_cols();
    if counts.len() != table.n_rows() {
        return Err(FormatError::ShapeMismatch {
            variable: variable.to_string(),
            expected: vec![table.n_rows()],
            found: vec![counts.len()],
        });
    }
    let mut data = Vec::with_capacity(table.as_slice().len());
    for (row_index, (row, &count)) in table.rows().zip(counts).enumerate() {
        let keep = usize::try_from(count)
            .ok()
            .filter(|&c| c <= n_cols)
            .ok_or_else(|| FormatError::DegreeOutOfRange {
                variable: variable.to_string(),
                row: row_index,
                count,
                max: n_cols,
            })?;
        data.extend_from_slice(&row[..keep]);
        data.extend(std::iter::repeat_n(INT_FILL_VALUE, n_cols - keep));
    }
    Connectivity::try_new(data, n_cols).map_err(|_| FormatError::ShapeMismatch {
        variable: variable.to_string(),
        expected: vec![table.n_rows(), n_cols],
        found: vec![table.as_slice().len()],
    })
}
