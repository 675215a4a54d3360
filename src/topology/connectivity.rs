//! Padded, row-major connectivity arrays.
//!
//! Every connectivity array in the canonical topology (face→node, edge→node,
//! face→edge) is stored as a dense `n_rows × n_cols` table of zero-based
//! indices. Rows shorter than `n_cols` are right-padded with
//! [`INT_FILL_VALUE`], the single sentinel shared by every array the crate
//! produces.

use crate::mesh_error::TopologyError;

/// Reserved index marking "no entry" in padded connectivity rows.
///
/// Never a valid node, edge or face index.
pub const INT_FILL_VALUE: usize = usize::MAX;

/// Dense connectivity table with fill-sentinel padding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Connectivity {
    data: Vec<usize>,
    n_cols: usize,
}

impl Connectivity {
    /// Wrap row-major `data` with rows of width `n_cols`.
    pub fn try_new(data: Vec<usize>, n_cols: usize) -> Result<Self, TopologyError> {
        let fits = if n_cols == 0 {
            data.is_empty()
        } else {
            data.len() % n_cols == 0
        };
        if !fits {
            return Err(TopologyError::RowWidthMismatch {
                what: "connectivity",
                expected: n_cols,
                found: data.len(),
            });
        }
        Ok(Self { data, n_cols })
    }

    /// Build a table from variable-length rows, padding each to the widest.
    pub fn from_rows<R, I>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = usize>,
    {
        let rows: Vec<Vec<usize>> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for row in rows {
            let len = row.len();
            data.extend(row);
            data.extend(std::iter::repeat_n(INT_FILL_VALUE, n_cols - len));
        }
        Self { data, n_cols }
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        if self.n_cols == 0 {
            0
        } else {
            self.data.len() / self.n_cols
        }
    }

    /// Row width, including padding.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Raw row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.data
    }

    /// Full padded row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[usize] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Row `i` up to (not including) its first fill sentinel.
    #[inline]
    pub fn valid_row(&self, i: usize) -> &[usize] {
        let row = self.row(i);
        &row[..valid_len(row)]
    }

    /// Iterate padded rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        // chunks_exact panics on zero width
        self.data.chunks_exact(self.n_cols.max(1))
    }

    /// Number of valid entries in every row.
    pub fn degrees(&self) -> Vec<usize> {
        self.rows().map(valid_len).collect()
    }

    /// Drop trailing columns that hold only padding.
    pub fn trim_to_widest(&mut self) {
        let width = self
            .rows()
            .map(|r| r.iter().rposition(|&v| v != INT_FILL_VALUE).map_or(0, |i| i + 1))
            .max()
            .unwrap_or(0);
        // an all-padding table keeps its shape so empty rows stay visible
        if width == self.n_cols || width == 0 {
            return;
        }
        let rows: Vec<Vec<usize>> = self.rows().map(|r| r[..width].to_vec()).collect();
        self.data = rows.into_iter().flatten().collect();
        self.n_cols = width;
    }

    /// Move the valid entries of every row to the front, keeping their order.
    pub fn compact_rows(&mut self) {
        let n_cols = self.n_cols;
        for row in self.data.chunks_exact_mut(n_cols.max(1)) {
            let mut write = 0;
            for read in 0..row.len() {
                if row[read] != INT_FILL_VALUE {
                    row[write] = row[read];
                    write += 1;
                }
            }
            row[write..].fill(INT_FILL_VALUE);
        }
    }
}

/// Count of entries before the first fill sentinel.
#[inline]
pub fn valid_len(row: &[usize]) -> usize {
    row.iter()
        .position(|&v| v == INT_FILL_VALUE)
        .unwrap_or(row.len())
}
