//! Output pattern of C = A*B, produced by the symbolic pass
//!
//! The numeric kernel trusts that the rows listed for each output column are
//! exactly the rows its sweep will touch. Structural validity (pointer
//! layout, in-bounds rows, and optionally sorted rows) is checked at entry;
//! completeness is only checked by debug assertions inside the accumulator.

use std::ops::Range;

use crate::error::{Result, SpgemmError};
use crate::matrix::config::PatternCheck;
use crate::matrix::hyper::check_col_ids;
use crate::matrix::{check_pointers, check_rows, HypersparseCSC, SparseMatrix, SparseMatrixCSC};

/// Column pointers, optional column ids, and row indices of C
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPattern {
    /// Rows of C (equals A.n_rows)
    pub n_rows: usize,

    /// Columns of C (equals B.n_cols)
    pub n_cols: usize,

    /// Logical column of each stored slot; `None` for the dense-indexed layout
    pub col_ids: Option<Vec<usize>>,

    /// Slot pointers (size: nvec + 1)
    pub col_ptr: Vec<usize>,

    /// Row indices of every output entry, ascending within each column
    pub row_idx: Vec<usize>,
}

impl OutputPattern {
    /// Dense-indexed pattern: one slot per column
    pub fn standard(n_rows: usize, n_cols: usize, col_ptr: Vec<usize>, row_idx: Vec<usize>) -> Self {
        Self {
            n_rows,
            n_cols,
            col_ids: None,
            col_ptr,
            row_idx,
        }
    }

    /// Hypersparse pattern: slots only for the listed columns
    pub fn hypersparse(
        n_rows: usize,
        n_cols: usize,
        col_ids: Vec<usize>,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
    ) -> Self {
        Self {
            n_rows,
            n_cols,
            col_ids: Some(col_ids),
            col_ptr,
            row_idx,
        }
    }

    pub fn is_hypersparse(&self) -> bool {
        self.col_ids.is_some()
    }

    /// Number of stored column slots
    pub fn nvec(&self) -> usize {
        match &self.col_ids {
            Some(ids) => ids.len(),
            None => self.n_cols,
        }
    }

    /// Number of output entries
    pub fn nnz(&self) -> usize {
        self.row_idx.len()
    }

    /// Logical column held by `slot`
    #[inline]
    pub fn col_id(&self, slot: usize) -> usize {
        match &self.col_ids {
            Some(ids) => ids[slot],
            None => slot,
        }
    }

    /// Output positions of `slot`
    #[inline]
    pub fn slot_range(&self, slot: usize) -> Range<usize> {
        self.col_ptr[slot]..self.col_ptr[slot + 1]
    }

    /// Validates the pattern's structure
    ///
    /// # Errors
    ///
    /// Returns [`SpgemmError::MalformedPattern`] naming the first violation.
    pub fn validate(&self, check: PatternCheck) -> Result<()> {
        if let Some(ids) = &self.col_ids {
            check_col_ids(self.n_cols, ids).map_err(SpgemmError::pattern)?;
        }
        let vectors = if self.is_hypersparse() { "nvec" } else { "n_cols" };
        check_pointers(self.nvec(), vectors, &self.col_ptr, self.row_idx.len())
            .map_err(SpgemmError::pattern)?;

        // Out-of-range rows would index past the workspace, so every level checks them
        if let Some(&row) = self.row_idx.iter().find(|&&r| r >= self.n_rows) {
            return Err(SpgemmError::pattern(format!(
                "Row index {} out of bounds (n_rows = {})",
                row, self.n_rows
            )));
        }

        if check == PatternCheck::Full {
            check_rows(self.n_rows, &self.col_ptr, &self.row_idx).map_err(SpgemmError::pattern)?;
        }
        Ok(())
    }

    /// Attaches computed values, producing a matrix in the pattern's layout
    ///
    /// # Errors
    ///
    /// Returns [`SpgemmError::OutputLength`] if `values` is not sized to the pattern.
    pub fn into_matrix<Z: Copy>(self, values: Vec<Z>) -> Result<SparseMatrix<Z>> {
        if values.len() != self.row_idx.len() {
            return Err(SpgemmError::OutputLength {
                expected: self.row_idx.len(),
                got: values.len(),
            });
        }

        Ok(match self.col_ids {
            Some(col_ids) => SparseMatrix::Hypersparse(HypersparseCSC {
                n_rows: self.n_rows,
                n_cols: self.n_cols,
                col_ids,
                col_ptr: self.col_ptr,
                row_idx: self.row_idx,
                values,
            }),
            None => SparseMatrix::Standard(SparseMatrixCSC {
                n_rows: self.n_rows,
                n_cols: self.n_cols,
                col_ptr: self.col_ptr,
                row_idx: self.row_idx,
                values,
            }),
        })
    }
}
