//! Hypersparse compressed-column format
//!
//! Only populated columns are stored. `col_ids[s]` maps stored slot `s` to
//! its logical column, so finding a column means searching `col_ids`.
//! Callers that probe a non-decreasing sequence of columns can carry a
//! [`SearchBracket`] between probes so each search only covers the slots
//! that can still match.

use std::fmt;
use std::ops::Range;

use crate::constants::{DEBUG_MAX_COLUMNS, DEBUG_MAX_ENTRIES};
use crate::error::{Result, SpgemmError};
use crate::matrix::check_compressed;

/// Half-open window `[left, right)` of stored slots still eligible to match
///
/// `left` only moves right as probes advance; `right` only moves left when
/// trimmed. An empty window (`left >= right`) matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBracket {
    /// First slot that can still match
    pub left: usize,
    /// One past the last slot that can still match
    pub right: usize,
}

impl SearchBracket {
    /// Bracket spanning `nvec` stored slots
    pub fn full(nvec: usize) -> Self {
        Self { left: 0, right: nvec }
    }

    /// Number of slots still inside the bracket
    pub fn len(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    /// True if no slot can match any more
    pub fn is_empty(&self) -> bool {
        self.left >= self.right
    }
}

/// A sparse matrix in hypersparse CSC format
#[derive(Clone, PartialEq)]
pub struct HypersparseCSC<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of logical columns in the matrix
    pub n_cols: usize,

    /// Logical column id of each stored slot (size: nvec), strictly ascending
    pub col_ids: Vec<usize>,

    /// Slot pointers (size: nvec + 1)
    pub col_ptr: Vec<usize>,

    /// Row indices (size: nnz)
    pub row_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T: Copy> HypersparseCSC<T> {
    /// Creates a new hypersparse matrix, validating its structure
    ///
    /// # Errors
    ///
    /// Returns [`SpgemmError::MalformedMatrix`] if `col_ids` is not strictly
    /// ascending or exceeds `n_cols`, if `col_ptr.len() != col_ids.len() + 1`,
    /// or if any stored column has unsorted or out-of-bounds row indices.
    pub fn try_new(
        n_rows: usize,
        n_cols: usize,
        col_ids: Vec<usize>,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_idx.len() != values.len() {
            return Err(SpgemmError::malformed(
                "hypersparse matrix",
                format!(
                    "row_idx.len() ({}) must equal values.len() ({})",
                    row_idx.len(),
                    values.len()
                ),
            ));
        }
        check_col_ids(n_cols, &col_ids)
            .map_err(|reason| SpgemmError::malformed("hypersparse matrix", reason))?;
        check_compressed(n_rows, col_ids.len(), "nvec", &col_ptr, &row_idx)
            .map_err(|reason| SpgemmError::malformed("hypersparse matrix", reason))?;

        Ok(Self {
            n_rows,
            n_cols,
            col_ids,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// Creates a new hypersparse matrix
    ///
    /// # Panics
    ///
    /// Panics with the [`try_new`](Self::try_new) error message if the
    /// input arrays are inconsistent.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_ids: Vec<usize>,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        match Self::try_new(n_rows, n_cols, col_ids, col_ptr, row_idx, values) {
            Ok(matrix) => matrix,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a matrix with no stored columns
    pub fn empty(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            col_ids: Vec::new(),
            col_ptr: vec![0],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of stored column slots
    pub fn nvec(&self) -> usize {
        self.col_ids.len()
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Half-open range of stored positions for slot `s`
    pub fn slot_range(&self, s: usize) -> Range<usize> {
        self.col_ptr[s]..self.col_ptr[s + 1]
    }

    /// Finds column `col` within `bracket`, narrowing `bracket.left`
    ///
    /// On a hit `left` moves to the matching slot, on a miss to the slot where
    /// `col` would have been. Either way slots left of the new `left` hold
    /// ids smaller than `col` and can never match a later, larger probe.
    /// Returns `None` if the column is absent or has no stored entries.
    pub fn lookup_bracketed(&self, col: usize, bracket: &mut SearchBracket) -> Option<Range<usize>> {
        if bracket.is_empty() {
            return None;
        }

        match self.col_ids[bracket.left..bracket.right].binary_search(&col) {
            Ok(offset) => {
                let slot = bracket.left + offset;
                bracket.left = slot;
                let range = self.slot_range(slot);
                if range.is_empty() {
                    None
                } else {
                    Some(range)
                }
            }
            Err(offset) => {
                bracket.left += offset;
                None
            }
        }
    }

    /// Shrinks `bracket.right` to drop every slot whose id exceeds `max_col`
    pub fn trim_right(&self, max_col: usize, bracket: &mut SearchBracket) {
        if bracket.is_empty() {
            return;
        }
        let kept = self.col_ids[bracket.left..bracket.right].partition_point(|&id| id <= max_col);
        bracket.right = bracket.left + kept;
    }

    /// Returns an iterator over the non-zero elements in logical column j
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(j < self.n_cols, "Column index out of bounds");

        let range = self
            .lookup_bracketed(j, &mut SearchBracket::full(self.nvec()))
            .unwrap_or(0..0);

        self.row_idx[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&row, val)| (row, val))
    }
}

/// Validates a hypersparse column-id list
pub(crate) fn check_col_ids(n_cols: usize, col_ids: &[usize]) -> std::result::Result<(), String> {
    if let Some(&last) = col_ids.last() {
        if last >= n_cols {
            return Err(format!(
                "column id {} out of bounds (n_cols = {})",
                last, n_cols
            ));
        }
    }
    if let Some(pos) = col_ids.windows(2).position(|w| w[0] >= w[1]) {
        return Err(format!(
            "col_ids must be strictly ascending (slot {}: {} then {})",
            pos,
            col_ids[pos],
            col_ids[pos + 1]
        ));
    }
    Ok(())
}

impl<T: fmt::Debug> fmt::Debug for HypersparseCSC<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HypersparseCSC {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nvec: {}, nnz: {}", self.col_ids.len(), self.values.len())?;

        let max_slots = DEBUG_MAX_COLUMNS.min(self.col_ids.len());
        for s in 0..max_slots {
            write!(f, "    col {}: ", self.col_ids[s])?;
            let start = self.col_ptr[s];
            let end = self.col_ptr[s + 1];
            let shown = DEBUG_MAX_ENTRIES.min(end - start);
            for p in start..start + shown {
                write!(f, "({}, {:?}) ", self.row_idx[p], self.values[p])?;
            }
            if end - start > shown {
                write!(f, "... ({} more)", end - start - shown)?;
            }
            writeln!(f)?;
        }
        if self.col_ids.len() > max_slots {
            writeln!(f, "    ... ({} more columns)", self.col_ids.len() - max_slots)?;
        }

        write!(f, "}}")
    }
}
