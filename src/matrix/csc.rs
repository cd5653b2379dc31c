//! Compressed Sparse Column (CSC) matrix format implementation

use std::fmt;
use std::ops::Range;

use num_traits::Num;

use crate::constants::{DEBUG_MAX_COLUMNS, DEBUG_MAX_ENTRIES};
use crate::error::{Result, SpgemmError};
use crate::matrix::check_compressed;

/// A sparse matrix in Compressed Sparse Column (CSC) format
///
/// The CSC format stores a sparse matrix using three arrays:
/// - col_ptr: Array of size n_cols + 1 containing indices into row_idx and values arrays
/// - row_idx: Array of size nnz containing row indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Every logical column has a slot in `col_ptr`, so this is the
/// dense-indexed representation: looking up a column is a direct index.
/// Row indices are strictly ascending within each column.
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSC<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Column pointers (size: n_cols + 1)
    /// col_ptr[j] is the index in row_idx and values where column j starts
    /// col_ptr[n_cols] is equal to nnz
    pub col_ptr: Vec<usize>,

    /// Row indices (size: nnz)
    pub row_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T: Copy> SparseMatrixCSC<T> {
    /// Creates a new CSC matrix, validating its structure
    ///
    /// # Errors
    ///
    /// Returns [`SpgemmError::MalformedMatrix`] if:
    /// - col_ptr.len() is not n_cols + 1, or col_ptr is not monotone from 0 to nnz
    /// - row_idx.len() differs from values.len()
    /// - any column has row indices out of bounds or not strictly ascending
    pub fn try_new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_idx.len() != values.len() {
            return Err(SpgemmError::malformed(
                "CSC matrix",
                format!(
                    "row_idx.len() ({}) must equal values.len() ({})",
                    row_idx.len(),
                    values.len()
                ),
            ));
        }
        check_compressed(n_rows, n_cols, "n_cols", &col_ptr, &row_idx)
            .map_err(|reason| SpgemmError::malformed("CSC matrix", reason))?;

        Ok(Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// Creates a new CSC matrix with the given dimensions and data
    ///
    /// # Panics
    ///
    /// Panics with the [`try_new`](Self::try_new) error message if the
    /// input arrays are inconsistent.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        match Self::try_new(n_rows, n_cols, col_ptr, row_idx, values) {
            Ok(matrix) => matrix,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty matrix with the given dimensions
    pub fn empty(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            col_ptr: vec![0; n_cols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Builds a matrix from per-column `(row, value)` lists
    ///
    /// Each list must already be sorted by row.
    pub fn from_columns(n_rows: usize, columns: &[Vec<(usize, T)>]) -> Result<Self> {
        let mut col_ptr = Vec::with_capacity(columns.len() + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();

        col_ptr.push(0);
        for column in columns {
            for &(row, val) in column {
                row_idx.push(row);
                values.push(val);
            }
            col_ptr.push(row_idx.len());
        }

        Self::try_new(n_rows, columns.len(), col_ptr, row_idx, values)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Half-open range of stored positions for column j
    pub fn col_range(&self, j: usize) -> Range<usize> {
        self.col_ptr[j]..self.col_ptr[j + 1]
    }

    /// Returns an iterator over the non-zero elements in column j
    ///
    /// Each item is a tuple (row_idx, value) representing a non-zero element
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(j < self.n_cols, "Column index out of bounds");

        let range = self.col_range(j);

        self.row_idx[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&row, val)| (row, val))
    }
}

impl<T: Copy + Num> SparseMatrixCSC<T> {
    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            col_ptr: (0..=n).collect(),
            row_idx: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SparseMatrixCSC<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSC {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.values.len())?;

        let max_cols_to_print = DEBUG_MAX_COLUMNS.min(self.n_cols);

        if max_cols_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for j in 0..max_cols_to_print {
                write!(f, "    col {}: ", j)?;
                let start = self.col_ptr[j];
                let end = self.col_ptr[j + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = DEBUG_MAX_ENTRIES.min(end - start);

                    for i in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.row_idx[i], self.values[i])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_cols > max_cols_to_print {
                writeln!(f, "    ... ({} more columns)", self.n_cols - max_cols_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
