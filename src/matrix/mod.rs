// Matrix data structures and operations

pub mod config;
pub mod conversion;
pub mod csc;
pub mod hyper;
pub mod pattern;
pub mod reference;
pub mod view;

use ndarray::Array2;

pub use config::{MultiplyConfig, PatternCheck};
pub use csc::SparseMatrixCSC;
pub use hyper::{HypersparseCSC, SearchBracket};
pub use pattern::OutputPattern;
pub use reference::reference_spgemm;
pub use view::{ColumnLookup, SparseMatrixView};

/// An owned compressed-column matrix in either representation
#[derive(Debug, Clone, PartialEq)]
pub enum SparseMatrix<T> {
    /// Every logical column has a pointer slot
    Standard(SparseMatrixCSC<T>),
    /// Only populated columns are stored
    Hypersparse(HypersparseCSC<T>),
}

impl<T: Copy> SparseMatrix<T> {
    /// Borrowed read-only view
    pub fn view(&self) -> SparseMatrixView<'_, T> {
        match self {
            SparseMatrix::Standard(m) => SparseMatrixView::Standard(m),
            SparseMatrix::Hypersparse(m) => SparseMatrixView::Hypersparse(m),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.view().n_rows()
    }

    pub fn n_cols(&self) -> usize {
        self.view().n_cols()
    }

    pub fn nnz(&self) -> usize {
        self.view().nnz()
    }

    pub fn is_hypersparse(&self) -> bool {
        matches!(self, SparseMatrix::Hypersparse(_))
    }

    /// Stored value at `(i, j)`, or `None` if the entry is not stored
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        self.view().get(i, j)
    }

    /// Dense copy with `fill` in every unstored position
    pub fn to_dense(&self, fill: T) -> Array2<T> {
        self.view().to_dense(fill)
    }

    /// Converts to the dense-indexed representation
    pub fn into_csc(self) -> SparseMatrixCSC<T> {
        match self {
            SparseMatrix::Standard(m) => m,
            SparseMatrix::Hypersparse(m) => m.to_csc(),
        }
    }
}

impl<T> From<SparseMatrixCSC<T>> for SparseMatrix<T> {
    fn from(m: SparseMatrixCSC<T>) -> Self {
        SparseMatrix::Standard(m)
    }
}

impl<T> From<HypersparseCSC<T>> for SparseMatrix<T> {
    fn from(m: HypersparseCSC<T>) -> Self {
        SparseMatrix::Hypersparse(m)
    }
}

/// Checks a compressed pointer array against its vector count and nnz
pub(crate) fn check_pointers(
    nvec: usize,
    vectors: &str,
    col_ptr: &[usize],
    nnz: usize,
) -> Result<(), String> {
    if col_ptr.len() != nvec + 1 {
        return Err(format!(
            "col_ptr.len() must be {} + 1 (expected {}, got {})",
            vectors,
            nvec + 1,
            col_ptr.len()
        ));
    }
    if col_ptr[0] != 0 {
        return Err(format!("col_ptr[0] must be 0, got {}", col_ptr[0]));
    }
    if col_ptr[nvec] != nnz {
        return Err(format!(
            "col_ptr[{}] must equal row_idx.len() (expected {}, got {})",
            vectors, nnz, col_ptr[nvec]
        ));
    }
    if let Some(s) = col_ptr.windows(2).position(|w| w[0] > w[1]) {
        return Err(format!("col_ptr decreases at slot {}", s));
    }
    Ok(())
}

/// Checks that every stored column has strictly ascending, in-bounds rows
///
/// `col_ptr` must already have passed [`check_pointers`].
pub(crate) fn check_rows(n_rows: usize, col_ptr: &[usize], row_idx: &[usize]) -> Result<(), String> {
    for (s, w) in col_ptr.windows(2).enumerate() {
        let rows = &row_idx[w[0]..w[1]];
        if rows.windows(2).any(|r| r[0] >= r[1]) {
            return Err(format!(
                "row indices in slot {} must be strictly ascending",
                s
            ));
        }
        if let Some(&last) = rows.last() {
            if last >= n_rows {
                return Err(format!(
                    "Row index {} out of bounds (n_rows = {})",
                    last, n_rows
                ));
            }
        }
    }
    Ok(())
}

/// Full structural check of a compressed-column layout
pub(crate) fn check_compressed(
    n_rows: usize,
    nvec: usize,
    vectors: &str,
    col_ptr: &[usize],
    row_idx: &[usize],
) -> Result<(), String> {
    check_pointers(nvec, vectors, col_ptr, row_idx.len())?;
    check_rows(n_rows, col_ptr, row_idx)
}
