//! Utilities for converting between our matrix formats and sprs

use sprs::CsMat;

use crate::error::Result;
use crate::matrix::{SparseMatrixCSC, SparseMatrixView};

/// Converts either of our column formats to a sprs CsMat in CSC storage
///
/// Hypersparse input is expanded so every logical column has a pointer slot.
pub fn to_sprs_csc<T: Copy>(matrix: SparseMatrixView<'_, T>) -> CsMat<T> {
    match matrix {
        SparseMatrixView::Standard(m) => CsMat::new_csc(
            (m.n_rows, m.n_cols),
            m.col_ptr.clone(),
            m.row_idx.clone(),
            m.values.clone(),
        ),
        SparseMatrixView::Hypersparse(m) => {
            let m = m.to_csc();
            CsMat::new_csc((m.n_rows, m.n_cols), m.col_ptr, m.row_idx, m.values)
        }
    }
}

/// Converts a sprs CsMat to our dense-indexed CSC format
///
/// CSR input is converted to CSC storage first.
pub fn from_sprs_csc<T: Copy + Default>(matrix: CsMat<T>) -> Result<SparseMatrixCSC<T>> {
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSC::try_new(n_rows, n_cols, indptr, indices, data)
}
