//! Conversion functions between the dense-indexed and hypersparse formats

use crate::matrix::{HypersparseCSC, SparseMatrixCSC};
use crate::utils::exclusive_scan;

impl<T: Copy> SparseMatrixCSC<T> {
    /// Converts to hypersparse form, dropping every empty column
    pub fn to_hypersparse(&self) -> HypersparseCSC<T> {
        let mut col_ids = Vec::new();
        let mut col_ptr = vec![0];

        for j in 0..self.n_cols {
            if self.col_ptr[j + 1] > self.col_ptr[j] {
                col_ids.push(j);
                col_ptr.push(self.col_ptr[j + 1]);
            }
        }

        HypersparseCSC {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            col_ids,
            col_ptr,
            row_idx: self.row_idx.clone(),
            values: self.values.clone(),
        }
    }
}

impl<T: Copy> HypersparseCSC<T> {
    /// Converts to dense-indexed form, giving every logical column a slot
    pub fn to_csc(&self) -> SparseMatrixCSC<T> {
        let mut counts = vec![0; self.n_cols];
        for (s, &j) in self.col_ids.iter().enumerate() {
            counts[j] = self.col_ptr[s + 1] - self.col_ptr[s];
        }

        SparseMatrixCSC {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            col_ptr: exclusive_scan(&counts),
            row_idx: self.row_idx.clone(),
            values: self.values.clone(),
        }
    }
}
