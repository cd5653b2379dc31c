//! Symbolic phase: the exact structural pattern of C = A*B
//!
//! Row i appears in C(:,j) exactly when some k has both A(i,k) and B(k,j)
//! stored, which is precisely the set of rows the numeric sweep touches.
//! A hypersparse B yields a hypersparse pattern with B's column ids; columns
//! that turn out empty keep their slot.

use log::trace;

use crate::error::{Result, SpgemmError};
use crate::matrix::{ColumnLookup, OutputPattern, SparseMatrixView};

/// Computes the output pattern of `a * b`
///
/// # Errors
///
/// Returns [`SpgemmError::DimensionMismatch`] if `a.n_cols() != b.n_rows()`.
pub fn symbolic_pattern<A: Copy, B: Copy>(
    a: SparseMatrixView<'_, A>,
    b: SparseMatrixView<'_, B>,
) -> Result<OutputPattern> {
    if a.n_cols() != b.n_rows() {
        return Err(SpgemmError::DimensionMismatch {
            context: "A.cols vs B.rows",
            expected: a.n_cols(),
            got: b.n_rows(),
        });
    }

    let n_rows = a.n_rows();
    let nvec = b.nvec();

    // mark[i] == slot + 1 once row i has been seen in the current column
    let mut mark = vec![0usize; n_rows];
    let mut col_ptr = Vec::with_capacity(nvec + 1);
    let mut row_idx = Vec::new();

    col_ptr.push(0);

    for slot in 0..nvec {
        let column_start = row_idx.len();

        for pb in b.slot_range(slot) {
            let k = b.row_idx()[pb];
            let Some(a_range) = a.lookup(k) else {
                continue;
            };
            for &i in &a.row_idx()[a_range] {
                if mark[i] != slot + 1 {
                    mark[i] = slot + 1;
                    row_idx.push(i);
                }
            }
        }

        row_idx[column_start..].sort_unstable();
        col_ptr.push(row_idx.len());
    }

    trace!(
        "symbolic pattern: {} x {}, {} slots, {} entries",
        n_rows,
        b.n_cols(),
        nvec,
        row_idx.len()
    );

    Ok(match b {
        SparseMatrixView::Standard(_) => {
            OutputPattern::standard(n_rows, b.n_cols(), col_ptr, row_idx)
        }
        SparseMatrixView::Hypersparse(h) => {
            OutputPattern::hypersparse(n_rows, h.n_cols, h.col_ids.clone(), col_ptr, row_idx)
        }
    })
}
