//! Reference implementation of semiring SpGEMM
//!
//! This provides a baseline for correctness testing. It walks the same
//! column-by-column fold order as the Gustavson kernel but uses a hashmap
//! accumulator and derives its own output pattern, so it shares neither the
//! symbolic pass nor the dense workspace with the code under test.

use std::collections::HashMap;

use crate::matrix::{ColumnLookup, SparseMatrixCSC, SparseMatrixView};
use crate::semiring::Semiring;

/// Performs C = A ⊕.⊗ B with a per-column hashmap accumulator
///
/// Products for C(i,j) are folded starting from `identity`, in ascending
/// order of k within B(:,j). The result is dense-indexed with rows sorted
/// within each column; every structurally reachable entry is kept, even if
/// its value equals the identity.
///
/// # Panics
///
/// Panics if `a.n_cols() != b.n_rows()`.
pub fn reference_spgemm<A, B, S>(
    a: SparseMatrixView<'_, A>,
    b: SparseMatrixView<'_, B>,
    semiring: &S,
) -> SparseMatrixCSC<S::Output>
where
    A: Copy,
    B: Copy,
    S: Semiring<A, B>,
{
    assert_eq!(
        a.n_cols(),
        b.n_rows(),
        "Matrix dimensions must be compatible for multiplication"
    );

    let n_rows = a.n_rows();
    let n_cols = b.n_cols();

    let mut col_ptr = Vec::with_capacity(n_cols + 1);
    let mut row_idx = Vec::new();
    let mut values = Vec::new();

    col_ptr.push(0);

    for j in 0..n_cols {
        let mut accum: HashMap<usize, S::Output> = HashMap::new();

        if let Some(b_range) = b.lookup(j) {
            for pb in b_range {
                let k = b.row_idx()[pb];
                let b_kj = b.values()[pb];

                let Some(a_range) = a.lookup(k) else {
                    continue;
                };
                for pa in a_range {
                    let i = a.row_idx()[pa];
                    let product = semiring.multiply(a.values()[pa], b_kj);
                    let slot = accum.entry(i).or_insert_with(|| semiring.identity());
                    *slot = semiring.add(*slot, product);
                }
            }
        }

        let mut col_entries: Vec<_> = accum.into_iter().collect();
        col_entries.sort_by_key(|&(row, _)| row);

        for (i, val) in col_entries {
            row_idx.push(i);
            values.push(val);
        }

        col_ptr.push(row_idx.len());
    }

    SparseMatrixCSC {
        n_rows,
        n_cols,
        col_ptr,
        row_idx,
        values,
    }
}
