//! Dense accumulator (workspace) for column-wise Gustavson SpGEMM
//!
//! One slot per row of C, allocated once per multiply call and reused for
//! every output column. Only the rows in the current column's pattern are
//! reset before the sweep, so clearing costs O(pattern) rather than
//! O(n_rows). Slots outside the current pattern keep stale values from
//! earlier columns and must never be read.

use aligned_vec::AVec;

use crate::constants::WORKSPACE_ALIGNMENT;
use crate::semiring::Semiring;

/// Dense per-row scratch buffer for one output column at a time
///
/// In debug builds every slot also carries the stamp of the last column
/// that cleared it, and folding into a row that the current column did not
/// clear trips an assertion. That is the only runtime check that the output
/// pattern is complete; release builds skip it.
pub struct DenseAccumulator<Z> {
    /// Partial sums, indexed by row of C
    slots: AVec<Z>,

    #[cfg(debug_assertions)]
    stamps: Vec<usize>,

    #[cfg(debug_assertions)]
    generation: usize,
}

impl<Z: Copy> DenseAccumulator<Z> {
    /// Create an accumulator with `n_rows` slots, each holding `fill`
    ///
    /// The initial contents are never read; `fill` only provides a value to
    /// initialize the allocation with.
    pub fn new(n_rows: usize, fill: Z) -> Self {
        Self {
            slots: AVec::from_iter(WORKSPACE_ALIGNMENT, std::iter::repeat(fill).take(n_rows)),
            #[cfg(debug_assertions)]
            stamps: vec![0; n_rows],
            #[cfg(debug_assertions)]
            generation: 0,
        }
    }

    /// Number of row slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reset the slots of `rows` to `identity`, starting a new column
    pub fn clear(&mut self, rows: &[usize], identity: Z) {
        #[cfg(debug_assertions)]
        {
            self.generation += 1;
        }

        for &r in rows {
            self.slots[r] = identity;
            #[cfg(debug_assertions)]
            {
                self.stamps[r] = self.generation;
            }
        }
    }

    /// `w[i] = add(w[i], multiply(a_ik, b_kj))` for every entry of one A column
    ///
    /// `rows` and `a_vals` are the aligned row indices and values of A(:,k).
    #[inline]
    pub fn scatter<A, B, S>(&mut self, semiring: &S, rows: &[usize], a_vals: &[A], b_kj: B)
    where
        A: Copy,
        B: Copy,
        S: Semiring<A, B, Output = Z>,
    {
        debug_assert_eq!(rows.len(), a_vals.len());

        for (&i, &a_ik) in rows.iter().zip(a_vals) {
            #[cfg(debug_assertions)]
            assert_eq!(
                self.stamps[i], self.generation,
                "row {} touched by the sweep but absent from the output pattern",
                i
            );

            self.slots[i] = semiring.add(self.slots[i], semiring.multiply(a_ik, b_kj));
        }
    }

    /// Copy the slots of `rows` into `out`, in the order `rows` lists them
    pub fn gather(&self, rows: &[usize], out: &mut [Z]) {
        debug_assert_eq!(rows.len(), out.len());

        for (dst, &r) in out.iter_mut().zip(rows) {
            *dst = self.slots[r];
        }
    }
}
