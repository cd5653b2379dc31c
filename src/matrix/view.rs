//! Read-only column access over either compressed-column representation

use std::ops::Range;

use ndarray::Array2;

use crate::matrix::{HypersparseCSC, SearchBracket, SparseMatrixCSC};

/// Column lookup shared by the dense-indexed and hypersparse formats
///
/// Stored entries are addressed by position into [`row_idx`](Self::row_idx)
/// and [`values`](Self::values). Stored vectors are addressed by slot;
/// for the dense-indexed format slot and logical column coincide.
pub trait ColumnLookup<T> {
    /// Row-space size
    fn n_rows(&self) -> usize;

    /// Logical column-space size
    fn n_cols(&self) -> usize;

    /// Number of stored column slots
    fn nvec(&self) -> usize;

    /// Logical column held by `slot`
    fn col_id(&self, slot: usize) -> usize;

    /// Stored positions of `slot`
    fn slot_range(&self, slot: usize) -> Range<usize>;

    /// Stored positions of logical column `col`, or `None` if it has no entries
    fn lookup(&self, col: usize) -> Option<Range<usize>>;

    /// Row index of every stored entry
    fn row_idx(&self) -> &[usize];

    /// Value of every stored entry
    fn values(&self) -> &[T];

    fn nnz(&self) -> usize {
        self.row_idx().len()
    }

    /// Stored value at `(i, j)`
    fn get(&self, i: usize, j: usize) -> Option<T>
    where
        T: Copy,
    {
        let range = self.lookup(j)?;
        let offset = self.row_idx()[range.clone()].binary_search(&i).ok()?;
        Some(self.values()[range.start + offset])
    }

    /// Dense copy with `fill` in every unstored position
    fn to_dense(&self, fill: T) -> Array2<T>
    where
        T: Copy,
    {
        let mut dense = Array2::from_elem((self.n_rows(), self.n_cols()), fill);
        for slot in 0..self.nvec() {
            let j = self.col_id(slot);
            for p in self.slot_range(slot) {
                dense[[self.row_idx()[p], j]] = self.values()[p];
            }
        }
        dense
    }
}

impl<T: Copy> ColumnLookup<T> for SparseMatrixCSC<T> {
    fn n_rows(&self) -> usize {
        self.n_rows
    }

    fn n_cols(&self) -> usize {
        self.n_cols
    }

    fn nvec(&self) -> usize {
        self.n_cols
    }

    fn col_id(&self, slot: usize) -> usize {
        slot
    }

    fn slot_range(&self, slot: usize) -> Range<usize> {
        self.col_range(slot)
    }

    #[inline]
    fn lookup(&self, col: usize) -> Option<Range<usize>> {
        let range = self.col_range(col);
        if range.is_empty() {
            None
        } else {
            Some(range)
        }
    }

    fn row_idx(&self) -> &[usize] {
        &self.row_idx
    }

    fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: Copy> ColumnLookup<T> for HypersparseCSC<T> {
    fn n_rows(&self) -> usize {
        self.n_rows
    }

    fn n_cols(&self) -> usize {
        self.n_cols
    }

    fn nvec(&self) -> usize {
        self.col_ids.len()
    }

    fn col_id(&self, slot: usize) -> usize {
        self.col_ids[slot]
    }

    fn slot_range(&self, slot: usize) -> Range<usize> {
        self.col_ptr[slot]..self.col_ptr[slot + 1]
    }

    fn lookup(&self, col: usize) -> Option<Range<usize>> {
        self.lookup_bracketed(col, &mut SearchBracket::full(self.col_ids.len()))
    }

    fn row_idx(&self) -> &[usize] {
        &self.row_idx
    }

    fn values(&self) -> &[T] {
        &self.values
    }
}

/// Borrowed matrix in whichever representation it is stored
#[derive(Debug)]
pub enum SparseMatrixView<'a, T> {
    Standard(&'a SparseMatrixCSC<T>),
    Hypersparse(&'a HypersparseCSC<T>),
}

impl<T> Clone for SparseMatrixView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SparseMatrixView<'_, T> {}

impl<T> SparseMatrixView<'_, T> {
    pub fn is_hypersparse(&self) -> bool {
        matches!(self, SparseMatrixView::Hypersparse(_))
    }
}

impl<T> SparseMatrixCSC<T> {
    /// Borrowed read-only view
    pub fn view(&self) -> SparseMatrixView<'_, T> {
        SparseMatrixView::Standard(self)
    }
}

impl<T> HypersparseCSC<T> {
    /// Borrowed read-only view
    pub fn view(&self) -> SparseMatrixView<'_, T> {
        SparseMatrixView::Hypersparse(self)
    }
}

impl<'a, T> From<&'a SparseMatrixCSC<T>> for SparseMatrixView<'a, T> {
    fn from(m: &'a SparseMatrixCSC<T>) -> Self {
        SparseMatrixView::Standard(m)
    }
}

impl<'a, T> From<&'a HypersparseCSC<T>> for SparseMatrixView<'a, T> {
    fn from(m: &'a HypersparseCSC<T>) -> Self {
        SparseMatrixView::Hypersparse(m)
    }
}

impl<T: Copy> ColumnLookup<T> for SparseMatrixView<'_, T> {
    fn n_rows(&self) -> usize {
        match self {
            SparseMatrixView::Standard(m) => m.n_rows,
            SparseMatrixView::Hypersparse(m) => m.n_rows,
        }
    }

    fn n_cols(&self) -> usize {
        match self {
            SparseMatrixView::Standard(m) => m.n_cols,
            SparseMatrixView::Hypersparse(m) => m.n_cols,
        }
    }

    fn nvec(&self) -> usize {
        match self {
            SparseMatrixView::Standard(m) => m.n_cols,
            SparseMatrixView::Hypersparse(m) => m.col_ids.len(),
        }
    }

    fn col_id(&self, slot: usize) -> usize {
        match self {
            SparseMatrixView::Standard(_) => slot,
            SparseMatrixView::Hypersparse(m) => m.col_ids[slot],
        }
    }

    fn slot_range(&self, slot: usize) -> Range<usize> {
        match self {
            SparseMatrixView::Standard(m) => ColumnLookup::slot_range(*m, slot),
            SparseMatrixView::Hypersparse(m) => ColumnLookup::slot_range(*m, slot),
        }
    }

    fn lookup(&self, col: usize) -> Option<Range<usize>> {
        match self {
            SparseMatrixView::Standard(m) => m.lookup(col),
            SparseMatrixView::Hypersparse(m) => m.lookup(col),
        }
    }

    fn row_idx(&self) -> &[usize] {
        match self {
            SparseMatrixView::Standard(m) => &m.row_idx,
            SparseMatrixView::Hypersparse(m) => &m.row_idx,
        }
    }

    fn values(&self) -> &[T] {
        match self {
            SparseMatrixView::Standard(m) => &m.values,
            SparseMatrixView::Hypersparse(m) => &m.values,
        }
    }
}
