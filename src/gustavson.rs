//! # Numeric phase of Gustavson's SpGEMM
//!
//! Computes the values of C = A ⊕.⊗ B into storage laid out by a
//! precomputed [`OutputPattern`], one output column at a time:
//!
//! 1. Skip the column if its pattern is empty.
//! 2. Reset the workspace to the semiring identity at the pattern's rows.
//! 3. For hypersparse A, open a search bracket over A's stored columns and,
//!    when B(:,j) is long enough, trim it on the right to B(:,j)'s last row.
//! 4. For each B(k,j) in ascending k, find A(:,k) and fold
//!    `multiply(A(i,k), B(k,j))` into the workspace at every row i.
//! 5. Gather the pattern's rows from the workspace into C's values.
//!
//! Work per column is proportional to the scalar operations actually
//! performed plus the column's pattern size; nothing is sorted and nothing
//! is cleared beyond the pattern.

use std::ops::Range;

use log::{debug, trace};

use crate::accumulator::DenseAccumulator;
use crate::error::{Result, SpgemmError};
use crate::matrix::{
    ColumnLookup, HypersparseCSC, MultiplyConfig, OutputPattern, SearchBracket, SparseMatrix,
    SparseMatrixCSC, SparseMatrixView,
};
use crate::semiring::Semiring;
use crate::symbolic::symbolic_pattern;

/// Counters reported by one multiply call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiplyStats {
    /// Output columns whose values were computed
    pub columns_computed: usize,
    /// Stored output columns skipped because their pattern is empty
    pub columns_skipped: usize,
    /// Number of multiply-add pairs performed
    pub scalar_ops: usize,
}

/// Locates stored columns for a sequence of probes
trait ColumnFinder {
    /// Prepare for the probes driven by one output column
    ///
    /// `b_rows` are the ascending row indices of B(:,j).
    fn begin_column(&mut self, b_rows: &[usize]);

    /// Stored positions of column `col`, or `None` if it has no entries
    fn find(&mut self, col: usize) -> Option<Range<usize>>;
}

/// O(1) lookup through the column pointers
struct DirectFinder<'a, T> {
    matrix: &'a SparseMatrixCSC<T>,
}

impl<T: Copy> ColumnFinder for DirectFinder<'_, T> {
    #[inline]
    fn begin_column(&mut self, _b_rows: &[usize]) {}

    #[inline]
    fn find(&mut self, col: usize) -> Option<Range<usize>> {
        self.matrix.lookup(col)
    }
}

/// Bracketed binary search over hypersparse column ids
///
/// Probes must be non-decreasing between calls to `begin_column`.
struct BracketFinder<'a, T> {
    matrix: &'a HypersparseCSC<T>,
    bracket: SearchBracket,
    trim_threshold: usize,
}

impl<'a, T: Copy> BracketFinder<'a, T> {
    fn new(matrix: &'a HypersparseCSC<T>, trim_threshold: usize) -> Self {
        Self {
            matrix,
            bracket: SearchBracket::full(matrix.nvec()),
            trim_threshold,
        }
    }
}

impl<T: Copy> ColumnFinder for BracketFinder<'_, T> {
    fn begin_column(&mut self, b_rows: &[usize]) {
        // Probe ids only ascend within a column, not across columns
        self.bracket = SearchBracket::full(self.matrix.nvec());

        if b_rows.len() > self.trim_threshold {
            if let Some(&max_k) = b_rows.last() {
                self.matrix.trim_right(max_k, &mut self.bracket);
            }
        }
    }

    #[inline]
    fn find(&mut self, col: usize) -> Option<Range<usize>> {
        self.matrix.lookup_bracketed(col, &mut self.bracket)
    }
}

/// Fills `values` with C = A ⊕.⊗ B over the precomputed `pattern`
///
/// `values` must have one slot per pattern entry; slot `p` receives the
/// value of row `pattern.row_idx[p]` in its column. Columns with an empty
/// pattern are skipped without touching the workspace or B.
///
/// For every entry C(i,j) the result is `identity` folded with
/// `multiply(A(i,k), B(k,j))` for each stored B(k,j) in ascending k that
/// has A(i,k) stored. With a non-commutative `add` that order is the
/// definition of the result.
///
/// The pattern must list exactly the rows the product reaches in each
/// column, as produced by [`symbolic_pattern`]. Debug builds assert this
/// while sweeping; release builds do not check it.
///
/// # Errors
///
/// - [`SpgemmError::DimensionMismatch`] if `A.cols != B.rows`,
///   `C.rows != A.rows` or `C.cols != B.cols`
/// - [`SpgemmError::MalformedPattern`] if the pattern fails
///   `config.pattern_check`
/// - [`SpgemmError::OutputLength`] if `values.len() != pattern.nnz()`
///
/// # Examples
///
/// ```
/// use gustavson::{gustavson_multiply, symbolic_pattern, MultiplyConfig, PlusTimes, SparseMatrixCSC};
///
/// // A = [2 0; 0 3], B = [1 4; 0 5]
/// let a = SparseMatrixCSC::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![2.0, 3.0]);
/// let b = SparseMatrixCSC::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![1.0, 4.0, 5.0]);
///
/// let pattern = symbolic_pattern(a.view(), b.view()).unwrap();
/// let mut values = vec![0.0; pattern.nnz()];
/// gustavson_multiply(
///     a.view(),
///     b.view(),
///     &PlusTimes::new(),
///     &pattern,
///     &mut values,
///     &MultiplyConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(values, vec![2.0, 8.0, 15.0]);
/// ```
pub fn gustavson_multiply<A, B, S>(
    a: SparseMatrixView<'_, A>,
    b: SparseMatrixView<'_, B>,
    semiring: &S,
    pattern: &OutputPattern,
    values: &mut [S::Output],
    config: &MultiplyConfig,
) -> Result<MultiplyStats>
where
    A: Copy,
    B: Copy,
    S: Semiring<A, B>,
{
    check_operands(&a, &b, pattern, values.len(), config)?;

    debug!(
        "gustavson: C({} x {}, nnz {}) = A({} x {}, nnz {}, hyper {}) * B({} x {}, nnz {}, hyper {})",
        pattern.n_rows,
        pattern.n_cols,
        pattern.nnz(),
        a.n_rows(),
        a.n_cols(),
        a.nnz(),
        a.is_hypersparse(),
        b.n_rows(),
        b.n_cols(),
        b.nnz(),
        b.is_hypersparse(),
    );
    trace!("gustavson config: {:?}", config);

    let mut workspace = DenseAccumulator::new(pattern.n_rows, semiring.identity());
    let a_entries = (a.row_idx(), a.values());
    let b_entries = (b.row_idx(), b.values());
    let trim = config.bracket_trim_threshold;

    let stats = match (a, b) {
        (SparseMatrixView::Standard(am), SparseMatrixView::Standard(bm)) => sweep(
            &mut DirectFinder { matrix: am },
            a_entries,
            &mut DirectFinder { matrix: bm },
            b_entries,
            semiring,
            pattern,
            values,
            &mut workspace,
        ),
        (SparseMatrixView::Standard(am), SparseMatrixView::Hypersparse(bm)) => sweep(
            &mut DirectFinder { matrix: am },
            a_entries,
            &mut BracketFinder::new(bm, trim),
            b_entries,
            semiring,
            pattern,
            values,
            &mut workspace,
        ),
        (SparseMatrixView::Hypersparse(am), SparseMatrixView::Standard(bm)) => sweep(
            &mut BracketFinder::new(am, trim),
            a_entries,
            &mut DirectFinder { matrix: bm },
            b_entries,
            semiring,
            pattern,
            values,
            &mut workspace,
        ),
        (SparseMatrixView::Hypersparse(am), SparseMatrixView::Hypersparse(bm)) => sweep(
            &mut BracketFinder::new(am, trim),
            a_entries,
            &mut BracketFinder::new(bm, trim),
            b_entries,
            semiring,
            pattern,
            values,
            &mut workspace,
        ),
    };

    debug!(
        "gustavson: {} columns computed, {} skipped, {} scalar ops",
        stats.columns_computed, stats.columns_skipped, stats.scalar_ops
    );

    Ok(stats)
}

/// Runs the symbolic pass, allocates C, and fills it with [`gustavson_multiply`]
///
/// The result is hypersparse exactly when `b` is.
pub fn spgemm<A, B, S>(
    a: SparseMatrixView<'_, A>,
    b: SparseMatrixView<'_, B>,
    semiring: &S,
    config: &MultiplyConfig,
) -> Result<SparseMatrix<S::Output>>
where
    A: Copy,
    B: Copy,
    S: Semiring<A, B>,
{
    let pattern = symbolic_pattern(a, b)?;
    let mut values = vec![semiring.identity(); pattern.nnz()];

    gustavson_multiply(a, b, semiring, &pattern, &mut values, config)?;

    pattern.into_matrix(values)
}

/// Entry checks; everything here is O(nvec) unless a full pattern check is requested
fn check_operands<A: Copy, B: Copy>(
    a: &SparseMatrixView<'_, A>,
    b: &SparseMatrixView<'_, B>,
    pattern: &OutputPattern,
    n_values: usize,
    config: &MultiplyConfig,
) -> Result<()> {
    let dims = [
        ("A.cols vs B.rows", a.n_cols(), b.n_rows()),
        ("C.rows vs A.rows", a.n_rows(), pattern.n_rows),
        ("C.cols vs B.cols", b.n_cols(), pattern.n_cols),
    ];
    for (context, expected, got) in dims {
        if expected != got {
            return Err(SpgemmError::DimensionMismatch {
                context,
                expected,
                got,
            });
        }
    }

    pattern.validate(config.pattern_check)?;

    if n_values != pattern.nnz() {
        return Err(SpgemmError::OutputLength {
            expected: pattern.nnz(),
            got: n_values,
        });
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn sweep<A, B, S, FA, FB>(
    a_finder: &mut FA,
    (a_rows, a_vals): (&[usize], &[A]),
    b_finder: &mut FB,
    (b_rows, b_vals): (&[usize], &[B]),
    semiring: &S,
    pattern: &OutputPattern,
    values: &mut [S::Output],
    workspace: &mut DenseAccumulator<S::Output>,
) -> MultiplyStats
where
    A: Copy,
    B: Copy,
    S: Semiring<A, B>,
    FA: ColumnFinder,
    FB: ColumnFinder,
{
    let identity = semiring.identity();
    let mut stats = MultiplyStats::default();

    for slot in 0..pattern.nvec() {
        let c_range = pattern.slot_range(slot);
        if c_range.is_empty() {
            stats.columns_skipped += 1;
            continue;
        }

        let c_rows = &pattern.row_idx[c_range.clone()];
        workspace.clear(c_rows, identity);

        // Output column ids ascend, so B's bracket carries across columns
        let j = pattern.col_id(slot);
        let b_range = b_finder.find(j).unwrap_or(0..0);
        debug_assert!(
            !b_range.is_empty(),
            "output column {} has a pattern but B(:,{}) is empty",
            j,
            j
        );

        a_finder.begin_column(&b_rows[b_range.clone()]);

        for pb in b_range {
            let k = b_rows[pb];
            let Some(a_range) = a_finder.find(k) else {
                continue;
            };

            stats.scalar_ops += a_range.len();
            workspace.scatter(semiring, &a_rows[a_range.clone()], &a_vals[a_range], b_vals[pb]);
        }

        workspace.gather(c_rows, &mut values[c_range]);
        stats.columns_computed += 1;
    }

    stats
}
