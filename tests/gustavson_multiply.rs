//! End-to-end tests for the numeric phase

use gustavson::{
    gustavson_multiply, reference_spgemm, spgemm, symbolic_pattern, ColumnLookup, HypersparseCSC,
    MaxMin, MaxPlus, MinPlus, MultiplyConfig, MultiplyStats, OperatorSemiring, OutputPattern,
    PatternCheck, PlusTimes, LorLand, Semiring, SparseMatrixCSC, SparseMatrixView, SpgemmError,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs both phases into a fresh buffer filled with `fill`
fn multiply_into<A, B, S>(
    a: SparseMatrixView<'_, A>,
    b: SparseMatrixView<'_, B>,
    semiring: &S,
    fill: S::Output,
) -> (OutputPattern, Vec<S::Output>, MultiplyStats)
where
    A: Copy,
    B: Copy,
    S: Semiring<A, B>,
{
    let pattern = symbolic_pattern(a, b).unwrap();
    let mut values = vec![fill; pattern.nnz()];
    let stats = gustavson_multiply(a, b, semiring, &pattern, &mut values, &MultiplyConfig::default())
        .unwrap();
    (pattern, values, stats)
}

/// Create a tridiagonal matrix
fn create_tridiagonal_matrix(n: usize) -> SparseMatrixCSC<f64> {
    let columns: Vec<Vec<(usize, f64)>> = (0..n)
        .map(|j| {
            let mut column = Vec::new();
            if j > 0 {
                column.push((j - 1, 1.0));
            }
            column.push((j, 2.0));
            if j + 1 < n {
                column.push((j + 1, 1.0));
            }
            column
        })
        .collect();

    SparseMatrixCSC::from_columns(n, &columns).unwrap()
}

/// A matrix with most columns empty, stored both ways
fn create_wide_sparse_pair() -> (SparseMatrixCSC<f64>, HypersparseCSC<f64>) {
    let mut columns = vec![Vec::new(); 200];
    columns[3] = vec![(0, 1.0), (4, 2.0)];
    columns[17] = vec![(2, 3.0)];
    columns[64] = vec![(1, 4.0), (2, 5.0), (5, 6.0)];
    columns[150] = vec![(0, 7.0)];
    columns[199] = vec![(3, 8.0), (5, 9.0)];

    let dense = SparseMatrixCSC::from_columns(6, &columns).unwrap();
    let hyper = dense.to_hypersparse();
    (dense, hyper)
}

#[test]
fn test_two_by_two_example() {
    init_logging();

    // A = [2 0; 0 3], B = [1 4; 0 5]
    let a = SparseMatrixCSC::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![2.0, 3.0]);
    let b = SparseMatrixCSC::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![1.0, 4.0, 5.0]);

    let (pattern, values, stats) = multiply_into(a.view(), b.view(), &PlusTimes::new(), 0.0);

    assert_eq!(pattern.col_ptr, vec![0, 1, 3]);
    assert_eq!(pattern.row_idx, vec![0, 0, 1]);
    assert_eq!(values, vec![2.0, 8.0, 15.0]);
    assert_eq!(stats.columns_computed, 2);
}

#[test]
fn test_identity_multiplication() {
    init_logging();

    let identity = SparseMatrixCSC::<f64>::identity(10);
    let b = create_tridiagonal_matrix(10);

    let c = spgemm(identity.view(), b.view(), &PlusTimes::new(), &MultiplyConfig::default())
        .unwrap()
        .into_csc();

    assert_eq!(c, b);
}

#[test]
fn test_tridiagonal_square_matches_reference() {
    init_logging();

    let a = create_tridiagonal_matrix(25);
    let c = spgemm(a.view(), a.view(), &PlusTimes::new(), &MultiplyConfig::default())
        .unwrap()
        .into_csc();
    let expected = reference_spgemm(a.view(), a.view(), &PlusTimes::new());

    assert_eq!(c, expected);
    // Pentadiagonal: 5 per interior column
    assert_eq!(c.col_range(12).len(), 5);
    assert_eq!(c.get(12, 12), Some(6.0));
    assert_eq!(c.get(10, 12), Some(1.0));
}

#[test]
fn test_min_plus_ignores_structural_zero() {
    init_logging();

    // Stored 0.0 is a real edge weight under min-plus
    let a = SparseMatrixCSC::new(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![0.0, 5.0, 1.0]);
    let (_, values, _) = multiply_into(a.view(), a.view(), &MinPlus::new(), f64::INFINITY);

    // C(:,0): k=0 -> {0: 0, 1: 5}, k=1 -> {1: 5 + 1}; C(:,1): k=1 -> {1: 1 + 1}
    assert_eq!(values, vec![0.0, 5.0, 2.0]);
}

#[test]
fn test_min_plus_is_order_independent() {
    init_logging();

    // Same entries, reversed k order in the products that feed C(0,0)
    let a = SparseMatrixCSC::new(1, 3, vec![0, 1, 2, 3], vec![0, 0, 0], vec![4.0, 1.0, 7.0]);
    let b1 = SparseMatrixCSC::new(3, 1, vec![0, 3], vec![0, 1, 2], vec![1.0, 2.0, 3.0]);
    let b2 = SparseMatrixCSC::new(3, 1, vec![0, 3], vec![0, 1, 2], vec![3.0, 2.0, 1.0]);

    let (_, v1, _) = multiply_into(a.view(), b1.view(), &MinPlus::new(), 0.0);
    let (_, v2, _) = multiply_into(a.view(), b2.view(), &MinPlus::new(), 0.0);

    assert_eq!(v1, vec![3.0]);
    assert_eq!(v2, vec![3.0]);
}

#[test]
fn test_max_plus_and_max_min() {
    init_logging();

    let a = SparseMatrixCSC::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![2.0, 6.0]);
    let b = SparseMatrixCSC::new(2, 1, vec![0, 2], vec![0, 1], vec![5.0, 3.0]);

    let (_, longest, _) = multiply_into(a.view(), b.view(), &MaxPlus::new(), 0.0);
    assert_eq!(longest, vec![9.0]);

    // Widest path: max over k of min(A, B)
    let (_, widest, _) = multiply_into(a.view(), b.view(), &MaxMin::new(), 0.0);
    assert_eq!(widest, vec![3.0]);
}

#[test]
fn test_boolean_reachability() {
    init_logging();

    // 0 -> 1 -> 2, stored "to x from"
    let adj = SparseMatrixCSC::new(3, 3, vec![0, 1, 2, 2], vec![1, 2], vec![true, true]);
    let c = spgemm(adj.view(), adj.view(), &LorLand, &MultiplyConfig::default()).unwrap();

    assert_eq!(c.nnz(), 1);
    assert_eq!(c.get(2, 0), Some(true));
}

#[test]
fn test_mixed_operand_types() {
    init_logging();

    // Count weighted by an integer multiplicity: f64 x u32 -> f64
    let s = OperatorSemiring::<f64, u32, f64>::new(0.0, |acc, d| acc + d, |a, b| a * f64::from(b));
    let a = SparseMatrixCSC::new(2, 1, vec![0, 2], vec![0, 1], vec![0.5, 1.5]);
    let b = SparseMatrixCSC::new(1, 1, vec![0, 1], vec![0], vec![4u32]);

    let (_, values, _) = multiply_into(a.view(), b.view(), &s, 0.0);
    assert_eq!(values, vec![2.0, 6.0]);
}

#[test]
fn test_non_commutative_fold_order() {
    init_logging();

    // String-like concatenation as digits: order of k is visible in the result
    let concat = OperatorSemiring::<u64, u64, u64>::new(0, |acc, d| acc * 10 + d, |a, b| a * b);

    // Two rows; row 1 only sees k = 0 and k = 2
    let a = SparseMatrixCSC::new(
        2, 3,
        vec![0, 2, 3, 5],
        vec![0, 1, 0, 0, 1],
        vec![1, 1, 1, 1, 1],
    );
    let b = SparseMatrixCSC::new(3, 1, vec![0, 3], vec![0, 1, 2], vec![4, 5, 6]);

    let (_, values, _) = multiply_into(a.view(), b.view(), &concat, 0);
    assert_eq!(values, vec![456, 46]);

    // The hypersparse path walks the same k order
    let ah = a.to_hypersparse();
    let (_, hyper_values, _) = multiply_into(ah.view(), b.view(), &concat, 0);
    assert_eq!(hyper_values, values);
}

#[test]
fn test_empty_pattern_columns_are_never_written() {
    init_logging();

    // B has empty columns 1 and 3; column 2 only reaches an empty A column
    let a = SparseMatrixCSC::new(3, 3, vec![0, 2, 2, 3], vec![0, 2, 1], vec![1.0, 2.0, 3.0]);
    let b = SparseMatrixCSC::from_columns(
        3,
        &[vec![(0, 1.0)], vec![], vec![(1, 1.0)], vec![], vec![(0, 1.0), (2, 1.0)]],
    )
    .unwrap();

    let pattern = symbolic_pattern(a.view(), b.view()).unwrap();
    assert_eq!(pattern.col_ptr, vec![0, 2, 2, 2, 2, 5]);

    let sentinel = -99.0;
    let mut values = vec![sentinel; pattern.nnz()];
    let stats = gustavson_multiply(
        a.view(),
        b.view(),
        &PlusTimes::new(),
        &pattern,
        &mut values,
        &MultiplyConfig::default(),
    )
    .unwrap();

    assert_eq!(values, vec![1.0, 2.0, 1.0, 3.0, 2.0]);
    assert_eq!(
        stats,
        MultiplyStats {
            columns_computed: 2,
            columns_skipped: 3,
            scalar_ops: 5,
        }
    );
}

#[test]
fn test_all_empty_output() {
    init_logging();

    let a = SparseMatrixCSC::<f64>::empty(4, 3);
    let b = create_tridiagonal_matrix(3);

    let (pattern, values, stats) = multiply_into(a.view(), b.view(), &PlusTimes::new(), 0.0);

    assert_eq!(pattern.nnz(), 0);
    assert!(values.is_empty());
    assert_eq!(stats.columns_computed, 0);
    assert_eq!(stats.columns_skipped, 3);
    assert_eq!(stats.scalar_ops, 0);
}

#[test]
fn test_representations_give_identical_results() {
    init_logging();

    let (wide, wide_h) = create_wide_sparse_pair();
    // A is 6 x 200 with mostly empty columns; B is 200 x 4 and probes them
    let b = SparseMatrixCSC::from_columns(
        200,
        &[
            vec![(3, 1.0), (17, 2.0), (64, 3.0), (150, 4.0)],
            vec![],
            vec![(0, 5.0), (64, 6.0), (100, 7.0), (199, 8.0)],
            vec![(199, 9.0)],
        ],
    )
    .unwrap();
    let b_h = b.to_hypersparse();

    let s = PlusTimes::new();
    let config = MultiplyConfig::default();
    let expected = reference_spgemm(wide.view(), b.view(), &s);

    for a_view in [wide.view(), wide_h.view()] {
        for b_view in [b.view(), b_h.view()] {
            let c = spgemm(a_view, b_view, &s, &config).unwrap();
            assert_eq!(c.is_hypersparse(), b_view.is_hypersparse());
            assert_eq!(c.to_dense(0.0), expected.to_dense(0.0));
        }
    }
}

#[test]
fn test_hypersparse_b_result_keeps_b_column_ids() {
    init_logging();

    let (wide, _) = create_wide_sparse_pair();
    let b = HypersparseCSC::new(
        200, 1000,
        vec![5, 500, 999],
        vec![0, 2, 3, 4],
        vec![3, 64, 150, 42],
        vec![1.0, 1.0, 2.0, 3.0],
    );

    let (pattern, values, stats) = multiply_into(wide.view(), b.view(), &PlusTimes::new(), 0.0);

    assert_eq!(pattern.col_ids, Some(vec![5, 500, 999]));
    // Column 999 probes an empty A column
    assert_eq!(pattern.col_ptr, vec![0, 5, 6, 6]);
    assert_eq!(values, vec![1.0, 4.0, 5.0, 2.0, 6.0, 14.0]);
    assert_eq!(stats.columns_skipped, 1);

    let c = pattern.into_matrix(values).unwrap();
    assert_eq!(c.n_cols(), 1000);
    assert_eq!(c.get(0, 500), Some(14.0));
}

#[test]
fn test_repeated_calls_are_deterministic() {
    init_logging();

    let (_, wide_h) = create_wide_sparse_pair();
    let b = SparseMatrixCSC::from_columns(
        200,
        &[vec![(3, 0.1), (17, 0.2), (64, 0.3), (199, 0.7)], vec![(150, 0.9)]],
    )
    .unwrap();

    let (_, first, _) = multiply_into(wide_h.view(), b.view(), &PlusTimes::new(), 0.0);
    for _ in 0..5 {
        let (_, again, _) = multiply_into(wide_h.view(), b.view(), &PlusTimes::new(), 0.0);
        let same_bits = first.iter().zip(&again).all(|(x, y)| x.to_bits() == y.to_bits());
        assert!(same_bits);
    }
}

#[test]
fn test_incompatible_operands_are_rejected() {
    init_logging();

    let a = create_tridiagonal_matrix(4);
    let b = create_tridiagonal_matrix(5);
    let pattern = OutputPattern::standard(4, 5, vec![0; 6], vec![]);
    let mut values: Vec<f64> = Vec::new();

    let err = gustavson_multiply(
        a.view(),
        b.view(),
        &PlusTimes::new(),
        &pattern,
        &mut values,
        &MultiplyConfig::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SpgemmError::DimensionMismatch {
            context: "A.cols vs B.rows",
            expected: 4,
            got: 5,
        }
    );
    assert!(err.to_string().contains("A.cols vs B.rows"));
}

#[test]
fn test_pattern_shape_must_match_operands() {
    init_logging();

    let a = create_tridiagonal_matrix(4);
    let pattern = symbolic_pattern(a.view(), a.view()).unwrap();
    let mut values = vec![0.0; pattern.nnz()];

    // B with one more column than the pattern
    let b = SparseMatrixCSC::from_columns(4, &[vec![(0, 1.0)], vec![], vec![], vec![], vec![]])
        .unwrap();

    let err = gustavson_multiply(
        a.view(),
        b.view(),
        &PlusTimes::new(),
        &pattern,
        &mut values,
        &MultiplyConfig::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SpgemmError::DimensionMismatch {
            context: "C.cols vs B.cols",
            expected: 5,
            got: 4,
        }
    );
}

#[test]
fn test_output_buffer_length_is_checked() {
    init_logging();

    let a = create_tridiagonal_matrix(4);
    let pattern = symbolic_pattern(a.view(), a.view()).unwrap();
    let mut values = vec![0.0; pattern.nnz() + 1];

    let err = gustavson_multiply(
        a.view(),
        a.view(),
        &PlusTimes::new(),
        &pattern,
        &mut values,
        &MultiplyConfig::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SpgemmError::OutputLength {
            expected: pattern.nnz(),
            got: pattern.nnz() + 1,
        }
    );
}

#[test]
fn test_pattern_rows_out_of_range_are_rejected() {
    init_logging();

    let a = create_tridiagonal_matrix(3);
    let pattern = OutputPattern::standard(3, 3, vec![0, 1, 2, 3], vec![0, 7, 2]);
    let mut values = vec![0.0; 3];

    let err = gustavson_multiply(
        a.view(),
        a.view(),
        &PlusTimes::new(),
        &pattern,
        &mut values,
        &MultiplyConfig::with_pattern_check(PatternCheck::Full),
    )
    .unwrap_err();

    match err {
        SpgemmError::MalformedPattern { reason } => assert!(reason.contains("out of bounds")),
        other => panic!("expected malformed pattern, got {:?}", other),
    }
}

#[test]
fn test_pattern_pointer_length_is_checked_shallow() {
    init_logging();

    let a = create_tridiagonal_matrix(3);
    let pattern = OutputPattern::standard(3, 3, vec![0, 3, 6], vec![0, 1, 2, 0, 1, 2]);
    let mut values = vec![0.0; 6];

    let err = gustavson_multiply(
        a.view(),
        a.view(),
        &PlusTimes::new(),
        &pattern,
        &mut values,
        &MultiplyConfig::with_pattern_check(PatternCheck::Shallow),
    )
    .unwrap_err();

    assert!(matches!(err, SpgemmError::MalformedPattern { .. }));
}

#[test]
fn test_pattern_row_out_of_range_is_an_error_at_every_check_level() {
    init_logging();

    let a = create_tridiagonal_matrix(3);
    let pattern = OutputPattern::standard(3, 3, vec![0, 1, 2, 3], vec![0, 7, 2]);

    for check in [PatternCheck::Shallow, PatternCheck::Full] {
        let mut values = vec![0.0; 3];
        let err = gustavson_multiply(
            a.view(),
            a.view(),
            &PlusTimes::new(),
            &pattern,
            &mut values,
            &MultiplyConfig::with_pattern_check(check),
        )
        .unwrap_err();

        match err {
            SpgemmError::MalformedPattern { reason } => {
                assert!(reason.contains("out of bounds"), "{:?}: {}", check, reason)
            }
            other => panic!("expected malformed pattern, got {:?}", other),
        }
        assert_eq!(values, vec![0.0; 3]);
    }
}

#[test]
fn test_views_report_shapes() {
    let (wide, wide_h) = create_wide_sparse_pair();

    assert_eq!(wide.view().nvec(), 200);
    assert_eq!(wide_h.view().nvec(), 5);
    assert_eq!(wide_h.view().nnz(), wide.nnz());
}
