//! # Gustavson: semiring SpGEMM over compressed-column matrices
//!
//! This library implements the numeric phase of Gustavson's sparse
//! matrix-matrix multiply: given A, B and the structural pattern of
//! C = A ⊕.⊗ B, it fills C's values one output column at a time through a
//! dense workspace.
//!
//! ## Overview
//!
//! - Both operands are compressed-column, either dense-indexed
//!   ([`SparseMatrixCSC`]) or hypersparse ([`HypersparseCSC`], which only
//!   stores non-empty columns and finds them by binary search)
//! - The output pattern ([`OutputPattern`]) comes from a prior symbolic pass
//!   ([`symbolic_pattern`]) and is never recomputed
//! - The arithmetic is any [`Semiring`]: ordinary plus-times, the tropical
//!   min-plus and max-plus, max-min, boolean or-and, or an
//!   [`OperatorSemiring`] built from plain functions
//! - Products are folded in ascending k for every entry, so results are
//!   deterministic even when `add` is not commutative
//!
//! ## Usage
//!
//! Two-phase multiplication with a caller-owned output buffer:
//!
//! ```
//! use gustavson::{gustavson_multiply, symbolic_pattern, MinPlus, MultiplyConfig, SparseMatrixCSC};
//!
//! // Edge weights 0->1 (1.0) and 1->2 (2.0), stored "to x from"
//! let adj = SparseMatrixCSC::new(3, 3, vec![0, 1, 2, 2], vec![1, 2], vec![1.0, 2.0]);
//!
//! let pattern = symbolic_pattern(adj.view(), adj.view()).unwrap();
//! let mut values = vec![f64::INFINITY; pattern.nnz()];
//! gustavson_multiply(
//!     adj.view(),
//!     adj.view(),
//!     &MinPlus::new(),
//!     &pattern,
//!     &mut values,
//!     &MultiplyConfig::default(),
//! )
//! .unwrap();
//!
//! // The only two-hop path is 0->1->2
//! assert_eq!(values, vec![3.0]);
//! ```
//!
//! Or in one call, allocating the result:
//!
//! ```
//! use gustavson::{spgemm, MultiplyConfig, PlusTimes, SparseMatrixCSC};
//!
//! let a = SparseMatrixCSC::<f64>::identity(3);
//! let c = spgemm(a.view(), a.view(), &PlusTimes::new(), &MultiplyConfig::default()).unwrap();
//! assert_eq!(c.get(2, 2), Some(1.0));
//! ```

pub mod accumulator;
pub mod constants;
pub mod error;
pub mod gustavson;
pub mod matrix;
pub mod semiring;
pub mod symbolic;
pub mod utils;

// Re-export primary components
pub use accumulator::DenseAccumulator;
pub use error::{Result, SpgemmError};
pub use gustavson::{gustavson_multiply, spgemm, MultiplyStats};
pub use matrix::{
    reference_spgemm, ColumnLookup, HypersparseCSC, MultiplyConfig, OutputPattern, PatternCheck,
    SearchBracket, SparseMatrix, SparseMatrixCSC, SparseMatrixView,
};
pub use semiring::{LorLand, MaxMin, MaxPlus, MinPlus, OperatorSemiring, PlusTimes, Semiring};
pub use symbolic::symbolic_pattern;
pub use utils::{from_sprs_csc, to_sprs_csc};

/// Version information for the gustavson library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
