//! Accumulator implementations for sparse matrix multiplication
//!
//! The numeric phase works one output column at a time and accumulates the
//! column's partial results in a dense, row-indexed workspace before
//! gathering them into C's sparse storage.

pub mod dense;

pub use dense::DenseAccumulator;
