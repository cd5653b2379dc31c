//! Error types for gustavson

use thiserror::Error;

/// Result type alias using the crate's error
pub type Result<T> = std::result::Result<T, SpgemmError>;

/// Caller-contract violations detected at construction or at multiply entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpgemmError {
    /// Operand or output dimensions are incompatible
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which dimension was checked
        context: &'static str,
        /// Expected size
        expected: usize,
        /// Actual size
        got: usize,
    },

    /// A matrix's compressed storage is structurally invalid
    #[error("malformed {context}: {reason}")]
    MalformedMatrix {
        /// Which matrix or format
        context: &'static str,
        /// What was wrong
        reason: String,
    },

    /// The precomputed output pattern is structurally invalid
    #[error("malformed output pattern: {reason}")]
    MalformedPattern {
        /// What was wrong
        reason: String,
    },

    /// Output value storage does not match the pattern's entry count
    #[error("output storage holds {got} values but the pattern has {expected} entries")]
    OutputLength {
        /// Pattern nnz
        expected: usize,
        /// Storage length
        got: usize,
    },
}

impl SpgemmError {
    pub(crate) fn malformed(context: &'static str, reason: impl Into<String>) -> Self {
        SpgemmError::MalformedMatrix {
            context,
            reason: reason.into(),
        }
    }

    pub(crate) fn pattern(reason: impl Into<String>) -> Self {
        SpgemmError::MalformedPattern {
            reason: reason.into(),
        }
    }
}
