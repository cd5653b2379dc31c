//! Centralized constants for the gustavson SpGEMM library
//!
//! All tunables live here rather than being scattered through the kernels.

// ============================================================================
// HYPERSPARSE LOOKUP
// ============================================================================

/// Number of entries in B(:,j) above which the hypersparse A bracket is
/// right-trimmed before the sweep. At or below this, trimming costs more
/// than the searches it saves.
pub const BRACKET_TRIM_THRESHOLD: usize = 2;

// ============================================================================
// WORKSPACE
// ============================================================================

/// Alignment in bytes of the dense accumulator buffer (one cache line)
pub const WORKSPACE_ALIGNMENT: usize = 64;

// ============================================================================
// DEBUG OUTPUT
// ============================================================================

/// Maximum number of columns printed by `Debug` implementations
pub const DEBUG_MAX_COLUMNS: usize = 5;

/// Maximum number of entries per column printed by `Debug` implementations
pub const DEBUG_MAX_ENTRIES: usize = 5;
