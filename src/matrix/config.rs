//! Configuration for the numeric multiply

use crate::constants::BRACKET_TRIM_THRESHOLD;

/// How much of the output pattern is validated at multiply entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCheck {
    /// Pointer, column-id and row-range checks
    Shallow,
    /// Also checks that rows ascend within every column
    Full,
}

impl Default for PatternCheck {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            PatternCheck::Full
        } else {
            PatternCheck::Shallow
        }
    }
}

/// Configuration for [`gustavson_multiply`](crate::gustavson_multiply)
#[derive(Debug, Clone)]
pub struct MultiplyConfig {
    /// Right-trim the hypersparse A bracket only when B(:,j) has more
    /// entries than this
    pub bracket_trim_threshold: usize,

    /// Validation applied to the output pattern before the sweep
    pub pattern_check: PatternCheck,
}

impl Default for MultiplyConfig {
    fn default() -> Self {
        Self {
            bracket_trim_threshold: BRACKET_TRIM_THRESHOLD,
            pattern_check: PatternCheck::default(),
        }
    }
}

impl MultiplyConfig {
    /// Default configuration with an explicit pattern check level
    pub fn with_pattern_check(pattern_check: PatternCheck) -> Self {
        Self {
            pattern_check,
            ..Self::default()
        }
    }
}
