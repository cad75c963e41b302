//! Matching configuration.

use crate::{DEFAULT_CONDITION_ATTR, MAX_PARALLEL_BRANCHES};

/// Knobs for how patterns are checked against nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Node attribute compared with a pattern's `[condition]` text.
    pub condition_attr: String,
    /// Parallel patterns with more branches than this never match.
    pub max_parallel_branches: usize,
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition_attr(mut self, attr: impl Into<String>) -> Self {
        self.condition_attr = attr.into();
        self
    }

    pub fn with_max_parallel_branches(mut self, max: usize) -> Self {
        self.max_parallel_branches = max;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            condition_attr: DEFAULT_CONDITION_ATTR.to_string(),
            max_parallel_branches: MAX_PARALLEL_BRANCHES,
        }
    }
}
