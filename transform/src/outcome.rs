//! Transform outcome.

use std::ops::AddAssign;

/// What a transform changed.
///
/// `created` counts nodes with a new identity, `removed` counts nodes that
/// left the graph. A fold onto a kept member creates nothing and removes
/// the other members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOutcome {
    /// Match groups acted on.
    pub matched: usize,
    /// Nodes whose kind or name changed.
    pub renamed: usize,
    pub created: usize,
    pub removed: usize,
}

impl TransformOutcome {
    /// Whether the graph was left untouched.
    pub fn is_noop(&self) -> bool {
        self.renamed == 0 && self.created == 0 && self.removed == 0
    }
}

impl AddAssign for TransformOutcome {
    fn add_assign(&mut self, other: Self) {
        self.matched += other.matched;
        self.renamed += other.renamed;
        self.created += other.created;
        self.removed += other.removed;
    }
}
