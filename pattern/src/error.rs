//! Pattern error types.

use graft_core::{GraphError, NodeId};
use graft_parser::ParseError;
use thiserror::Error;

/// Errors that can occur while compiling or matching patterns.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Malformed pattern text.
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// A node operand is not a valid regular expression.
    #[error("Invalid kind pattern '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    /// A start node or matched node is missing from the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A parallel group can be assigned to its branches in conflicting ways.
    #[error("Ambiguous parallel assignment over {} candidates", .candidates.len())]
    AmbiguousParallelAssignment { candidates: Vec<NodeId> },
}

impl PatternError {
    pub fn invalid_regex(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn ambiguous(candidates: Vec<NodeId>) -> Self {
        Self::AmbiguousParallelAssignment { candidates }
    }

    /// Local failures reject one start node; search moves on to the next.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::AmbiguousParallelAssignment { .. })
    }
}

/// Result type for pattern operations.
pub type PatternResult<T> = Result<T, PatternError>;
