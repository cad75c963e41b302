//! Common error types for Graft.

use crate::NodeId;
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A referenced node is not part of the graph.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node with the same identity is already present.
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// Invalid operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl GraphError {
    pub fn node_not_found(id: impl Into<NodeId>) -> Self {
        Self::NodeNotFound(id.into())
    }

    pub fn duplicate_node(id: impl Into<NodeId>) -> Self {
        Self::DuplicateNode(id.into())
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
