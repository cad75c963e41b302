//! Entity structures for Graft.
//!
//! Nodes and edges are the two entity types of a computation graph.

use crate::{Attributes, NodeId, Value};

/// A node in the computation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Operation kind, the field kind patterns match against.
    pub kind: String,
    /// Auxiliary attributes (shapes, parameters).
    pub attributes: Attributes,
    /// Number of identical consecutive nodes this node stands for.
    pub repeat: usize,
}

impl Node {
    /// Create a new node with the given properties.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            attributes: Attributes::new(),
            repeat: 1,
        }
    }

    /// Create a node whose name and kind both equal its identifier.
    pub fn labeled(label: &str) -> Self {
        Self::new(label, label, label)
    }

    /// Replace the attribute map.
    pub fn with_attrs(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.attributes.shift_remove(name)
    }

    /// Kind label including the repeat count, e.g. `Conv x3`.
    pub fn title(&self) -> String {
        if self.repeat > 1 {
            format!("{} x{}", self.kind, self.repeat)
        } else {
            self.kind.clone()
        }
    }
}

impl From<&Node> for NodeId {
    fn from(node: &Node) -> Self {
        node.id.clone()
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns true if the edge starts and ends at the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Check if this edge touches a specific node.
    pub fn involves(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}
