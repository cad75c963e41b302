//! Indexes for efficient graph lookups.

use graft_core::{Edge, NodeId};
use indexmap::IndexSet;
use std::collections::HashMap;

/// Adjacency index: NodeId -> { successors, predecessors }, both in edge order.
#[derive(Debug, Default, Clone)]
pub struct AdjacencyIndex {
    outbound: HashMap<NodeId, IndexSet<NodeId>>,
    inbound: HashMap<NodeId, IndexSet<NodeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: &Edge) {
        self.outbound
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.target.clone());
        self.inbound
            .entry(edge.target.clone())
            .or_default()
            .insert(edge.source.clone());
    }

    pub fn remove(&mut self, edge: &Edge) {
        if let Some(set) = self.outbound.get_mut(&edge.source) {
            set.shift_remove(&edge.target);
            if set.is_empty() {
                self.outbound.remove(&edge.source);
            }
        }
        if let Some(set) = self.inbound.get_mut(&edge.target) {
            set.shift_remove(&edge.source);
            if set.is_empty() {
                self.inbound.remove(&edge.target);
            }
        }
    }

    /// Nodes reached by edges leaving `node_id`.
    pub fn successors<'a>(&'a self, node_id: &NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.outbound
            .get(node_id)
            .into_iter()
            .flat_map(|set| set.iter())
    }

    /// Nodes whose edges arrive at `node_id`.
    pub fn predecessors<'a>(&'a self, node_id: &NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.inbound
            .get(node_id)
            .into_iter()
            .flat_map(|set| set.iter())
    }

    /// All edges touching a node, outbound first.
    pub fn edges_involving(&self, node_id: &NodeId) -> Vec<Edge> {
        let outbound = self
            .successors(node_id)
            .map(|target| Edge::new(node_id.clone(), target.clone()));
        let inbound = self
            .predecessors(node_id)
            .filter(|source| *source != node_id)
            .map(|source| Edge::new(source.clone(), node_id.clone()));
        outbound.chain(inbound).collect()
    }
}
