//! Core graph storage implementation.

use crate::index::AdjacencyIndex;
use graft_core::{Edge, GraphError, GraphResult, Node, NodeId};
use indexmap::{IndexMap, IndexSet};

/// The in-memory computation graph.
///
/// Nodes iterate in insertion order. Edges form a set: adding an existing
/// edge is a no-op. Every edge endpoint is a node currently in the graph.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    /// Node storage
    nodes: IndexMap<NodeId, Node>,
    /// Edge storage
    edges: IndexSet<Edge>,
    /// Adjacency index
    adj_index: AdjacencyIndex,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Node Operations ====================

    /// Add a node. Its identity must not already be present.
    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeId> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::duplicate_node(node.id));
        }
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Returns true if the node is part of the graph.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a node by ID.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Position of a node in the canonical iteration order.
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: &NodeId) -> GraphResult<Node> {
        self.detach(id).ok_or_else(|| GraphError::node_not_found(id))
    }

    /// Remove a set of nodes and every edge touching any of them.
    ///
    /// All nodes are checked before anything is removed.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> GraphResult<Vec<Node>> {
        self.check_present(ids)?;
        let unique: IndexSet<&NodeId> = ids.iter().collect();
        Ok(unique.into_iter().filter_map(|id| self.detach(id)).collect())
    }

    // ==================== Edge Operations ====================

    /// Add an edge between two present nodes.
    ///
    /// Returns false if the edge already existed.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> GraphResult<bool> {
        let edge = Edge::new(source, target);
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains(endpoint) {
                return Err(GraphError::node_not_found(endpoint));
            }
        }
        Ok(self.insert_edge(edge))
    }

    /// Remove an edge. Returns false if it did not exist.
    pub fn remove_edge(&mut self, source: &NodeId, target: &NodeId) -> bool {
        let edge = Edge::new(source.clone(), target.clone());
        if self.edges.shift_remove(&edge) {
            self.adj_index.remove(&edge);
            true
        } else {
            false
        }
    }

    /// Returns true if the edge `source -> target` exists.
    pub fn has_edge(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edges
            .contains(&Edge::new(source.clone(), target.clone()))
    }

    // ==================== Adjacency ====================

    /// Nodes at the end of edges leaving `id`, in edge-insertion order.
    pub fn outgoing(&self, id: &NodeId) -> Vec<NodeId> {
        self.adj_index.successors(id).cloned().collect()
    }

    /// Nodes at the start of edges arriving at `id`, in edge-insertion order.
    pub fn incoming(&self, id: &NodeId) -> Vec<NodeId> {
        self.adj_index.predecessors(id).cloned().collect()
    }

    /// Parallel groups `id` could belong to, each including `id` itself.
    ///
    /// A node with a single predecessor shares it with the predecessor's
    /// other successors. A node with a single successor shares it with that
    /// successor's other predecessors. Both groups are reported when both
    /// apply and differ. A node with neither stands alone.
    pub fn sibling_groups(&self, id: &NodeId) -> Vec<Vec<NodeId>> {
        let mut groups: Vec<Vec<NodeId>> = Vec::new();
        if let [parent] = self.incoming(id).as_slice() {
            groups.push(self.outgoing(parent));
        }
        if let [child] = self.outgoing(id).as_slice() {
            let group = self.incoming(child);
            if !groups.iter().any(|seen| same_members(seen, &group)) {
                groups.push(group);
            }
        }
        if groups.is_empty() {
            groups.push(vec![id.clone()]);
        }
        groups
    }

    // ==================== Rewriting ====================

    /// Merge a set of nodes into `node`.
    ///
    /// Edges entering the set from outside now enter `node`, edges leaving the
    /// set now leave `node`, and edges internal to the set are dropped. The new
    /// node takes the iteration position of the earliest member. Its identity
    /// may reuse a member's identity but no other node's.
    pub fn replace(&mut self, members: &[NodeId], node: Node) -> GraphResult<NodeId> {
        if members.is_empty() {
            return Err(GraphError::invalid_operation(
                "replace requires at least one node",
            ));
        }
        self.check_present(members)?;
        let set: IndexSet<&NodeId> = members.iter().collect();
        if self.contains(&node.id) && !set.contains(&node.id) {
            return Err(GraphError::duplicate_node(node.id));
        }

        let position = set
            .iter()
            .filter_map(|id| self.index_of(id))
            .min()
            .unwrap_or(self.nodes.len());

        let mut inbound = Vec::new();
        let mut outbound = Vec::new();
        for edge in &self.edges {
            match (set.contains(&edge.source), set.contains(&edge.target)) {
                (false, true) => inbound.push(edge.source.clone()),
                (true, false) => outbound.push(edge.target.clone()),
                _ => {}
            }
        }

        let owned: Vec<NodeId> = set.into_iter().cloned().collect();
        for id in &owned {
            self.detach(id);
        }

        let id = node.id.clone();
        self.nodes.shift_insert(position, id.clone(), node);
        for source in inbound {
            self.insert_edge(Edge::new(source, id.clone()));
        }
        for target in outbound {
            self.insert_edge(Edge::new(id.clone(), target));
        }
        Ok(id)
    }

    /// A fresh identity for a node standing in for `members`.
    ///
    /// Member identities joined with `/`; a `#k` suffix is added when that
    /// name belongs to a node outside the set.
    pub fn sequence_id(&self, members: &[NodeId]) -> NodeId {
        let base = members
            .iter()
            .map(NodeId::as_str)
            .collect::<Vec<_>>()
            .join("/");
        let taken = |candidate: &NodeId| {
            self.contains(candidate) && !members.contains(candidate)
        };

        let mut candidate = NodeId::new(base.clone());
        let mut suffix = 1;
        while taken(&candidate) {
            candidate = NodeId::new(format!("{base}#{suffix}"));
            suffix += 1;
        }
        candidate
    }

    // ==================== Statistics ====================

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All node IDs in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes.keys()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Mutable access to all nodes in insertion order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> + '_ {
        self.nodes.values_mut()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    // ==================== Internals ====================

    fn check_present(&self, ids: &[NodeId]) -> GraphResult<()> {
        match ids.iter().find(|id| !self.contains(id)) {
            Some(missing) => Err(GraphError::node_not_found(missing)),
            None => Ok(()),
        }
    }

    fn insert_edge(&mut self, edge: Edge) -> bool {
        if self.edges.contains(&edge) {
            return false;
        }
        self.adj_index.insert(&edge);
        self.edges.insert(edge)
    }

    /// Remove a node with its edges; absent nodes are ignored.
    fn detach(&mut self, id: &NodeId) -> Option<Node> {
        let node = self.nodes.shift_remove(id)?;
        for edge in self.adj_index.edges_involving(id) {
            self.edges.shift_remove(&edge);
            self.adj_index.remove(&edge);
        }
        Some(node)
    }
}

fn same_members(a: &[NodeId], b: &[NodeId]) -> bool {
    a.len() == b.len() && a.iter().all(|id| b.contains(id))
}
