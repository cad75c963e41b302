//! Whole-graph search.

use std::collections::HashSet;

use graft_core::NodeId;
use graft_graph::Graph;

use crate::{CompiledPattern, MatchOutcome, Matcher, PatternResult};

/// All disjoint matches of one pattern, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub matches: Vec<MatchOutcome>,
}

impl SearchResult {
    /// Union of every matched node.
    pub fn matched(&self) -> Vec<NodeId> {
        self.matches
            .iter()
            .flat_map(|m| m.nodes.iter().cloned())
            .collect()
    }

    /// Union of every frontier, minus nodes some match consumed.
    pub fn frontier(&self) -> Vec<NodeId> {
        let consumed: HashSet<&NodeId> = self.matches.iter().flat_map(|m| &m.nodes).collect();
        let mut frontier: Vec<NodeId> = Vec::new();
        for id in self.matches.iter().flat_map(|m| &m.frontier) {
            if !consumed.contains(id) && !frontier.contains(id) {
                frontier.push(id.clone());
            }
        }
        frontier
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchOutcome> + '_ {
        self.matches.iter()
    }
}

impl IntoIterator for SearchResult {
    type Item = MatchOutcome;
    type IntoIter = std::vec::IntoIter<MatchOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'g> Matcher<'g> {
    /// Try `pattern` at every node in insertion order, skipping nodes an
    /// earlier match already consumed.
    #[tracing::instrument(skip_all, fields(pattern = %pattern))]
    pub fn search(&self, pattern: &CompiledPattern) -> PatternResult<SearchResult> {
        let graph = self.graph();
        let mut consumed: HashSet<NodeId> = HashSet::new();
        let mut result = SearchResult::default();

        for id in graph.node_ids() {
            if consumed.contains(id) {
                continue;
            }
            let outcome = match self.match_at(pattern, std::slice::from_ref(id)) {
                Ok(Some(outcome)) => outcome,
                Ok(None) => continue,
                Err(e) if e.is_local() => {
                    tracing::debug!(start = %id, error = %e, "skipping start node");
                    continue;
                }
                Err(e) => return Err(e),
            };
            if outcome.nodes.iter().any(|n| consumed.contains(n)) {
                tracing::trace!(start = %id, "discarding overlapping match");
                continue;
            }
            tracing::trace!(start = %id, nodes = outcome.nodes.len(), "match");
            consumed.extend(outcome.nodes.iter().cloned());
            result.matches.push(outcome);
        }

        tracing::debug!(matches = result.len(), "search finished");
        Ok(result)
    }
}

/// Find every disjoint match of `pattern` in `graph`.
pub fn search(graph: &Graph, pattern: &CompiledPattern) -> PatternResult<SearchResult> {
    Matcher::new(graph).search(pattern)
}
