//! FoldDuplicates - collapse runs of identical nodes.

use graft_core::NodeId;
use graft_graph::Graph;
use graft_pattern::{CompiledPattern, MatchConfig, Matcher, NodePattern};

use crate::{Transform, TransformOutcome, TransformResult};

/// Merge a node into its sole successor when both have the same kind.
///
/// The merged node keeps the first node's identity and the sum of both
/// repeat counts. Runs until no such pair remains, so a chain of `n`
/// identical nodes ends up as one node with `repeat == n`.
#[derive(Debug, Clone, Default)]
pub struct FoldDuplicates {
    config: MatchConfig,
}

impl FoldDuplicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The first node, in insertion order, followed by a node of its kind.
    fn next_pair(&self, graph: &Graph) -> TransformResult<Option<Vec<NodeId>>> {
        let matcher = Matcher::with_config(graph, self.config.clone());
        for node in graph.nodes() {
            let step = CompiledPattern::Node(NodePattern::literal(&node.kind)?);
            let pair = CompiledPattern::Serial(vec![step.clone(), step]);

            let Some(found) = matcher.match_at(&pair, std::slice::from_ref(&node.id))? else {
                continue;
            };
            // a self-loop matches the node against itself
            if found.nodes.len() == 2 {
                return Ok(Some(found.nodes));
            }
        }
        Ok(None)
    }
}

impl Transform for FoldDuplicates {
    fn name(&self) -> &'static str {
        "fold_duplicates"
    }

    #[tracing::instrument(name = "fold_duplicates", skip_all)]
    fn apply(&self, graph: &mut Graph) -> TransformResult<TransformOutcome> {
        let mut outcome = TransformOutcome::default();

        while let Some(pair) = self.next_pair(graph)? {
            let mut nodes = pair.iter().filter_map(|id| graph.node(id));
            let (Some(first), Some(second)) = (nodes.next(), nodes.next()) else {
                break;
            };
            let mut merged = first.clone();
            merged.repeat = first.repeat + second.repeat;
            tracing::trace!(into = %merged.id, repeat = merged.repeat, "merging duplicate");

            graph.replace(&pair, merged)?;
            outcome.matched += 1;
            outcome.removed += 1;
        }
        tracing::debug!(merged = outcome.matched, "fold duplicates finished");
        Ok(outcome)
    }
}
