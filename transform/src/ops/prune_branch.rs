//! PruneBranch - remove matched nodes and the inputs that only feed them.

use std::collections::HashSet;

use graft_core::NodeId;
use graft_graph::Graph;
use graft_pattern::{CompiledPattern, MatchConfig, Matcher};

use crate::{Transform, TransformOutcome, TransformResult};

/// Remove every matched node, then every ancestor all of whose successors
/// are being removed.
#[derive(Debug, Clone)]
pub struct PruneBranch {
    pattern: CompiledPattern,
    config: MatchConfig,
}

impl PruneBranch {
    pub fn new(pattern: &str) -> TransformResult<Self> {
        Ok(Self {
            pattern: CompiledPattern::parse(pattern)?,
            config: MatchConfig::default(),
        })
    }

    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Walk up from `roots`, collecting nodes whose outputs all die.
    fn doomed(graph: &Graph, roots: Vec<NodeId>) -> HashSet<NodeId> {
        let mut doomed: HashSet<NodeId> = roots.iter().cloned().collect();
        let mut pending = roots;

        while let Some(id) = pending.pop() {
            for parent in graph.incoming(&id) {
                if doomed.contains(&parent) {
                    continue;
                }
                if graph.outgoing(&parent).iter().all(|child| doomed.contains(child)) {
                    doomed.insert(parent.clone());
                    pending.push(parent);
                }
            }
        }
        doomed
    }
}

impl Transform for PruneBranch {
    fn name(&self) -> &'static str {
        "prune_branch"
    }

    #[tracing::instrument(name = "prune_branch", skip_all, fields(pattern = %self.pattern))]
    fn apply(&self, graph: &mut Graph) -> TransformResult<TransformOutcome> {
        let found = Matcher::with_config(graph, self.config.clone()).search(&self.pattern)?;
        if found.is_empty() {
            return Ok(TransformOutcome::default());
        }

        let doomed = Self::doomed(graph, found.matched());
        let victims: Vec<NodeId> = graph
            .node_ids()
            .filter(|id| doomed.contains(*id))
            .cloned()
            .collect();
        graph.remove_nodes(&victims)?;
        tracing::debug!(groups = found.len(), removed = victims.len(), "pruned branches");

        Ok(TransformOutcome {
            matched: found.len(),
            removed: victims.len(),
            ..Default::default()
        })
    }
}
