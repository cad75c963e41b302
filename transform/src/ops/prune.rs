//! Prune - remove matched nodes.

use graft_graph::Graph;
use graft_pattern::{CompiledPattern, MatchConfig, Matcher};

use crate::{Transform, TransformOutcome, TransformResult};

/// Remove every matched node together with the edges touching it.
#[derive(Debug, Clone)]
pub struct Prune {
    pattern: CompiledPattern,
    config: MatchConfig,
}

impl Prune {
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

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }
}

impl Transform for Prune {
    fn name(&self) -> &'static str {
        "prune"
    }

    #[tracing::instrument(name = "prune", skip_all, fields(pattern = %self.pattern))]
    fn apply(&self, graph: &mut Graph) -> TransformResult<TransformOutcome> {
        let found = Matcher::with_config(graph, self.config.clone()).search(&self.pattern)?;

        let mut outcome = TransformOutcome::default();
        for group in found {
            let removed = graph.remove_nodes(&group.nodes)?;
            tracing::debug!(removed = removed.len(), "pruned");
            outcome.matched += 1;
            outcome.removed += removed.len();
        }
        Ok(outcome)
    }
}
