//! Fold - collapse each match group into one node.

use graft_core::{Node, NodeId};
use graft_graph::Graph;
use graft_pattern::{CompiledPattern, MatchConfig, Matcher};

use crate::{Transform, TransformOutcome, TransformResult, FOLD_NAME_SEPARATOR};

/// What a folded group turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldTarget {
    /// A new node of this kind.
    Kind(String),
    /// The group's first member, rewired.
    First,
    /// The group's last member, rewired.
    Last,
}

/// Replace every match of a pattern with a single node.
///
/// One search pass per `apply`: groups created by the fold itself are not
/// folded again until the next call.
#[derive(Debug, Clone)]
pub struct Fold {
    pattern: CompiledPattern,
    target: FoldTarget,
    name: Option<String>,
    config: MatchConfig,
}

impl Fold {
    /// Fold matches into a new node of kind `kind`.
    pub fn new(pattern: &str, kind: impl Into<String>) -> TransformResult<Self> {
        Self::with_target(pattern, FoldTarget::Kind(kind.into()))
    }

    /// Fold matches onto their first member.
    pub fn keep_first(pattern: &str) -> TransformResult<Self> {
        Self::with_target(pattern, FoldTarget::First)
    }

    /// Fold matches onto their last member.
    pub fn keep_last(pattern: &str) -> TransformResult<Self> {
        Self::with_target(pattern, FoldTarget::Last)
    }

    pub fn with_target(pattern: &str, target: FoldTarget) -> TransformResult<Self> {
        Ok(Self {
            pattern: CompiledPattern::parse(pattern)?,
            target,
            name: None,
            config: MatchConfig::default(),
        })
    }

    /// Display name for the folded node.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn target(&self) -> &FoldTarget {
        &self.target
    }

    /// Build the node that stands in for `members`.
    ///
    /// Returns the node and whether it carries a new identity.
    fn combine(&self, graph: &Graph, members: &[NodeId]) -> Option<(Node, bool)> {
        let first = graph.node(members.first()?)?;
        let last = graph.node(members.last()?)?;

        let (mut node, created) = match &self.target {
            FoldTarget::First => (first.clone(), false),
            FoldTarget::Last => (last.clone(), false),
            FoldTarget::Kind(kind) => {
                let name = members
                    .iter()
                    .filter_map(|id| graph.node(id))
                    .map(Node::title)
                    .collect::<Vec<_>>()
                    .join(FOLD_NAME_SEPARATOR);
                let node = Node::new(graph.sequence_id(members), name, kind.as_str())
                    .with_attrs(last.attributes.clone());
                (node, true)
            }
        };
        if let Some(name) = &self.name {
            node.name = name.clone();
        }
        Some((node, created))
    }
}

impl Transform for Fold {
    fn name(&self) -> &'static str {
        "fold"
    }

    #[tracing::instrument(name = "fold", skip_all, fields(pattern = %self.pattern))]
    fn apply(&self, graph: &mut Graph) -> TransformResult<TransformOutcome> {
        let found = Matcher::with_config(graph, self.config.clone()).search(&self.pattern)?;

        let mut outcome = TransformOutcome::default();
        for group in found {
            let Some((node, created)) = self.combine(graph, &group.nodes) else {
                continue;
            };
            let members = group.nodes.len();
            let id = graph.replace(&group.nodes, node)?;
            tracing::debug!(%id, members, "folded");

            outcome.matched += 1;
            if created {
                outcome.created += 1;
                outcome.removed += members;
            } else {
                outcome.removed += members - 1;
            }
        }
        Ok(outcome)
    }
}
