//! Assertion types and builders for verifying step results.

use graft_core::NodeId;
use graft_graph::Graph;
use graft_transform::TransformOutcome;

use crate::error::{ScenarioError, ScenarioResult};

/// Expectations checked after one step.
#[derive(Default)]
pub struct Assertion {
    // Outcome assertions
    pub matched: Option<usize>,
    pub renamed: Option<usize>,
    pub created: Option<usize>,
    pub removed: Option<usize>,
    pub noop: bool,

    // Graph assertions
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub present: Vec<NodeId>,
    pub absent: Vec<NodeId>,
    pub kinds: Vec<(NodeId, String)>,
    pub successors: Vec<(NodeId, Vec<NodeId>)>,
    pub predecessors: Vec<(NodeId, Vec<NodeId>)>,

    // Error assertions
    pub error: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Graph) -> bool>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("matched", &self.matched)
            .field("created", &self.created)
            .field("removed", &self.removed)
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("kinds", &self.kinds)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

fn ids(list: &[&str]) -> Vec<NodeId> {
    list.iter().map(|s| NodeId::from(*s)).collect()
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Builders ====================

    pub fn matched(mut self, n: usize) -> Self {
        self.matched = Some(n);
        self
    }

    pub fn renamed(mut self, n: usize) -> Self {
        self.renamed = Some(n);
        self
    }

    pub fn created(mut self, n: usize) -> Self {
        self.created = Some(n);
        self
    }

    pub fn removed(mut self, n: usize) -> Self {
        self.removed = Some(n);
        self
    }

    /// The step must leave the graph untouched.
    pub fn noop(mut self) -> Self {
        self.noop = true;
        self
    }

    pub fn nodes(mut self, n: usize) -> Self {
        self.nodes = Some(n);
        self
    }

    pub fn edges(mut self, n: usize) -> Self {
        self.edges = Some(n);
        self
    }

    pub fn present(mut self, id: &str) -> Self {
        self.present.push(NodeId::from(id));
        self
    }

    pub fn absent(mut self, id: &str) -> Self {
        self.absent.push(NodeId::from(id));
        self
    }

    pub fn kind(mut self, id: &str, kind: &str) -> Self {
        self.kinds.push((NodeId::from(id), kind.to_string()));
        self
    }

    /// Exact successor list, in edge order.
    pub fn successors(mut self, id: &str, expected: &[&str]) -> Self {
        self.successors.push((NodeId::from(id), ids(expected)));
        self
    }

    /// Exact predecessor list, in edge order.
    pub fn predecessors(mut self, id: &str, expected: &[&str]) -> Self {
        self.predecessors.push((NodeId::from(id), ids(expected)));
        self
    }

    /// The step must fail with a message containing `text`.
    pub fn error(mut self, text: &str) -> Self {
        self.error = Some(text.to_string());
        self
    }

    pub fn custom(mut self, check: impl Fn(&Graph) -> bool + 'static) -> Self {
        self.custom = Some(Box::new(check));
        self
    }

    // ==================== Verification ====================

    /// Verify the assertion against a step result and the graph after it.
    pub fn verify(
        &self,
        step: &str,
        graph: &Graph,
        result: &Result<TransformOutcome, String>,
    ) -> ScenarioResult<()> {
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', but step succeeded", expected_error),
                )),
            };
        }

        let outcome = result
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        self.verify_outcome(step, outcome)?;
        self.verify_graph(step, graph)?;

        if let Some(ref custom) = self.custom {
            if !custom(graph) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }
        Ok(())
    }

    fn verify_outcome(&self, step: &str, outcome: &TransformOutcome) -> ScenarioResult<()> {
        let counts = [
            ("matched", self.matched, outcome.matched),
            ("renamed", self.renamed, outcome.renamed),
            ("created", self.created, outcome.created),
            ("removed", self.removed, outcome.removed),
        ];
        for (label, expected, actual) in counts {
            if let Some(expected) = expected {
                if expected != actual {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected {} {}, got {}", expected, label, actual),
                    ));
                }
            }
        }

        if self.noop && !outcome.is_noop() {
            return Err(ScenarioError::assertion_failed(
                step,
                format!("expected no change, got {:?}", outcome),
            ));
        }
        Ok(())
    }

    fn verify_graph(&self, step: &str, graph: &Graph) -> ScenarioResult<()> {
        if let Some(expected) = self.nodes {
            if graph.node_count() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} nodes, got {}", expected, graph.node_count()),
                ));
            }
        }

        if let Some(expected) = self.edges {
            if graph.edge_count() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} edges, got {}", expected, graph.edge_count()),
                ));
            }
        }

        for id in &self.present {
            if !graph.contains(id) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected node {} to exist", id),
                ));
            }
        }

        for id in &self.absent {
            if graph.contains(id) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected node {} to be gone", id),
                ));
            }
        }

        for (id, kind) in &self.kinds {
            let actual = graph.node(id).map(|n| n.kind.as_str());
            if actual != Some(kind.as_str()) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected node {} of kind '{}', got {:?}", id, kind, actual),
                ));
            }
        }

        for (id, expected) in &self.successors {
            let actual = graph.outgoing(id);
            if &actual != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected successors of {} {:?}, got {:?}", id, expected, actual),
                ));
            }
        }

        for (id, expected) in &self.predecessors {
            let actual = graph.incoming(id);
            if &actual != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected predecessors of {} {:?}, got {:?}", id, expected, actual),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::Node;

    fn graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::labeled("a")).unwrap();
        graph.add_node(Node::labeled("b")).unwrap();
        graph.add_edge("a", "b").unwrap();
        graph
    }

    #[test]
    fn test_graph_assertions_pass() {
        let assertion = Assertion::new()
            .nodes(2)
            .edges(1)
            .kind("a", "a")
            .successors("a", &["b"])
            .predecessors("b", &["a"])
            .absent("c");

        assertion
            .verify("check", &graph(), &Ok(TransformOutcome::default()))
            .unwrap();
    }

    #[test]
    fn test_count_mismatch_is_reported() {
        let err = Assertion::new()
            .removed(1)
            .verify("prune", &graph(), &Ok(TransformOutcome::default()))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Assertion failed in step 'prune': expected 1 removed, got 0"
        );
    }

    #[test]
    fn test_expected_error() {
        let failed: Result<TransformOutcome, String> = Err("Invalid pattern at column 3".into());

        Assertion::new()
            .error("Invalid pattern")
            .verify("bad", &graph(), &failed)
            .unwrap();
        assert!(Assertion::new().verify("bad", &graph(), &failed).is_err());
    }
}
