//! Compiled pattern representation.

use std::fmt;
use std::str::FromStr;

use graft_core::{Node, NodeId};
use graft_graph::Graph;
use graft_parser::{parse_pattern, NodeExpr, PatternExpr};
use regex_lite::Regex;

use crate::{MatchConfig, MatchOutcome, Matcher, PatternError, PatternResult};

/// A compiled pattern ready for matching. Immutable and reusable.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    /// One node whose kind matches a regex.
    Node(NodePattern),
    /// Sub-patterns chained through their frontiers.
    Serial(Vec<CompiledPattern>),
    /// Sub-patterns over sibling branches that converge.
    Parallel(Vec<CompiledPattern>),
}

/// A single node test: kind regex plus optional condition.
#[derive(Debug, Clone)]
pub struct NodePattern {
    source: String,
    kind: Regex,
    condition: Option<String>,
}

impl NodePattern {
    /// Compile a kind regex. It must match the whole kind.
    pub fn new(kind: &str, condition: Option<String>) -> PatternResult<Self> {
        let regex = Regex::new(&format!("^(?:{})$", kind))
            .map_err(|e| PatternError::invalid_regex(kind, e.to_string()))?;
        Ok(Self {
            source: kind.to_string(),
            kind: regex,
            condition,
        })
    }

    /// A pattern matching exactly one kind string.
    pub fn literal(kind: &str) -> PatternResult<Self> {
        let mut pattern = Self::new(&regex_lite::escape(kind), None)?;
        pattern.source = kind.to_string();
        Ok(pattern)
    }

    /// The kind regex as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Check a node against the kind regex and the condition.
    pub fn accepts(&self, node: &Node, config: &MatchConfig) -> bool {
        if !self.kind.is_match(&node.kind) {
            return false;
        }
        match &self.condition {
            None => true,
            Some(condition) => node
                .get_attr(&config.condition_attr)
                .is_some_and(|value| value.matches_text(condition)),
        }
    }
}

impl CompiledPattern {
    /// Compile a parsed pattern tree.
    pub fn compile(expr: &PatternExpr) -> PatternResult<Self> {
        match expr {
            PatternExpr::Node(node) => compile_node(node).map(CompiledPattern::Node),
            PatternExpr::Serial(items) => compile_all(items).map(CompiledPattern::Serial),
            PatternExpr::Parallel(items) => compile_all(items).map(CompiledPattern::Parallel),
        }
    }

    /// Parse and compile pattern text.
    pub fn parse(text: &str) -> PatternResult<Self> {
        let expr = parse_pattern(text)?;
        Self::compile(&expr)
    }

    /// Match against a graph from the given start nodes with default settings.
    pub fn matches(&self, graph: &Graph, start: &[NodeId]) -> PatternResult<Option<MatchOutcome>> {
        Matcher::new(graph).match_at(self, start)
    }

    /// Direct sub-patterns (empty for node patterns).
    pub fn children(&self) -> &[CompiledPattern] {
        match self {
            CompiledPattern::Node(_) => &[],
            CompiledPattern::Serial(items) | CompiledPattern::Parallel(items) => items,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, CompiledPattern::Node(_))
    }

    pub fn is_serial(&self) -> bool {
        matches!(self, CompiledPattern::Serial(_))
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, CompiledPattern::Parallel(_))
    }
}

fn compile_node(node: &NodeExpr) -> PatternResult<NodePattern> {
    NodePattern::new(&node.kind, node.condition.clone())
}

fn compile_all(items: &[PatternExpr]) -> PatternResult<Vec<CompiledPattern>> {
    items.iter().map(CompiledPattern::compile).collect()
}

impl FromStr for CompiledPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "{}[{}]", self.source, condition),
            None => write!(f, "{}", self.source),
        }
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (items, separator) = match self {
            CompiledPattern::Node(node) => return write!(f, "{}", node),
            CompiledPattern::Serial(items) => (items, " > "),
            CompiledPattern::Parallel(items) => (items, " | "),
        };
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            if item.is_node() {
                write!(f, "{}", item)?;
            } else {
                write!(f, "({})", item)?;
            }
        }
        Ok(())
    }
}
