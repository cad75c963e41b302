//! Abstract Syntax Tree types for graph patterns.

use std::fmt;

/// Source location for error reporting (byte offsets into the pattern text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at a position.
    pub fn at(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// 1-based column of the span start.
    pub fn column(&self) -> usize {
        self.start + 1
    }
}

/// A parsed pattern expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternExpr {
    /// A single node operand.
    Node(NodeExpr),
    /// Operands chained by `>`; always at least two.
    Serial(Vec<PatternExpr>),
    /// Operands joined by `|`; always at least two.
    Parallel(Vec<PatternExpr>),
}

/// A node operand: `Kind` or `Kind[condition]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeExpr {
    /// Regular expression for the node kind.
    pub kind: String,
    /// Trimmed condition text, if a `[...]` suffix was given.
    pub condition: Option<String>,
    pub span: Span,
}

impl PatternExpr {
    pub fn is_node(&self) -> bool {
        matches!(self, PatternExpr::Node(_))
    }

    pub fn is_serial(&self) -> bool {
        matches!(self, PatternExpr::Serial(_))
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, PatternExpr::Parallel(_))
    }

    /// Direct sub-expressions (empty for node operands).
    pub fn children(&self) -> &[PatternExpr] {
        match self {
            PatternExpr::Node(_) => &[],
            PatternExpr::Serial(items) | PatternExpr::Parallel(items) => items,
        }
    }
}

impl fmt::Display for NodeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "{}[{}]", self.kind, condition),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl fmt::Display for PatternExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (items, separator) = match self {
            PatternExpr::Node(node) => return write!(f, "{}", node),
            PatternExpr::Serial(items) => (items, " > "),
            PatternExpr::Parallel(items) => (items, " | "),
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
