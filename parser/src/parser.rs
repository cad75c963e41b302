//! Recursive-descent parser for graph patterns.
//!
//! ```text
//! expression := serial | parallel | operand
//! serial     := operand (">" operand)+
//! parallel   := operand ("|" operand)+
//! operand    := "(" expression ")" | op
//! op         := identifier-regex ["[" condition "]"]
//! ```
//!
//! Every rule either succeeds and advances the cursor, or fails and leaves
//! the cursor where it was on entry.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::ast::{NodeExpr, PatternExpr, Span};
use crate::error::{ParseError, ParseResult};

/// Characters allowed in a kind regex. Grammar symbols and whitespace end it.
static IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.*+?\\-]+").expect("identifier pattern is valid"));

/// Condition body: everything up to the closing bracket.
static CONDITION_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\]]+").expect("condition pattern is valid"));

// ==================== PARSER STATE ====================

/// Parser state: the input and a byte cursor into it.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
    /// Furthest position any rule reached, for error reporting.
    furthest: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser over pattern text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            furthest: 0,
        }
    }

    /// Current cursor position.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

// ==================== PRIMITIVES ====================

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn advance_to(&mut self, pos: usize) {
        self.pos = pos;
        self.furthest = self.furthest.max(pos);
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.advance_to(self.pos + (rest.len() - trimmed.len()));
    }

    /// Consume an exact literal, with any whitespace around it.
    pub fn token(&mut self, literal: &str) -> bool {
        let start = self.pos;
        self.skip_ws();
        if self.rest().starts_with(literal) {
            self.advance_to(self.pos + literal.len());
            self.skip_ws();
            true
        } else {
            self.pos = start;
            false
        }
    }

    /// Consume non-empty text matching `regex` right at the cursor.
    pub fn re(&mut self, regex: &Regex) -> Option<&'a str> {
        let rest = self.rest();
        let found = regex.find(rest)?;
        if found.start() != 0 || found.is_empty() {
            return None;
        }
        self.advance_to(self.pos + found.end());
        Some(&rest[..found.end()])
    }

    /// Parse a `[ condition ]` suffix and return its trimmed text.
    pub fn condition(&mut self) -> Option<String> {
        let start = self.pos;
        if !self.token("[") {
            return None;
        }
        let body = self.re(&CONDITION_BODY).map(str::trim);
        match body {
            Some(text) if !text.is_empty() && self.token("]") => Some(text.to_string()),
            _ => {
                self.pos = start;
                None
            }
        }
    }
}

// ==================== GRAMMAR RULES ====================

impl<'a> Parser<'a> {
    /// Parse a node operand: a kind regex with an optional condition.
    pub fn op(&mut self) -> Option<PatternExpr> {
        let start = self.pos;
        self.skip_ws();
        let kind_start = self.pos;
        let Some(kind) = self.re(&IDENT) else {
            self.pos = start;
            return None;
        };
        let kind_end = self.pos;
        let condition = self.condition();
        Some(PatternExpr::Node(NodeExpr {
            kind: kind.to_string(),
            condition,
            span: Span::new(kind_start, kind_end),
        }))
    }

    /// Parse an operand: a parenthesized expression, else a node operand.
    pub fn expression(&mut self) -> Option<PatternExpr> {
        let start = self.pos;
        if self.token("(") {
            let inner = self
                .serial()
                .or_else(|| self.parallel())
                .or_else(|| self.expression());
            if let Some(expr) = inner {
                if self.token(")") {
                    return Some(expr);
                }
            }
            self.pos = start;
        }
        self.op()
    }

    /// Parse two or more operands joined by `>`.
    pub fn serial(&mut self) -> Option<PatternExpr> {
        self.chain(">", PatternExpr::Serial)
    }

    /// Parse two or more operands joined by `|`.
    pub fn parallel(&mut self) -> Option<PatternExpr> {
        self.chain("|", PatternExpr::Parallel)
    }

    /// Greedy left fold of operands around one operator. An operator is only
    /// consumed when an operand follows it.
    fn chain(
        &mut self,
        operator: &str,
        build: fn(Vec<PatternExpr>) -> PatternExpr,
    ) -> Option<PatternExpr> {
        let start = self.pos;
        let mut operands = vec![self.expression()?];

        loop {
            let before = self.pos;
            if !self.token(operator) {
                break;
            }
            match self.expression() {
                Some(next) => operands.push(next),
                None => {
                    self.pos = before;
                    break;
                }
            }
        }

        if operands.len() < 2 {
            self.pos = start;
            return None;
        }
        Some(build(operands))
    }

    /// Parse the whole input as one pattern.
    ///
    /// Tries every top-level rule from the same start and keeps the one that
    /// consumed the most input; only trailing whitespace may remain.
    pub fn parse(&mut self) -> ParseResult<PatternExpr> {
        let start = self.pos;
        let rules: [fn(&mut Self) -> Option<PatternExpr>; 3] =
            [Self::expression, Self::serial, Self::parallel];

        let mut best: Option<(PatternExpr, usize)> = None;
        for rule in rules {
            self.pos = start;
            if let Some(expr) = rule(self) {
                if best.as_ref().map_or(true, |(_, end)| self.pos > *end) {
                    best = Some((expr, self.pos));
                }
            }
        }

        match best {
            Some((expr, end)) => {
                self.pos = end;
                self.skip_ws();
                if self.pos == self.input.len() {
                    Ok(expr)
                } else {
                    let err = self.error_at(self.pos.max(self.furthest), "operator");
                    self.pos = start;
                    Err(err)
                }
            }
            None => {
                self.pos = start;
                Err(self.error_at(self.furthest, "node pattern"))
            }
        }
    }

    fn error_at(&self, pos: usize, expected: &str) -> ParseError {
        match self.input[pos..].chars().next() {
            Some(found) => ParseError::unexpected_token(
                Span::new(pos, pos + found.len_utf8()),
                expected,
                &found.to_string(),
            ),
            None => ParseError::unexpected_eof(Span::at(pos), expected),
        }
    }
}

// ==================== PUBLIC API ====================

/// Parse pattern text into an expression tree.
pub fn parse_pattern(input: &str) -> ParseResult<PatternExpr> {
    Parser::new(input).parse()
}

// ==================== TESTS ====================
