//! Rename - rewrite node kinds or names with a regex rule.

use graft_graph::Graph;
use regex_lite::Regex;

use crate::{Transform, TransformError, TransformOutcome, TransformResult};

/// Which node label a rename rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameTarget {
    Kind,
    Name,
}

/// Replace every match of a regex in a node label.
///
/// The replacement may refer to capture groups as `\1`, `\2`, ...
#[derive(Debug, Clone)]
pub struct Rename {
    target: RenameTarget,
    pattern: Regex,
    replacement: String,
}

impl Rename {
    /// Rename node kinds.
    pub fn kind(pattern: &str, to: &str) -> TransformResult<Self> {
        Self::new(RenameTarget::Kind, pattern, to)
    }

    /// Rename node display names.
    pub fn name(pattern: &str, to: &str) -> TransformResult<Self> {
        Self::new(RenameTarget::Name, pattern, to)
    }

    pub fn new(target: RenameTarget, pattern: &str, to: &str) -> TransformResult<Self> {
        let regex =
            Regex::new(pattern).map_err(|e| TransformError::invalid_regex(pattern, e.to_string()))?;
        Ok(Self {
            target,
            pattern: regex,
            replacement: expand_backrefs(to),
        })
    }

    pub fn target(&self) -> RenameTarget {
        self.target
    }

    /// Apply the rule to one label; `None` when nothing changes.
    fn rewrite(&self, label: &str) -> Option<String> {
        if !self.pattern.is_match(label) {
            return None;
        }
        let renamed = self.pattern.replace_all(label, self.replacement.as_str());
        (renamed != label).then(|| renamed.into_owned())
    }
}

impl Transform for Rename {
    fn name(&self) -> &'static str {
        "rename"
    }

    #[tracing::instrument(name = "rename", skip_all, fields(pattern = self.pattern.as_str()))]
    fn apply(&self, graph: &mut Graph) -> TransformResult<TransformOutcome> {
        let mut outcome = TransformOutcome::default();
        for node in graph.nodes_mut() {
            let label = match self.target {
                RenameTarget::Kind => &mut node.kind,
                RenameTarget::Name => &mut node.name,
            };
            if self.pattern.is_match(label) {
                outcome.matched += 1;
            }
            if let Some(renamed) = self.rewrite(label) {
                tracing::trace!(node = %node.id, from = %label, to = %renamed, "rename");
                *label = renamed;
                outcome.renamed += 1;
            }
        }
        tracing::debug!(renamed = outcome.renamed, "rename finished");
        Ok(outcome)
    }
}

/// Turn `\N` group references into `${N}` and escape literal `$`.
fn expand_backrefs(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    while let Some(d) = chars.next_if(char::is_ascii_digit) {
                        out.push(d);
                    }
                    out.push('}');
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    out
}
