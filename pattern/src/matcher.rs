//! Pattern matching against the graph.

use graft_core::{GraphError, NodeId};
use graft_graph::Graph;
use indexmap::IndexSet;

use crate::{CompiledPattern, MatchConfig, NodePattern, PatternError, PatternResult};

/// The nodes a successful match consumed and the nodes that come next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Every node that took part in the match, in match order.
    pub nodes: Vec<NodeId>,
    /// Nodes immediately after the matched region.
    pub frontier: Vec<NodeId>,
}

impl MatchOutcome {
    fn absorb(&mut self, nodes: Vec<NodeId>) {
        for node in nodes {
            if !self.nodes.contains(&node) {
                self.nodes.push(node);
            }
        }
    }
}

/// Pattern matcher bound to one graph.
pub struct Matcher<'g> {
    graph: &'g Graph,
    config: MatchConfig,
}

impl<'g> Matcher<'g> {
    /// Create a new matcher with default settings.
    pub fn new(graph: &'g Graph) -> Self {
        Self::with_config(graph, MatchConfig::default())
    }

    pub fn with_config(graph: &'g Graph, config: MatchConfig) -> Self {
        Self { graph, config }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Match `pattern` with `start` as its entry nodes.
    ///
    /// Returns `Ok(None)` when the pattern does not match there.
    pub fn match_at(
        &self,
        pattern: &CompiledPattern,
        start: &[NodeId],
    ) -> PatternResult<Option<MatchOutcome>> {
        if let Some(missing) = start.iter().find(|id| !self.graph.contains(id)) {
            return Err(GraphError::node_not_found(missing).into());
        }
        self.match_pattern(pattern, start)
    }

    pub(crate) fn match_pattern(
        &self,
        pattern: &CompiledPattern,
        start: &[NodeId],
    ) -> PatternResult<Option<MatchOutcome>> {
        match pattern {
            CompiledPattern::Node(node) => Ok(self.match_node(node, start)),
            CompiledPattern::Serial(items) => self.match_serial(items, start),
            CompiledPattern::Parallel(branches) => self.match_parallel(branches, start),
        }
    }

    fn match_node(&self, pattern: &NodePattern, start: &[NodeId]) -> Option<MatchOutcome> {
        let (first, rest) = start.split_first()?;
        if rest.iter().any(|id| id != first) {
            return None;
        }
        let node = self.graph.node(first)?;
        if !pattern.accepts(node, &self.config) {
            return None;
        }
        Some(MatchOutcome {
            nodes: vec![first.clone()],
            frontier: self.graph.outgoing(first),
        })
    }

    fn match_serial(
        &self,
        items: &[CompiledPattern],
        start: &[NodeId],
    ) -> PatternResult<Option<MatchOutcome>> {
        if items.is_empty() {
            return Ok(None);
        }
        let mut outcome = MatchOutcome::default();
        let mut cursor = start.to_vec();

        for item in items {
            let Some(step) = self.match_pattern(item, &cursor)? else {
                return Ok(None);
            };
            outcome.absorb(step.nodes);
            cursor = step.frontier;
        }

        outcome.frontier = cursor;
        Ok(Some(outcome))
    }

    fn match_parallel(
        &self,
        branches: &[CompiledPattern],
        start: &[NodeId],
    ) -> PatternResult<Option<MatchOutcome>> {
        let Some(head) = start.first() else {
            return Ok(None);
        };
        if branches.is_empty() {
            return Ok(None);
        }
        if branches.len() > self.config.max_parallel_branches {
            tracing::debug!(
                branches = branches.len(),
                max = self.config.max_parallel_branches,
                "parallel pattern exceeds branch limit"
            );
            return Ok(None);
        }

        let given: IndexSet<NodeId> = start.iter().cloned().collect();
        if given.len() >= branches.len() {
            return self.match_group(branches, given);
        }

        // Widen the start set with each sibling group that holds all of it.
        let mut ambiguous = None;
        for group in self.graph.sibling_groups(head) {
            let candidates: IndexSet<NodeId> = group.into_iter().collect();
            if !given.iter().all(|id| candidates.contains(id)) {
                continue;
            }
            match self.match_group(branches, candidates) {
                Ok(Some(outcome)) => return Ok(Some(outcome)),
                Ok(None) => {}
                Err(e) if e.is_local() => ambiguous = Some(e),
                Err(e) => return Err(e),
            }
        }
        ambiguous.map_or(Ok(None), Err)
    }

    /// Match each branch against exactly one of `candidates`.
    fn match_group(
        &self,
        branches: &[CompiledPattern],
        candidates: IndexSet<NodeId>,
    ) -> PatternResult<Option<MatchOutcome>> {
        if candidates.len() != branches.len() {
            tracing::trace!(
                candidates = candidates.len(),
                branches = branches.len(),
                "sibling count does not fit parallel pattern"
            );
            return Ok(None);
        }
        let candidates: Vec<NodeId> = candidates.into_iter().collect();

        // table[b][c]: branch b matched from candidate c alone.
        let mut table = Vec::with_capacity(branches.len());
        for branch in branches {
            let mut row = Vec::with_capacity(candidates.len());
            for candidate in &candidates {
                let cell = match self.match_pattern(branch, std::slice::from_ref(candidate)) {
                    Ok(cell) => cell,
                    Err(e) if e.is_local() => None,
                    Err(e) => return Err(e),
                };
                row.push(cell);
            }
            if row.iter().all(Option::is_none) {
                return Ok(None);
            }
            table.push(row);
        }

        match assign_branches(&table) {
            Assignment::None => Ok(None),
            Assignment::Unique(outcome) => Ok(Some(outcome)),
            Assignment::Ambiguous => {
                tracing::debug!(?candidates, "ambiguous parallel assignment");
                Err(PatternError::ambiguous(candidates))
            }
        }
    }
}

/// Result of assigning candidates to parallel branches.
#[derive(Debug, PartialEq)]
enum Assignment {
    None,
    Unique(MatchOutcome),
    Ambiguous,
}

/// Look for one-to-one assignments of candidates (columns) to branches
/// (rows) whose branch frontiers all agree.
///
/// Assignments that produce the same nodes and frontier count as one. Each
/// frontier is tried once; for a frontier that admits an assignment, every
/// alternative node set is ruled out with a bipartite matching per cell and
/// per node, so the work stays polynomial in the table size.
fn assign_branches(table: &[Vec<Option<MatchOutcome>>]) -> Assignment {
    let size = table.len();
    if size == 0 || table.iter().any(|row| row.len() != size) {
        return Assignment::None;
    }

    let mut frontiers: Vec<&[NodeId]> = Vec::new();
    for cell in table.iter().flatten().flatten() {
        if !frontiers.iter().any(|f| same_nodes(f, &cell.frontier)) {
            frontiers.push(&cell.frontier);
        }
    }

    let mut found: Option<MatchOutcome> = None;
    for frontier in frontiers {
        let usable = |row: usize, column: usize| {
            table[row][column]
                .as_ref()
                .is_some_and(|cell| same_nodes(&cell.frontier, frontier))
        };
        let Some(assignment) = perfect_matching(size, &usable) else {
            continue;
        };
        if found.is_some() {
            return Assignment::Ambiguous;
        }

        let mut outcome = MatchOutcome::default();
        for (row, column) in assignment.into_iter().enumerate() {
            if let Some(cell) = &table[row][column] {
                outcome.absorb(cell.nodes.clone());
            }
        }
        outcome.frontier = frontier.to_vec();

        if has_alternative(table, &usable, &outcome.nodes) {
            return Assignment::Ambiguous;
        }
        found = Some(outcome);
    }
    found.map_or(Assignment::None, Assignment::Unique)
}

/// Whether some usable assignment covers a node set other than `nodes`.
///
/// A different set either reaches a node outside `nodes`, which means some
/// cell doing so can be part of a full assignment, or leaves out a node of
/// `nodes`, which means a full assignment avoids every cell holding it.
fn has_alternative(
    table: &[Vec<Option<MatchOutcome>>],
    usable: &dyn Fn(usize, usize) -> bool,
    nodes: &[NodeId],
) -> bool {
    let size = table.len();
    let covered: IndexSet<&NodeId> = nodes.iter().collect();
    let holds = |row: usize, column: usize, id: &NodeId| {
        table[row][column]
            .as_ref()
            .is_some_and(|cell| cell.nodes.contains(id))
    };

    for row in 0..size {
        for column in 0..size {
            let reaches_out = table[row][column]
                .as_ref()
                .is_some_and(|cell| cell.nodes.iter().any(|id| !covered.contains(id)));
            if !reaches_out || !usable(row, column) {
                continue;
            }
            // pin (row, column) and match the rest around it
            let pinned = |r: usize, c: usize| usable(r, c) && ((r == row) == (c == column));
            if perfect_matching(size, &pinned).is_some() {
                return true;
            }
        }
    }

    nodes.iter().any(|id| {
        let avoiding = |r: usize, c: usize| usable(r, c) && !holds(r, c, id);
        perfect_matching(size, &avoiding).is_some()
    })
}

/// Assign every row a distinct column through `usable` cells, returning the
/// column chosen for each row.
fn perfect_matching(size: usize, usable: &dyn Fn(usize, usize) -> bool) -> Option<Vec<usize>> {
    let mut owner: Vec<Option<usize>> = vec![None; size];
    for row in 0..size {
        let mut seen = vec![false; size];
        if !augment(row, usable, &mut owner, &mut seen) {
            return None;
        }
    }

    let mut assignment = vec![0; size];
    for (column, row) in owner.into_iter().enumerate() {
        if let Some(row) = row {
            assignment[row] = column;
        }
    }
    Some(assignment)
}

/// Find a column for `row`, moving earlier rows along augmenting paths.
fn augment(
    row: usize,
    usable: &dyn Fn(usize, usize) -> bool,
    owner: &mut [Option<usize>],
    seen: &mut [bool],
) -> bool {
    for column in 0..owner.len() {
        if seen[column] || !usable(row, column) {
            continue;
        }
        seen[column] = true;
        let current = owner[column];
        let free = match current {
            None => true,
            Some(other) => augment(other, usable, owner, seen),
        };
        if free {
            owner[column] = Some(row);
            return true;
        }
    }
    false
}

fn same_nodes(a: &[NodeId], b: &[NodeId]) -> bool {
    let a: IndexSet<&NodeId> = a.iter().collect();
    let b: IndexSet<&NodeId> = b.iter().collect();
    a.len() == b.len() && a.iter().all(|id| b.contains(id))
}
