//! Graft Pattern
//!
//! Compile patterns, match them against a graph, search a whole graph.
//!
//! Responsibilities:
//! - Compile the parsed pattern tree into kind regexes
//! - Match node, serial and parallel patterns from given start nodes
//! - Discover parallel siblings and check branch convergence
//! - Find all non-overlapping matches in insertion order

mod config;
mod error;
mod matcher;
mod pattern;
mod search;

pub use config::MatchConfig;
pub use error::{PatternError, PatternResult};
pub use matcher::{MatchOutcome, Matcher};
pub use pattern::{CompiledPattern, NodePattern};
pub use search::{search, SearchResult};

/// Attribute a `[condition]` is compared against unless configured otherwise.
pub const DEFAULT_CONDITION_ATTR: &str = "shape";

/// Maximum number of branches a parallel pattern will try to assign.
pub const MAX_PARALLEL_BRANCHES: usize = 16;
