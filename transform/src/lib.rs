//! Graft Transform
//!
//! Rewrite a graph in place based on pattern matches.
//!
//! Responsibilities:
//! - Rename node kinds or names with regex rules
//! - Fold matched groups into a single node
//! - Prune matched nodes, optionally with their dead input branches
//! - Collapse runs of identical nodes
//! - Run transforms in sequence
//!
//! # Module Structure
//!
//! - `transform` - The `Transform` trait and `Pipeline`
//! - `ops/` - Individual transforms (rename, fold, prune, prune_branch, fold_duplicates)
//! - `error` - Error types for transform failures
//! - `outcome` - Counts of what a transform changed

mod error;
mod ops;
mod outcome;
mod transform;

pub use error::{TransformError, TransformResult};
pub use ops::{Fold, FoldDuplicates, FoldTarget, Prune, PruneBranch, Rename, RenameTarget};
pub use outcome::TransformOutcome;
pub use transform::{Pipeline, Transform};

/// Separator between member titles in a folded node's name.
pub const FOLD_NAME_SEPARATOR: &str = " > ";
