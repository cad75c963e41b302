//! Transform implementations.
//!
//! Each transform lives in its own module and implements `Transform`.

mod fold;
mod fold_duplicates;
mod prune;
mod prune_branch;
mod rename;

pub use fold::{Fold, FoldTarget};
pub use fold_duplicates::FoldDuplicates;
pub use prune::Prune;
pub use prune_branch::PruneBranch;
pub use rename::{Rename, RenameTarget};
