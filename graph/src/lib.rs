//! Graft Graph Storage
//!
//! This crate provides the directed graph that patterns are matched against
//! and transforms rewrite:
//! - Node storage in insertion order (the canonical iteration order)
//! - Edge set without duplicates
//! - Adjacency index: successors/predecessors of a node in edge order
//! - Structural mutation: removal and merge-and-replace

mod graph;
mod index;

pub use graph::*;
